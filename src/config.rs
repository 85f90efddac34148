//! Config handling

use tracing::log::LevelFilter;

use crate::constants::API_KEY_ENV;
use crate::error::AssetError;

/// Sets up logging based on the debug flag
pub fn setup_logging(debug: bool) -> Result<(), Box<std::io::Error>> {
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let mut logger = simple_logger::SimpleLogger::new().with_level(level);
    if !debug {
        logger = logger
            .with_module_level("rustls", LevelFilter::Warn)
            .with_module_level("hyper_util", LevelFilter::Warn)
            .with_module_level("reqwest", LevelFilter::Warn);
    }
    logger.init().map_err(|err| {
        eprintln!("Failed to initialize logger: {}", err);
        Box::new(std::io::Error::other(err))
    })
}

/// Returns the API key to use, or an error when a live run has none.
///
/// Dry runs never talk to the API, so an absent key is fine there.
pub fn resolve_api_key(dry_run: bool, api_key: Option<&str>) -> Result<String, AssetError> {
    match api_key.map(str::trim).filter(|key| !key.is_empty()) {
        Some(key) => Ok(key.to_string()),
        None if dry_run => Ok(String::new()),
        None => Err(AssetError::Config(format!("{API_KEY_ENV} not set."))),
    }
}
