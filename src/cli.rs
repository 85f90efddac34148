//! CLI parsers for each tool
use clap::{ArgAction, Args, Parser};
use std::path::PathBuf;
use std::time::Duration;

use crate::batch::BatchOptions;
use crate::constants::{API_KEY_ENV, BACKOFF_UNIT, DEFAULT_IMAGE_SIZE};
use crate::fetch::RetryPolicy;
use crate::postprocess::{ConvertOptions, WebpSettings};

#[derive(Args, Debug, Clone)]
/// Request and retry flags shared by the generators
pub struct RequestArgs {
    /// API key. Env: OPENAI_API_KEY, required unless `--dry-run`
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    pub openai_api_key: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 180)]
    pub timeout: u64,

    /// Max retries per image after the first attempt
    #[arg(long, default_value_t = 3)]
    pub retries: u32,

    /// Sleep milliseconds before each request
    #[arg(long, default_value_t = 250)]
    pub sleep_ms: u64,

    /// Print the files that would be generated without calling the API
    #[arg(long)]
    pub dry_run: bool,

    /// Force re-generate even if the file exists
    #[arg(long)]
    pub overwrite: bool,

    /// Enable debug logging. Env: RECYCLEHOLE_DEBUG
    #[arg(long, env = "RECYCLEHOLE_DEBUG")]
    pub debug: bool,
}

impl RequestArgs {
    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Retry settings from the flags.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            retries: self.retries,
            initial_delay: Duration::from_millis(self.sleep_ms),
            backoff_unit: BACKOFF_UNIT,
        }
    }

    /// Batch options with everything but the per-tool bits filled in.
    pub fn batch_options(&self, out_root: PathBuf, model: &str) -> BatchOptions {
        BatchOptions {
            out_root,
            model: model.to_string(),
            size: DEFAULT_IMAGE_SIZE.to_string(),
            response_format: None,
            dry_run: self.dry_run,
            skip_existing: true,
            overwrite: self.overwrite,
            rescale: None,
            retry: self.retry_policy(),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "generate_assets")]
#[command(about = "Generate 1024x1024 PNG tile, player and trash assets via the Images API.")]
/// Tile/player/trash generator options
pub struct GenerateAssetsArgs {
    /// Output directory root
    #[arg(long, default_value = "assets")]
    pub out: PathBuf,

    /// Variations per tile type
    #[arg(long, default_value_t = 2)]
    pub tile_variations: u32,

    /// Min variations per trash category
    #[arg(long, default_value_t = 5)]
    pub trash_min: u32,

    /// Max variations per trash category
    #[arg(long, default_value_t = 8)]
    pub trash_max: u32,

    /// Requested variations per trash category, clamped into [trash-min, trash-max]
    #[arg(long, default_value_t = 10)]
    pub trash_count: u32,

    /// Max dimension to rescale PNGs to after generation (e.g. 512). 0 disables
    #[arg(long, default_value_t = 0)]
    pub rescale: u32,

    /// Image model
    #[arg(long, default_value = "gpt-image-1")]
    pub model: String,

    /// Skip images that already exist; `--skip-existing false` turns it off
    #[arg(
        long,
        default_value_t = true,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub skip_existing: bool,

    #[command(flatten)]
    /// Shared request flags
    pub request: RequestArgs,
}

#[derive(Parser, Debug)]
#[command(name = "generate_building_assets")]
#[command(about = "Generate building facade textures for the city buildings.")]
/// Building facade generator options
pub struct BuildingArgs {
    /// Output directory root
    #[arg(long, default_value = "assets")]
    pub out: PathBuf,

    /// Number of variations per category
    #[arg(long, default_value_t = 5)]
    pub count: u32,

    /// Image model
    #[arg(long, default_value = "gpt-image-1")]
    pub model: String,

    /// Skip images that already exist; `--skip-existing false` turns it off
    #[arg(
        long,
        default_value_t = true,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub skip_existing: bool,

    #[command(flatten)]
    /// Shared request flags
    pub request: RequestArgs,
}

#[derive(Parser, Debug)]
#[command(name = "generate_faucet_asset")]
#[command(about = "Generate the faucet asset via the Images API.")]
/// Faucet generator options
pub struct FaucetArgs {
    /// Output directory root
    #[arg(long, default_value = ".")]
    pub out: PathBuf,

    /// Image model
    #[arg(long, default_value = "dall-e-3")]
    pub model: String,

    #[command(flatten)]
    /// Shared request flags
    pub request: RequestArgs,
}

#[derive(Parser, Debug)]
#[command(name = "convert_assets_to_webp")]
#[command(about = "Convert all project PNG assets to WebP.")]
/// PNG to WebP converter options
pub struct ConvertArgs {
    /// Assets root directory to scan
    #[arg(long, default_value = "assets")]
    pub assets_dir: PathBuf,

    /// WebP quality
    #[arg(long, default_value_t = 85, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub quality: u8,

    /// Use lossless WebP (may be larger)
    #[arg(long)]
    pub lossless: bool,

    /// Delete PNGs after successful conversion
    #[arg(long)]
    pub delete_png: bool,

    /// Leave existing .webp files alone
    #[arg(long)]
    pub skip_existing: bool,

    /// Reconvert even when the .webp exists
    #[arg(long)]
    pub overwrite: bool,

    /// Also convert the project-root froghole.png into <assets>/player/froghole.webp
    #[arg(long)]
    pub include_froghole: bool,

    /// Where to find froghole.png
    #[arg(long, default_value = "froghole.png")]
    pub froghole_path: PathBuf,

    /// Enable debug logging. Env: RECYCLEHOLE_DEBUG
    #[arg(long, env = "RECYCLEHOLE_DEBUG")]
    pub debug: bool,
}

impl ConvertArgs {
    /// Conversion options from the flags.
    pub fn convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            webp: self.webp_settings(),
            delete_source: self.delete_png,
            skip_existing: self.skip_existing,
            overwrite: self.overwrite,
        }
    }

    /// Encoder settings from the flags.
    pub fn webp_settings(&self) -> WebpSettings {
        WebpSettings {
            quality: f32::from(self.quality),
            lossless: self.lossless,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "generate_favicon")]
#[command(about = "Write a placeholder solid-colour favicon.ico.")]
/// Favicon options
pub struct FaviconArgs {
    /// Output file
    #[arg(long, default_value = "favicon.ico")]
    pub output: PathBuf,

    /// Edge length in pixels
    #[arg(long, default_value_t = 32)]
    pub size: u32,

    /// Fill colour, `rrggbb` or `white`/`black`
    #[arg(long, default_value = "ffffff")]
    pub color: String,
}

#[derive(Parser, Debug)]
#[command(name = "log_missing_textures")]
#[command(about = "Rebuild the trash texture manifest and log categories without textures.")]
/// Manifest tool options
pub struct ManifestArgs {
    /// Project root containing assets/ and src/modules/
    #[arg(long, default_value = ".")]
    pub project_root: PathBuf,

    /// Enable debug logging. Env: RECYCLEHOLE_DEBUG
    #[arg(long, env = "RECYCLEHOLE_DEBUG")]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn commands_are_well_formed() {
        GenerateAssetsArgs::command().debug_assert();
        BuildingArgs::command().debug_assert();
        FaucetArgs::command().debug_assert();
        ConvertArgs::command().debug_assert();
        FaviconArgs::command().debug_assert();
        ManifestArgs::command().debug_assert();
    }

    #[test]
    fn generate_defaults() {
        let args = GenerateAssetsArgs::try_parse_from(["generate_assets", "--dry-run"])
            .expect("parse");
        assert_eq!(args.out, PathBuf::from("assets"));
        assert_eq!(args.tile_variations, 2);
        assert_eq!((args.trash_min, args.trash_max, args.trash_count), (5, 8, 10));
        assert!(args.skip_existing);
        assert!(args.request.dry_run);
        assert_eq!(args.request.retries, 3);
        assert_eq!(args.request.timeout(), Duration::from_secs(180));
        assert_eq!(
            args.request.retry_policy().initial_delay,
            Duration::from_millis(250)
        );
    }

    #[test]
    fn skip_existing_can_be_turned_off() {
        let args = BuildingArgs::try_parse_from([
            "generate_building_assets",
            "--skip-existing",
            "false",
        ])
        .expect("parse");
        assert!(!args.skip_existing);
        assert_eq!(args.count, 5);
    }

    #[test]
    fn bare_skip_existing_still_parses() {
        let args = GenerateAssetsArgs::try_parse_from([
            "generate_assets",
            "--skip-existing",
            "--dry-run",
        ])
        .expect("parse");
        assert!(args.skip_existing);
        assert!(args.request.dry_run);

        let args = BuildingArgs::try_parse_from(["generate_building_assets", "--skip-existing"])
            .expect("parse");
        assert!(args.skip_existing);
    }

    #[test]
    fn faucet_defaults_differ() {
        let args = FaucetArgs::try_parse_from(["generate_faucet_asset"]).expect("parse");
        assert_eq!(args.model, "dall-e-3");
        assert_eq!(args.out, PathBuf::from("."));
    }

    #[test]
    fn convert_quality_bounds() {
        let args = ConvertArgs::try_parse_from(["convert_assets_to_webp", "--lossless"])
            .expect("parse");
        assert_eq!(args.quality, 85);
        assert!(args.convert_options().webp.lossless);
        assert!(
            ConvertArgs::try_parse_from(["convert_assets_to_webp", "--quality", "101"]).is_err()
        );
    }
}
