//! Generate the leaky faucet interactable via the Images API.

use anyhow::{Context, Result};
use clap::Parser;
use recyclehole_assets::batch::run_batch;
use recyclehole_assets::cli::FaucetArgs;
use recyclehole_assets::config::{resolve_api_key, setup_logging};
use recyclehole_assets::constants::ASSET_GEN_USER_AGENT;
use recyclehole_assets::openai::OpenAiImages;
use recyclehole_assets::planner::plan_faucet;
use recyclehole_assets::report::Reporter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = FaucetArgs::parse();
    let _ = setup_logging(args.request.debug);

    let api_key = resolve_api_key(args.request.dry_run, args.request.openai_api_key.as_deref())?;

    // dall-e models hand back a URL unless asked for base64.
    let mut options = args.request.batch_options(args.out.clone(), &args.model);
    options.response_format = Some("b64_json".to_string());

    if !options.dry_run {
        std::fs::create_dir_all(&options.out_root)
            .with_context(|| format!("Failed to create {}", options.out_root.display()))?;
    }

    let client = OpenAiImages::new(&api_key, args.request.timeout(), ASSET_GEN_USER_AGENT)?;
    let mut reporter = Reporter::stdout();
    let summary = run_batch(&plan_faucet(), &options, &client, &mut reporter).await;

    reporter.note(&format!(
        "Done. Generated {} of {} assets.",
        summary.written, summary.planned
    ));
    Ok(())
}
