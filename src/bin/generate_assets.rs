//! Generate tile, player and trash PNGs via the Images API.

use anyhow::{Context, Result};
use clap::Parser;
use recyclehole_assets::batch::run_batch;
use recyclehole_assets::cli::GenerateAssetsArgs;
use recyclehole_assets::config::{resolve_api_key, setup_logging};
use recyclehole_assets::constants::ASSET_GEN_USER_AGENT;
use recyclehole_assets::openai::OpenAiImages;
use recyclehole_assets::planner::{AssetCounts, plan_assets};
use recyclehole_assets::report::Reporter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = GenerateAssetsArgs::parse();
    let _ = setup_logging(args.request.debug);

    let api_key = resolve_api_key(args.request.dry_run, args.request.openai_api_key.as_deref())?;

    let mut options = args.request.batch_options(args.out.clone(), &args.model);
    options.skip_existing = args.skip_existing;
    options.rescale = (args.rescale > 0).then_some(args.rescale);

    if !options.dry_run {
        std::fs::create_dir_all(&options.out_root)
            .with_context(|| format!("Failed to create {}", options.out_root.display()))?;
    }

    let tasks = plan_assets(&AssetCounts {
        tile_variations: args.tile_variations,
        trash_requested: args.trash_count,
        trash_min: args.trash_min,
        trash_max: args.trash_max,
    });

    let client = OpenAiImages::new(&api_key, args.request.timeout(), ASSET_GEN_USER_AGENT)?;
    let mut reporter = Reporter::stdout();
    let summary = run_batch(&tasks, &options, &client, &mut reporter).await;

    reporter.note(&format!(
        "Done. Generated {} of {} assets ({} skipped, {} failed).",
        summary.written, summary.planned, summary.skipped, summary.failed
    ));
    Ok(())
}
