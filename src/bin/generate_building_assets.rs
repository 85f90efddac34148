//! Generate building facade textures via the Images API.

use anyhow::{Context, Result};
use clap::Parser;
use recyclehole_assets::batch::run_batch;
use recyclehole_assets::cli::BuildingArgs;
use recyclehole_assets::config::{resolve_api_key, setup_logging};
use recyclehole_assets::constants::BUILDING_GEN_USER_AGENT;
use recyclehole_assets::openai::OpenAiImages;
use recyclehole_assets::planner::plan_buildings;
use recyclehole_assets::report::Reporter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = BuildingArgs::parse();
    let _ = setup_logging(args.request.debug);

    let api_key = resolve_api_key(args.request.dry_run, args.request.openai_api_key.as_deref())?;

    let mut options = args.request.batch_options(args.out.clone(), &args.model);
    options.skip_existing = args.skip_existing;

    if !options.dry_run {
        std::fs::create_dir_all(&options.out_root)
            .with_context(|| format!("Failed to create {}", options.out_root.display()))?;
    }

    let tasks = plan_buildings(args.count);
    let client = OpenAiImages::new(&api_key, args.request.timeout(), BUILDING_GEN_USER_AGENT)?;
    let mut reporter = Reporter::stdout();
    let summary = run_batch(&tasks, &options, &client, &mut reporter).await;

    reporter.note(&format!(
        "Done. Generated {} of {} facades ({} skipped, {} failed).",
        summary.written, summary.planned, summary.skipped, summary.failed
    ));
    Ok(())
}
