//! Rebuild src/modules/trash-manifest.js and log trash categories with no textures.

use anyhow::{Context, Result};
use clap::Parser;
use recyclehole_assets::cli::ManifestArgs;
use recyclehole_assets::config::setup_logging;
use recyclehole_assets::manifest::update_manifest;

fn main() -> Result<()> {
    let args = ManifestArgs::parse();
    let _ = setup_logging(args.debug);

    let (log_path, manifest_path) =
        update_manifest(&args.project_root).context("Failed to update trash manifest")?;

    for path in [log_path, manifest_path] {
        let shown = path.strip_prefix(&args.project_root).unwrap_or(&path);
        println!("Wrote {}", shown.display());
    }
    Ok(())
}
