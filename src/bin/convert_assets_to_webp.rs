//! Convert every PNG under the assets tree to WebP.

use anyhow::{Result, bail};
use clap::Parser;
use recyclehole_assets::cli::ConvertArgs;
use recyclehole_assets::config::setup_logging;
use recyclehole_assets::postprocess::{convert_to_webp, convert_tree};
use recyclehole_assets::report::Reporter;

fn main() -> Result<()> {
    let args = ConvertArgs::parse();
    let _ = setup_logging(args.debug);

    let root = &args.assets_dir;
    if !root.is_dir() {
        bail!("Assets dir not found: {}", root.display());
    }

    let mut reporter = Reporter::stdout();
    let mut summary = convert_tree(root, &args.convert_options(), &mut reporter)?;

    if args.include_froghole {
        let src = &args.froghole_path;
        if src.exists() {
            let dst = root.join("player").join("froghole.webp");
            match convert_to_webp(src, &dst, args.webp_settings()) {
                Ok(()) => {
                    summary.converted += 1;
                    reporter.note(&format!(
                        "WEBP player/froghole.webp (from {})",
                        src.display()
                    ));
                }
                Err(err) => {
                    summary.failed += 1;
                    reporter.convert_failed(src, &err);
                }
            }
        } else {
            reporter.note(&format!("{} not found; skipping", src.display()));
        }
    }

    reporter.note(&format!(
        "Done. Converted {} PNGs under {} ({} skipped, {} failed).",
        summary.converted,
        root.display(),
        summary.skipped,
        summary.failed
    ));
    Ok(())
}
