//! Write a placeholder favicon.

use anyhow::{Context, Result};
use clap::Parser;
use recyclehole_assets::cli::FaviconArgs;
use recyclehole_assets::favicon::{parse_color, write_favicon};

fn main() -> Result<()> {
    let args = FaviconArgs::parse();
    let color = parse_color(&args.color)?;
    write_favicon(&args.output, args.size, color)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    println!("Image saved to {}", args.output.display());
    Ok(())
}
