//! Placeholder favicon.

use std::path::Path;

use image::{DynamicImage, ImageFormat, Rgb, Rgba, RgbaImage};

use crate::error::AssetError;

/// Parses `rrggbb` (optionally `#`-prefixed) or `white`/`black`.
pub fn parse_color(value: &str) -> Result<Rgb<u8>, AssetError> {
    let value = value.trim();
    match value.to_ascii_lowercase().as_str() {
        "white" => return Ok(Rgb([255, 255, 255])),
        "black" => return Ok(Rgb([0, 0, 0])),
        _ => {}
    }
    let hex = value.strip_prefix('#').unwrap_or(value);
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(AssetError::Config(format!("invalid colour: {value}")));
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16)
            .map_err(|_| AssetError::Config(format!("invalid colour: {value}")))
    };
    Ok(Rgb([channel(0..2)?, channel(2..4)?, channel(4..6)?]))
}

/// Writes a `size`×`size` opaque square as an ICO file.
///
/// ICO embeds PNG frames that must be RGBA, so the colour gets full alpha.
pub fn write_favicon(path: &Path, size: u32, color: Rgb<u8>) -> Result<(), AssetError> {
    if size == 0 || size > 256 {
        return Err(AssetError::Config(format!(
            "favicon size must be 1..=256, got {size}"
        )));
    }
    let Rgb([r, g, b]) = color;
    let img = RgbaImage::from_pixel(size, size, Rgba([r, g, b, 255]));
    DynamicImage::ImageRgba8(img).save_with_format(path, ImageFormat::Ico)?;
    Ok(())
}
