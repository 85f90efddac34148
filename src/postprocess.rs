//! Image post-processing: in-place rescale and PNG to WebP conversion.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::{DynamicImage, ImageReader};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::constants::WEBP_METHOD;
use crate::error::AssetError;
use crate::fetch::write_image;
use crate::report::Reporter;

/// What [`rescale_image`] did.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RescaleOutcome {
    /// Already within bounds, file untouched
    Unchanged,
    /// Resampled and rewritten
    Resized {
        /// New width
        width: u32,
        /// New height
        height: u32,
    },
}

/// Target dimensions for fitting `(width, height)` into `max_px`.
///
/// Returns `None` when the image already fits. The longer side becomes
/// `max_px` and the shorter side is scaled by the same ratio, floored.
pub fn fit_within(width: u32, height: u32, max_px: u32) -> Option<(u32, u32)> {
    if width.max(height) <= max_px {
        return None;
    }
    let scale = |short: u32, long: u32| -> u32 {
        let scaled = u64::from(short) * u64::from(max_px) / u64::from(long);
        u32::try_from(scaled).unwrap_or(max_px).max(1)
    };
    if width >= height {
        Some((max_px, scale(height, width)))
    } else {
        Some((scale(width, height), max_px))
    }
}

/// Shrinks the image at `path` in place so neither side exceeds `max_px`.
pub fn rescale_image(path: &Path, max_px: u32) -> Result<RescaleOutcome, AssetError> {
    let reader = ImageReader::open(path)?.with_guessed_format()?;
    let format = reader
        .format()
        .ok_or_else(|| AssetError::UnknownFormat(path.to_path_buf()))?;
    let img = reader.decode()?;

    let Some((width, height)) = fit_within(img.width(), img.height(), max_px) else {
        return Ok(RescaleOutcome::Unchanged);
    };
    debug!(
        "Resizing {} from {}x{} to {width}x{height}",
        path.display(),
        img.width(),
        img.height()
    );
    let mut encoded = Cursor::new(Vec::new());
    img.resize_exact(width, height, FilterType::Lanczos3)
        .write_to(&mut encoded, format)?;
    write_image(path, encoded.get_ref())?;
    Ok(RescaleOutcome::Resized { width, height })
}

/// WebP encoder settings.
#[derive(Clone, Copy, Debug)]
pub struct WebpSettings {
    /// Lossy quality, 0 to 100
    pub quality: f32,
    /// Use lossless VP8L instead
    pub lossless: bool,
}

impl Default for WebpSettings {
    fn default() -> Self {
        Self {
            quality: 85.0,
            lossless: false,
        }
    }
}

/// Keeps RGB8/RGBA8 as-is, converts anything else to RGBA8.
fn to_webp_compatible(img: DynamicImage) -> DynamicImage {
    match img {
        DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_) => img,
        other => DynamicImage::ImageRgba8(other.to_rgba8()),
    }
}

/// Encodes `img` to WebP bytes.
pub fn encode_webp(img: DynamicImage, settings: WebpSettings) -> Result<Vec<u8>, AssetError> {
    let img = to_webp_compatible(img);
    let (width, height) = (img.width(), img.height());
    let encoder = match &img {
        DynamicImage::ImageRgb8(buf) => webp::Encoder::from_rgb(buf.as_raw(), width, height),
        DynamicImage::ImageRgba8(buf) => webp::Encoder::from_rgba(buf.as_raw(), width, height),
        _ => return Err(AssetError::WebP("unsupported color type".to_string())),
    };

    let mut config = webp::WebPConfig::new()
        .map_err(|()| AssetError::WebP("failed to initialise config".to_string()))?;
    config.lossless = i32::from(settings.lossless);
    config.quality = settings.quality.clamp(0.0, 100.0);
    config.method = WEBP_METHOD;
    config.alpha_compression = i32::from(!settings.lossless);

    let memory = encoder
        .encode_advanced(&config)
        .map_err(|err| AssetError::WebP(format!("{err:?}")))?;
    Ok(memory.to_vec())
}

/// Decodes `src` and writes it to `dst` as WebP, creating parents.
pub fn convert_to_webp(src: &Path, dst: &Path, settings: WebpSettings) -> Result<(), AssetError> {
    let img = ImageReader::open(src)?.with_guessed_format()?.decode()?;
    let bytes = encode_webp(img, settings)?;
    write_image(dst, &bytes)
}

/// Settings for a directory conversion run.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConvertOptions {
    /// Encoder settings
    pub webp: WebpSettings,
    /// Remove each PNG after it converts
    pub delete_source: bool,
    /// Leave existing `.webp` files alone
    pub skip_existing: bool,
    /// Reconvert even when the `.webp` exists
    pub overwrite: bool,
}

/// Counters for a conversion run.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ConvertSummary {
    /// Files converted
    pub converted: usize,
    /// Files left alone because the target existed
    pub skipped: usize,
    /// Files that failed
    pub failed: usize,
    /// Sources deleted afterwards
    pub deleted: usize,
}

fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
}

/// PNG files under `root`, sorted for a stable order.
pub fn find_pngs(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!("Skipping unreadable entry under {}: {}", root.display(), err);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && is_png(entry.path()))
        .map(|entry| entry.into_path())
        .collect()
}

/// Converts every PNG under `root` to a sibling `.webp`.
///
/// Fails only when `root` is missing; per-file failures are reported and
/// counted.
pub fn convert_tree<W: std::io::Write>(
    root: &Path,
    options: &ConvertOptions,
    reporter: &mut Reporter<W>,
) -> Result<ConvertSummary, AssetError> {
    if !root.is_dir() {
        return Err(AssetError::NotFound(root.to_path_buf()));
    }

    let mut summary = ConvertSummary::default();
    for src in find_pngs(root) {
        let dst = src.with_extension("webp");
        let rel = dst.strip_prefix(root).unwrap_or(&dst).to_path_buf();

        if options.skip_existing && !options.overwrite && dst.exists() {
            reporter.convert_skipped(&rel);
            summary.skipped += 1;
            continue;
        }

        if let Err(err) = convert_to_webp(&src, &dst, options.webp) {
            reporter.convert_failed(&src, &err);
            summary.failed += 1;
            continue;
        }
        summary.converted += 1;
        reporter.converted(&rel);

        if options.delete_source {
            match fs::remove_file(&src) {
                Ok(()) => summary.deleted += 1,
                Err(err) => {
                    warn!("Failed to delete {}: {}", src.display(), err);
                    reporter.convert_failed(&src, &format!("delete failed: {err}"));
                }
            }
        }
    }
    Ok(summary)
}
