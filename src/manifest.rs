//! Trash texture manifest for the game client, plus a missing-texture log.
//!
//! The game loads trash sprites from `src/modules/trash-manifest.js`; this
//! rebuilds that module from whatever is on disk under `assets/trash/`.

use std::fmt::Write as _;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::debug;

use crate::catalog::TRASH_META;
use crate::error::AssetError;

/// Manifest path relative to the project root.
pub const MANIFEST_PATH: &str = "src/modules/trash-manifest.js";

/// Log path relative to the project root.
pub const LOG_PATH: &str = "logs/missing-textures.log";

/// One manifest entry.
#[derive(Clone, Debug, PartialEq)]
pub struct TrashCategory {
    /// Category key, also the directory name
    pub key: String,
    /// Relative sprite size in game units
    pub base_size: f32,
    /// Which bin accepts this trash
    pub bin_key: String,
    /// Texture paths as the game loads them, `assets/trash/<key>/<file>`
    pub textures: Vec<String>,
}

fn is_texture(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png") || ext.eq_ignore_ascii_case("webp"))
}

/// Sorted texture paths for one category; a missing directory is empty.
pub fn list_textures(trash_dir: &Path, key: &str) -> Result<Vec<String>, AssetError> {
    let dir = trash_dir.join(key);
    let entries = match fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!("No texture directory at {}", dir.display());
            return Ok(Vec::new());
        }
        Err(err) => return Err(err.into()),
    };

    let mut textures = Vec::new();
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if is_texture(&name) {
            textures.push(format!("assets/trash/{key}/{name}"));
        }
    }
    textures.sort();
    Ok(textures)
}

/// Builds the manifest from `<project_root>/assets/trash`.
pub fn build_manifest(project_root: &Path) -> Result<Vec<TrashCategory>, AssetError> {
    let trash_dir = project_root.join("assets").join("trash");
    TRASH_META
        .iter()
        .map(|(key, base_size, bin_key)| -> Result<TrashCategory, AssetError> {
            Ok(TrashCategory {
                key: (*key).to_string(),
                base_size: *base_size,
                bin_key: (*bin_key).to_string(),
                textures: list_textures(&trash_dir, key)?,
            })
        })
        .collect()
}

/// Renders the manifest as an ES module.
pub fn serialize_manifest(categories: &[TrashCategory]) -> String {
    let mut out = String::from("export const TRASH_CATEGORIES = [\n");
    for cat in categories {
        out.push_str("  {\n");
        let _ = writeln!(out, "    key: '{}',", cat.key);
        let _ = writeln!(out, "    baseSize: {},", cat.base_size);
        let _ = writeln!(out, "    binKey: '{}',", cat.bin_key);
        out.push_str("    textures: [\n");
        for tex in &cat.textures {
            let _ = writeln!(out, "      '{tex}',");
        }
        out.push_str("    ],\n");
        out.push_str("  },\n");
    }
    out.push_str("];\n\nexport default TRASH_CATEGORIES;\n");
    out
}

/// Renders the missing-texture log.
pub fn missing_report(categories: &[TrashCategory], now: DateTime<Utc>) -> String {
    let mut lines = vec![
        format!(
            "# Missing texture check - {}",
            now.to_rfc3339_opts(SecondsFormat::Millis, true)
        ),
        String::new(),
    ];

    let mut missing = 0;
    for cat in categories.iter().filter(|cat| cat.textures.is_empty()) {
        missing += 1;
        lines.push(format!("Category: {}", cat.key));
        lines.push("  missing -> no textures listed".to_string());
        lines.push(String::new());
    }
    if missing == 0 {
        lines.push("All categories have at least one matching texture.".to_string());
        lines.push(String::new());
    }
    lines.join("\n")
}

fn write_file(path: &Path, contents: &str) -> Result<(), AssetError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    Ok(())
}

/// Scans textures, writes the log and the manifest; returns both paths.
pub fn update_manifest(project_root: &Path) -> Result<(PathBuf, PathBuf), AssetError> {
    let categories = build_manifest(project_root)?;
    let log_path = project_root.join(LOG_PATH);
    let manifest_path = project_root.join(MANIFEST_PATH);

    write_file(&log_path, &missing_report(&categories, Utc::now()))?;
    write_file(&manifest_path, &serialize_manifest(&categories))?;
    Ok((log_path, manifest_path))
}
