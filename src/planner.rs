//! Expands the prompt tables into an ordered task list.

use std::path::PathBuf;

use crate::catalog::{self, Category};
use crate::constants::STYLE;

/// One planned (output path, prompt) unit of work.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Task {
    /// Output path relative to the output root
    pub rel_path: PathBuf,
    /// Full prompt text, style already applied
    pub prompt: String,
}

impl Task {
    fn new(rel_path: impl Into<PathBuf>, prompt: String) -> Self {
        Self {
            rel_path: rel_path.into(),
            prompt,
        }
    }
}

/// Clamps a requested count into `[min, max]`, never below one.
///
/// When `min > max` the lower bound wins.
pub fn clamp_count(requested: u32, min: u32, max: u32) -> u32 {
    min.max(max.min(requested)).max(1)
}

/// Appends `count` indexed variations of every category.
fn push_variations(tasks: &mut Vec<Task>, categories: &[Category], count: u32) {
    for cat in categories {
        let prompt = catalog::fill(cat.prompt_template, STYLE);
        for i in 0..count.max(1) {
            tasks.push(Task::new(
                catalog::fill(cat.path_template, &i.to_string()),
                prompt.clone(),
            ));
        }
    }
}

/// Variation counts for the tile/player/trash generator.
#[derive(Clone, Copy, Debug)]
pub struct AssetCounts {
    /// Variations per tile type
    pub tile_variations: u32,
    /// Requested variations per trash category, before clamping
    pub trash_requested: u32,
    /// Lower trash bound
    pub trash_min: u32,
    /// Upper trash bound
    pub trash_max: u32,
}

impl AssetCounts {
    /// Variations actually generated per trash category.
    pub fn trash_count(&self) -> u32 {
        clamp_count(self.trash_requested, self.trash_min, self.trash_max)
    }
}

/// Tiles, then the player decal, then every trash category.
pub fn plan_assets(counts: &AssetCounts) -> Vec<Task> {
    let mut tasks = Vec::new();
    push_variations(&mut tasks, catalog::TILE_CATEGORIES, counts.tile_variations);

    for cat in catalog::PLAYER_CATEGORIES {
        tasks.push(Task::new(
            cat.path_template,
            catalog::fill(cat.prompt_template, STYLE),
        ));
    }

    let trash_count = counts.trash_count();
    for (key, prompt_template) in catalog::TRASH_CATEGORIES {
        let prompt = catalog::fill(prompt_template, STYLE);
        for i in 0..trash_count {
            tasks.push(Task::new(
                PathBuf::from("trash").join(key).join(format!("{key}_{i}.png")),
                prompt.clone(),
            ));
        }
    }
    tasks
}

/// `count` facade variations per building material.
pub fn plan_buildings(count: u32) -> Vec<Task> {
    let mut tasks = Vec::new();
    push_variations(&mut tasks, catalog::BUILDING_CATEGORIES, count);
    tasks
}

/// The single faucet task.
pub fn plan_faucet() -> Vec<Task> {
    vec![Task::new(
        catalog::FAUCET.path_template,
        catalog::fill(catalog::FAUCET.prompt_template, STYLE),
    )]
}
