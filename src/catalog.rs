//! Static prompt tables for every generated asset family.
//!
//! Path templates contain one `{}` for the variation index, prompt templates
//! contain one `{}` for the [`STYLE`](crate::constants::STYLE) suffix.

/// A family of generated images sharing one prompt.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Category {
    /// Output path relative to the output root, `{}` is the variation index
    pub path_template: &'static str,
    /// Prompt text, `{}` is the style suffix
    pub prompt_template: &'static str,
}

const fn category(path_template: &'static str, prompt_template: &'static str) -> Category {
    Category {
        path_template,
        prompt_template,
    }
}

/// Ground tiles.
pub static TILE_CATEGORIES: &[Category] = &[
    category(
        "tiles/asphalt_{}.png",
        "Top-down city asphalt road background tile with subtle worn grid lines and faint road speckles, {}",
    ),
    category(
        "tiles/concrete_{}.png",
        "Top-down concrete pavement sidewalk tile with mild texture, {}, seamless",
    ),
    category(
        "tiles/grass_{}.png",
        "Top-down park grass background tile with a few scattered bushes, {}, seamless",
    ),
    category(
        "tiles/building_wall_{}.png",
        "Top-down compatible building wall texture (flat facade pattern usable as tile), clean stucco or brick, {}, seamless",
    ),
    category(
        "tiles/bush_{}.png",
        "Top-down bush cluster patch with soft edges, transparent background, {}",
    ),
];

/// One-off player sprites; the path has no index.
pub static PLAYER_CATEGORIES: &[Category] = &[category(
    "player/hole_decal.png",
    "Top-down black circular hole decal with soft, subtle outer ring, transparent background, {}",
)];

/// Trash categories as `(key, prompt template)`; paths are `trash/<key>/<key>_<i>.png`.
pub static TRASH_CATEGORIES: &[(&str, &str)] = &[
    (
        "bottles",
        "Assorted plastic bottles (small), top-down small sprite, transparent background, {}",
    ),
    (
        "cans",
        "Assorted soda cans (small), top-down small sprite, transparent background, {}",
    ),
    (
        "newspapers",
        "Folded newspapers (small stacks), top-down small sprite, transparent background, {}",
    ),
    (
        "plastic_bags",
        "Crumpled plastic grocery bags, top-down small sprite, transparent background, {}",
    ),
    (
        "coffee_cups",
        "Disposable coffee cups with lids, top-down small sprite, transparent background, {}",
    ),
    (
        "food_wrappers",
        "Candy/chip food wrappers, top-down small sprite, transparent background, {}",
    ),
    (
        "fruit_peels",
        "Banana/orange fruit peels, top-down small sprite, transparent background, {}",
    ),
];

/// Building facades usable as tiled materials on boxes.
pub static BUILDING_CATEGORIES: &[Category] = &[
    category(
        "tiles/buildings/glass/glass_{}.png",
        "Seamless modern skyscraper glass facade tile, reflective blue glass windows grid, minimal mullions, {}, seamless, bright, readable",
    ),
    category(
        "tiles/buildings/metal/metal_{}.png",
        "Seamless skyscraper metal facade tile, brushed aluminum/steel panels with vertical lines and window strips, {}, seamless, bright, readable",
    ),
    category(
        "tiles/buildings/brick/brick_{}.png",
        "Seamless brick office facade tile with evenly spaced windows, red/brown brick, {}, seamless, readable",
    ),
    category(
        "tiles/buildings/stucco/stucco_{}.png",
        "Seamless stucco apartment facade tile with simple window pattern, light pastel stucco, {}, seamless, readable",
    ),
    category(
        "tiles/buildings/house_paint/house_paint_{}.png",
        "Seamless painted house siding facade tile with windows and trim, bright cheerful colors (teal, yellow, mint, coral), {}, seamless, readable",
    ),
];

/// The leaky faucet interactable.
pub static FAUCET: Category = category(
    "assets/interactables/faucet.png",
    "A simple, cartoonish leaky faucet, top-down view, with a water drop falling from it. Transparent background. {}",
);

/// Gameplay metadata for a trash category: `(key, base size, bin key)`.
pub static TRASH_META: &[(&str, f32, &str)] = &[
    ("bottles", 0.7, "bottles"),
    ("cans", 0.6, "bottles"),
    ("newspapers", 0.9, "paper"),
    ("plastic_bags", 1.0, "trash"),
    ("coffee_cups", 0.7, "trash"),
    ("food_wrappers", 0.8, "trash"),
    ("fruit_peels", 0.5, "compost"),
];

/// Replaces the first `{}` in `template` with `value`.
pub fn fill(template: &str, value: &str) -> String {
    template.replacen("{}", value, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_template_has_one_placeholder() {
        for cat in TILE_CATEGORIES.iter().chain(BUILDING_CATEGORIES) {
            assert_eq!(cat.path_template.matches("{}").count(), 1);
            assert_eq!(cat.prompt_template.matches("{}").count(), 1);
        }
        for (_, prompt) in TRASH_CATEGORIES {
            assert_eq!(prompt.matches("{}").count(), 1);
        }
        assert_eq!(PLAYER_CATEGORIES[0].path_template.matches("{}").count(), 0);
    }

    #[test]
    fn trash_meta_covers_trash_categories() {
        let keys: Vec<&str> = TRASH_CATEGORIES.iter().map(|(key, _)| *key).collect();
        let meta: Vec<&str> = TRASH_META.iter().map(|(key, _, _)| *key).collect();
        assert_eq!(keys, meta);
    }

    #[test]
    fn fill_replaces_first_placeholder_only() {
        assert_eq!(fill("a_{}.png", "3"), "a_3.png");
        assert_eq!(fill("{} and {}", "x"), "x and {}");
    }
}
