//! Shared constants/setters for things
//!

use std::time::Duration;

/// Style suffix appended to every generation prompt.
pub const STYLE: &str = "bright flat 2D cartoon, bold outlines, kid-friendly, no humans";

/// Images API generation endpoint.
pub const IMAGES_ENDPOINT: &str = "https://api.openai.com/v1/images/generations";

/// Environment variable holding the API credential.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Size requested for every generated image.
pub const DEFAULT_IMAGE_SIZE: &str = "1024x1024";

/// User agent for the tile/trash generator.
pub const ASSET_GEN_USER_AGENT: &str = "recyclehole-asset-gen/1.0";

/// User agent for the building facade generator.
pub const BUILDING_GEN_USER_AGENT: &str = "recyclehole-building-gen/1.0";

/// Unit of the exponential backoff between retries.
pub const BACKOFF_UNIT: Duration = Duration::from_secs(1);

/// Libwebp effort level (0 = fast, 6 = slowest/smallest).
pub const WEBP_METHOD: i32 = 6;
