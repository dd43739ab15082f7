use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::api::types::{Point, Rect};
use crate::components::animation::AnimationClip;
use crate::core::area::Area2D;

/// Named regions of one texture.
///
/// ```json
/// { "texture": "ui", "regions": { "button": { "x": 0, "y": 0, "width": 64, "height": 16 } } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtlasDescriptor {
    /// Texture name as registered with the asset store.
    pub texture: String,
    /// Registers the texture with this size if it is not yet known.
    #[serde(default)]
    pub texture_size: Option<Area2D>,
    #[serde(default)]
    pub regions: HashMap<String, Rect>,
}

/// A texture cut into equally sized frames, with named clips and named
/// starting cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteSheetDescriptor {
    pub texture: String,
    #[serde(default)]
    pub texture_size: Option<Area2D>,
    pub frame_size: Area2D,
    /// Clip name → clip.
    #[serde(default)]
    pub animations: HashMap<String, AnimationClip>,
    /// Frame name → grid cell (column, row).
    #[serde(default)]
    pub frames: HashMap<String, Point>,
}

impl AtlasDescriptor {
    /// Parse a descriptor from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl SpriteSheetDescriptor {
    /// Parse a descriptor from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
