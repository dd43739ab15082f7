use std::collections::HashMap;
use std::path::Path;

use crate::api::types::{Point, Rect};
use crate::assets::manifest::{AtlasDescriptor, SpriteSheetDescriptor};
use crate::assets::store::{AssetStore, TextureHandle};
use crate::components::animated_sprite::AnimatedSprite;
use crate::components::animation::{AnimationClip, SubscribePolicy};
use crate::components::sprite::Sprite;
use crate::core::area::Area2D;
use crate::error::{AssetError, StageError};

/// Named regions of one shared texture.
#[derive(Debug, Clone)]
pub struct TextureAtlas {
    texture: TextureHandle,
    regions: HashMap<String, Rect>,
}

impl TextureAtlas {
    pub fn new(texture: TextureHandle) -> Self {
        Self {
            texture,
            regions: HashMap::new(),
        }
    }

    /// Resolve the descriptor's texture against `store`.
    pub fn from_descriptor(store: &mut AssetStore, desc: AtlasDescriptor) -> Result<Self, AssetError> {
        let texture = resolve_texture(store, &desc.texture, desc.texture_size)?;
        Ok(Self {
            texture,
            regions: desc.regions,
        })
    }

    pub fn texture(&self) -> &TextureHandle {
        &self.texture
    }

    pub fn get(&self, key: &str) -> Result<Rect, AssetError> {
        self.regions
            .get(key)
            .copied()
            .ok_or_else(|| AssetError::RegionNotFound(key.to_string()))
    }

    /// Add or overwrite a region.
    pub fn set(&mut self, key: impl Into<String>, region: Rect) {
        self.regions.insert(key.into(), region);
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Sprite showing the region `key`.
    pub fn sprite(&self, key: &str) -> Result<Sprite, AssetError> {
        let region = self.get(key)?;
        Ok(Sprite::from_region(self.texture.clone(), region).with_name(key))
    }
}

/// A texture divided into `frame_size` cells, with named clips and named
/// resting cells.
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    texture: TextureHandle,
    frame_size: Area2D,
    animations: HashMap<String, AnimationClip>,
    frames: HashMap<String, Point>,
}

impl SpriteSheet {
    pub fn from_descriptor(store: &mut AssetStore, desc: SpriteSheetDescriptor) -> Result<Self, AssetError> {
        let texture = resolve_texture(store, &desc.texture, desc.texture_size)?;
        Ok(Self {
            texture,
            frame_size: desc.frame_size,
            animations: desc.animations,
            frames: desc.frames,
        })
    }

    pub fn texture(&self) -> &TextureHandle {
        &self.texture
    }

    pub fn frame_size(&self) -> Area2D {
        self.frame_size
    }

    pub fn clip(&self, name: &str) -> Option<&AnimationClip> {
        self.animations.get(name)
    }

    pub fn frame(&self, name: &str) -> Result<Point, AssetError> {
        self.frames
            .get(name)
            .copied()
            .ok_or_else(|| AssetError::FrameNotFound(name.to_string()))
    }

    /// Animated sprite resting on the frame `first_frame`, with every clip of
    /// the sheet declared.
    pub fn animated_sprite(&self, first_frame: &str, policy: SubscribePolicy) -> Result<AnimatedSprite, StageError> {
        let cell = self.frame(first_frame)?;
        let mut sprite = AnimatedSprite::with_policy(self.texture.clone(), self.frame_size, cell, policy);
        // Sorted so a bad clip reports the same name on every run.
        let mut names: Vec<&String> = self.animations.keys().collect();
        names.sort();
        for name in names {
            sprite.declare_clip(name.as_str(), self.animations[name])?;
        }
        Ok(sprite)
    }
}

fn resolve_texture(store: &mut AssetStore, name: &str, size: Option<Area2D>) -> Result<TextureHandle, AssetError> {
    match size {
        Some(size) => Ok(store.register_texture(name, size)),
        None => store.texture(name),
    }
}

impl AssetStore {
    /// Load an atlas descriptor relative to the content root.
    pub fn load_atlas(&mut self, path: impl AsRef<Path>) -> Result<TextureAtlas, AssetError> {
        let desc: AtlasDescriptor = self.load_json(path)?;
        TextureAtlas::from_descriptor(self, desc)
    }

    /// Load a spritesheet descriptor relative to the content root.
    pub fn load_spritesheet(&mut self, path: impl AsRef<Path>) -> Result<SpriteSheet, AssetError> {
        let desc: SpriteSheetDescriptor = self.load_json(path)?;
        SpriteSheet::from_descriptor(self, desc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::node::RenderNode;
    use crate::error::AnimationError;
    use std::fs;

    fn sheet_json() -> &'static str {
        r#"{
            "texture": "hero",
            "texture_size": { "width": 128, "height": 64 },
            "frame_size": { "width": 16, "height": 16 },
            "animations": {
                "walk": { "row": 1, "column": 0, "frame_count": 4, "frame_rate": 8, "loop": true },
                "attack": { "row": 2, "column": 0, "frame_count": 3, "frame_rate": 10 }
            },
            "frames": { "idle": { "x": 2, "y": 0 } }
        }"#
    }

    #[test]
    fn atlas_lookup_and_overwrite() {
        let mut store = AssetStore::default();
        store.register_texture("ui", Area2D::new(256, 256));
        let desc = AtlasDescriptor::from_json(
            r#"{ "texture": "ui", "regions": { "ok": { "x": 0, "y": 0, "width": 32, "height": 8 } } }"#,
        )
        .unwrap();
        let mut atlas = TextureAtlas::from_descriptor(&mut store, desc).unwrap();

        assert_eq!(atlas.get("ok").unwrap(), Rect::new(0, 0, 32, 8));
        assert!(matches!(atlas.get("cancel"), Err(AssetError::RegionNotFound(k)) if k == "cancel"));

        atlas.set("ok", Rect::new(8, 8, 16, 16));
        assert_eq!(atlas.get("ok").unwrap(), Rect::new(8, 8, 16, 16));
        assert_eq!(atlas.len(), 1);

        let sprite = atlas.sprite("ok").unwrap();
        assert_eq!(sprite.name, "ok");
        assert_eq!(sprite.size(), Area2D::splat(16));
        assert_eq!(store.users("ui"), Some(2));
    }

    #[test]
    fn atlas_needs_a_known_texture() {
        let mut store = AssetStore::default();
        let desc = AtlasDescriptor::from_json(r#"{ "texture": "nowhere" }"#).unwrap();
        assert!(matches!(
            TextureAtlas::from_descriptor(&mut store, desc),
            Err(AssetError::TextureNotFound(_))
        ));
    }

    #[test]
    fn spritesheet_builds_ready_sprites() {
        let mut store = AssetStore::default();
        let desc = SpriteSheetDescriptor::from_json(sheet_json()).unwrap();
        let sheet = SpriteSheet::from_descriptor(&mut store, desc).unwrap();

        let mut hero = sheet.animated_sprite("idle", SubscribePolicy::Passive).unwrap();
        assert_eq!(hero.source_rect(), Rect::new(32, 0, 16, 16));
        assert!(hero.player().has_clip("walk"));
        assert!(hero.player().has_clip("attack"));

        hero.play("attack").unwrap();
        assert_eq!(hero.source_rect(), Rect::new(0, 32, 16, 16));
        assert!(matches!(
            sheet.animated_sprite("jump", SubscribePolicy::Passive),
            Err(StageError::Asset(AssetError::FrameNotFound(_)))
        ));
    }

    #[test]
    fn spritesheet_rejects_invalid_clip() {
        let mut store = AssetStore::default();
        let mut desc = SpriteSheetDescriptor::from_json(sheet_json()).unwrap();
        desc.animations.insert("broken".into(), AnimationClip::new(0, 0, 0, 8));
        let sheet = SpriteSheet::from_descriptor(&mut store, desc).unwrap();
        assert!(matches!(
            sheet.animated_sprite("idle", SubscribePolicy::Passive),
            Err(StageError::Animation(AnimationError::InvalidClip { .. }))
        ));
    }

    #[test]
    fn store_loads_descriptors_from_disk() {
        let dir = std::env::temp_dir().join(format!("stage-engine-atlas-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("hero.json"), sheet_json()).unwrap();
        fs::write(
            dir.join("ui.json"),
            r#"{ "texture": "ui", "texture_size": { "width": 64, "height": 64 }, "regions": {} }"#,
        )
        .unwrap();

        let mut store = AssetStore::new(&dir);
        let sheet = store.load_spritesheet("hero.json").unwrap();
        assert_eq!(sheet.frame_size(), Area2D::splat(16));
        assert_eq!(sheet.clip("walk").map(|c| c.frame_count), Some(4));
        let atlas = store.load_atlas("ui.json").unwrap();
        assert!(atlas.is_empty());
        assert_eq!(store.texture_count(), 2);
        assert!(matches!(store.load_atlas("missing.json"), Err(AssetError::Io { .. })));

        fs::remove_dir_all(&dir).unwrap();
    }
}
