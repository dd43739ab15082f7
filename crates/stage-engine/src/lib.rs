pub mod api;
pub mod assets;
pub mod components;
pub mod core;
pub mod error;
pub mod renderer;

// Re-export key types at crate root for convenience
pub use api::config::StageConfig;
pub use api::stage::Stage;
pub use api::types::{Color, Mirror, NodeId, Point, Rect};
pub use assets::atlas::{SpriteSheet, TextureAtlas};
pub use assets::manifest::{AtlasDescriptor, SpriteSheetDescriptor};
pub use assets::store::{AssetStore, Texture, TextureHandle, TextureId};
pub use components::animated_sprite::AnimatedSprite;
pub use components::animation::{
    AnimationClip, AnimationPlayer, CompletionHandler, PlaybackState, SubscribePolicy,
};
pub use components::container::Container;
pub use components::game_object::GameObject;
pub use components::iconset::Iconset;
pub use components::registry::{Component, ComponentRegistry, ComponentTag};
pub use components::sprite::Sprite;
pub use crate::core::area::Area2D;
pub use crate::core::context::{SceneCommand, StageContext};
pub use crate::core::node::{AsAny, RenderNode};
pub use crate::core::scene::{Scene, ScenePhase};
pub use crate::core::stack::SceneStack;
pub use crate::core::time::FixedTimestep;
pub use crate::core::tree::RenderTree;
pub use error::{AnimationError, AssetError, StageError};
pub use renderer::instance::{BatchRange, RenderBuffer, SpriteInstance};
pub use renderer::traits::{DrawCommand, DrawTarget, Graphics};
