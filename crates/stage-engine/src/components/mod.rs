// components/mod.rs
//
// Render nodes and the components that can be attached to a GameObject.
// Sprite and AnimatedSprite work both ways: as a tree node or as a component.

pub mod animated_sprite;
pub mod animation;
pub mod container;
pub mod game_object;
pub mod iconset;
pub mod registry;
pub mod sprite;
