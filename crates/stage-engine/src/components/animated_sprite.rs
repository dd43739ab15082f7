use glam::Vec2;

use crate::api::types::{Point, Rect};
use crate::assets::store::TextureHandle;
use crate::components::animation::{
    AnimationClip, AnimationPlayer, CompletionHandler, PlaybackState, SubscribePolicy,
};
use crate::components::registry::Component;
use crate::components::sprite::Sprite;
use crate::core::area::Area2D;
use crate::core::node::RenderNode;
use crate::error::AnimationError;
use crate::renderer::traits::DrawTarget;

/// Sprite whose source region follows an [`AnimationPlayer`] over a grid of
/// `frame_size` cells.
#[derive(Debug)]
pub struct AnimatedSprite {
    sprite: Sprite,
    frame_size: Area2D,
    /// Shown while no clip is active.
    rest_frame: Rect,
    player: AnimationPlayer,
}

impl AnimatedSprite {
    /// Sprite resting on grid cell `first_frame` (column, row).
    pub fn new(texture: TextureHandle, frame_size: Area2D, first_frame: Point) -> Self {
        Self::with_policy(texture, frame_size, first_frame, SubscribePolicy::default())
    }

    pub fn with_policy(
        texture: TextureHandle,
        frame_size: Area2D,
        first_frame: Point,
        policy: SubscribePolicy,
    ) -> Self {
        let rest_frame = Rect::new(
            frame_size.width * first_frame.x,
            frame_size.height * first_frame.y,
            frame_size.width,
            frame_size.height,
        );
        Self {
            sprite: Sprite::from_region(texture, rest_frame),
            frame_size,
            rest_frame,
            player: AnimationPlayer::new(policy),
        }
    }

    pub fn frame_size(&self) -> Area2D {
        self.frame_size
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    /// Transform and tint. The region is owned by the animation.
    pub fn sprite_mut(&mut self) -> &mut Sprite {
        &mut self.sprite
    }

    pub fn player(&self) -> &AnimationPlayer {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut AnimationPlayer {
        &mut self.player
    }

    pub fn source_rect(&self) -> Rect {
        self.sprite.region().unwrap_or(self.rest_frame)
    }

    // -- Animation passthrough --

    pub fn declare_clip(&mut self, name: impl Into<String>, clip: AnimationClip) -> Result<(), AnimationError> {
        self.player.declare_clip(name, clip)
    }

    pub fn play(&mut self, name: &str) -> Result<&mut Self, AnimationError> {
        self.player.play(name)?;
        self.sync_region();
        Ok(self)
    }

    pub fn stop(&mut self, force_complete: bool) {
        self.player.stop(force_complete);
        self.sync_region();
    }

    pub fn resume(&mut self) {
        self.player.resume();
    }

    pub fn on_completed(&mut self, handler: &CompletionHandler) -> &mut Self {
        self.player.on_completed(handler);
        self.sync_region();
        self
    }

    pub fn off_completed(&mut self, handler: &CompletionHandler) -> bool {
        self.player.off_completed(handler)
    }

    pub fn is_playing(&self) -> bool {
        self.player.is_playing()
    }

    pub fn is_completed(&self) -> bool {
        self.player.is_completed()
    }

    pub fn state(&self) -> PlaybackState {
        self.player.state()
    }

    fn sync_region(&mut self) {
        let region = self
            .player
            .source_rect(self.frame_size)
            .unwrap_or(self.rest_frame);
        self.sprite.set_region(Some(region));
    }

    fn advance(&mut self, dt: f32) {
        self.player.update(dt);
        // Handlers may have switched clips even without a frame change.
        self.sync_region();
    }

    fn teardown(&mut self) {
        self.player.clear_handlers();
        RenderNode::dispose(&mut self.sprite);
    }
}

impl RenderNode for AnimatedSprite {
    fn enabled(&self) -> bool {
        RenderNode::enabled(&self.sprite)
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.sprite.set_enabled(enabled);
    }

    fn position(&self) -> Vec2 {
        self.sprite.position()
    }

    fn set_position(&mut self, position: Vec2) {
        self.sprite.set_position(position);
    }

    /// One frame cell, scaled.
    fn size(&self) -> Area2D {
        self.frame_size.scaled(self.sprite.scale())
    }

    fn update(&mut self, dt: f32) {
        self.advance(dt);
    }

    fn draw(&self, target: &mut DrawTarget<'_>) {
        RenderNode::draw(&self.sprite, target);
    }

    fn dispose(&mut self) {
        self.teardown();
    }
}

impl Component for AnimatedSprite {
    fn enabled(&self) -> bool {
        RenderNode::enabled(&self.sprite)
    }

    fn update(&mut self, dt: f32) {
        self.advance(dt);
    }

    fn draw(&self, target: &mut DrawTarget<'_>) {
        RenderNode::draw(&self.sprite, target);
    }

    fn dispose(&mut self) {
        self.teardown();
    }

    fn owner_moved(&mut self, position: Vec2) {
        self.sprite.set_position(position);
    }

    fn owner_depth_changed(&mut self, depth: f32) {
        self.sprite.set_layer_depth(depth);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::store::AssetStore;
    use std::cell::Cell;
    use std::rc::Rc;

    fn hero(store: &mut AssetStore) -> AnimatedSprite {
        let texture = store.register_texture("hero", Area2D::new(128, 64));
        AnimatedSprite::new(texture, Area2D::new(16, 16), Point::new(1, 2))
    }

    #[test]
    fn rests_on_first_frame() {
        let mut store = AssetStore::default();
        let sprite = hero(&mut store);
        assert_eq!(sprite.source_rect(), Rect::new(16, 32, 16, 16));
        assert_eq!(RenderNode::size(&sprite), Area2D::new(16, 16));
    }

    #[test]
    fn region_follows_playback() {
        let mut store = AssetStore::default();
        let mut sprite = hero(&mut store);
        sprite.declare_clip("walk", AnimationClip::new(1, 0, 4, 8).looped()).unwrap();
        sprite.play("walk").unwrap();
        assert_eq!(sprite.source_rect(), Rect::new(0, 16, 16, 16));

        RenderNode::update(&mut sprite, 0.125);
        assert_eq!(sprite.source_rect(), Rect::new(16, 16, 16, 16));
        RenderNode::update(&mut sprite, 0.125);
        assert_eq!(sprite.source_rect(), Rect::new(32, 16, 16, 16));
    }

    #[test]
    fn scale_changes_size_not_region() {
        let mut store = AssetStore::default();
        let mut sprite = hero(&mut store);
        sprite.sprite_mut().set_scale(Vec2::splat(3.0));
        assert_eq!(RenderNode::size(&sprite), Area2D::new(48, 48));
        assert_eq!(sprite.source_rect().size(), Area2D::new(16, 16));
    }

    #[test]
    fn dispose_tears_down_handlers_and_texture_ref() {
        let mut store = AssetStore::default();
        let mut sprite = hero(&mut store);
        let fired = Rc::new(Cell::new(0));
        let f = Rc::clone(&fired);
        let handler: CompletionHandler = Rc::new(move |_: &mut AnimationPlayer| f.set(f.get() + 1));
        sprite.on_completed(&handler);
        assert_eq!(store.users("hero"), Some(1));

        RenderNode::dispose(&mut sprite);
        assert_eq!(sprite.player().handler_count(), 0);
        assert_eq!(store.users("hero"), Some(0));

        sprite.stop(true);
        assert_eq!(fired.get(), 0);
        RenderNode::dispose(&mut sprite);
    }

    #[test]
    fn unknown_clip_surfaces_error() {
        let mut store = AssetStore::default();
        let mut sprite = hero(&mut store);
        assert!(matches!(sprite.play("fly"), Err(AnimationError::NotFound(_))));
    }
}
