use glam::Vec2;

use crate::api::types::{Color, Mirror, Rect};
use crate::assets::store::{TextureHandle, TextureId};
use crate::components::registry::Component;
use crate::core::area::Area2D;
use crate::core::node::RenderNode;
use crate::renderer::traits::{DrawCommand, DrawTarget};

/// A textured quad: texture reference, source region and transform.
///
/// Usable both as a tree node and as a component of a game object.
#[derive(Debug, Clone)]
pub struct Sprite {
    /// Released on dispose. The texture itself belongs to the asset store.
    texture: Option<TextureHandle>,
    /// Region of the texture to draw. `None` = whole texture.
    region: Option<Rect>,
    position: Vec2,
    scale: Vec2,
    /// Rotation in radians.
    rotation: f32,
    anchor: Vec2,
    mirror: Mirror,
    tint: Color,
    /// Percent, 0..=100.
    opacity: u8,
    layer_depth: f32,
    enabled: bool,
    pub name: String,
}

impl Sprite {
    pub fn new(texture: TextureHandle) -> Self {
        Self {
            texture: Some(texture),
            region: None,
            position: Vec2::ZERO,
            scale: Vec2::ONE,
            rotation: 0.0,
            anchor: Vec2::ZERO,
            mirror: Mirror::NONE,
            tint: Color::WHITE,
            opacity: 100,
            layer_depth: 0.0,
            enabled: true,
            name: String::new(),
        }
    }

    /// Sprite drawing only `region` of `texture`.
    pub fn from_region(texture: TextureHandle, region: Rect) -> Self {
        Self::new(texture).with_region(region)
    }

    // -- Builder pattern --

    pub fn with_region(mut self, region: Rect) -> Self {
        self.region = Some(region);
        self
    }

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_anchor(mut self, anchor: Vec2) -> Self {
        self.set_anchor(anchor);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    // -- Accessors --

    pub fn texture(&self) -> Option<&TextureHandle> {
        self.texture.as_ref()
    }

    pub fn region(&self) -> Option<Rect> {
        self.region
    }

    pub fn set_region(&mut self, region: Option<Rect>) {
        self.region = region;
    }

    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: Vec2) {
        self.scale = scale;
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn set_rotation(&mut self, radians: f32) {
        self.rotation = radians;
    }

    pub fn anchor(&self) -> Vec2 {
        self.anchor
    }

    /// Clamped to [0, 1] on both axes.
    pub fn set_anchor(&mut self, anchor: Vec2) {
        self.anchor = anchor.clamp(Vec2::ZERO, Vec2::ONE);
    }

    pub fn mirror(&self) -> Mirror {
        self.mirror
    }

    pub fn flip(&mut self, horizontal: bool, vertical: bool) {
        self.mirror = Mirror::new(horizontal, vertical);
    }

    pub fn tint(&self) -> Color {
        self.tint
    }

    pub fn set_tint(&mut self, tint: Color) {
        self.tint = tint;
    }

    pub fn opacity(&self) -> u8 {
        self.opacity
    }

    /// Percent; values above 100 clamp to 100.
    pub fn set_opacity(&mut self, percent: u8) {
        self.opacity = percent.min(100);
    }

    pub fn layer_depth(&self) -> f32 {
        self.layer_depth
    }

    pub fn set_layer_depth(&mut self, depth: f32) {
        self.layer_depth = depth;
    }

    /// Unscaled extent of what is drawn: the region, or the whole texture.
    pub fn source_size(&self) -> Area2D {
        match (self.region, &self.texture) {
            (Some(region), _) => region.size(),
            (None, Some(texture)) => texture.size(),
            (None, None) => Area2D::ZERO,
        }
    }

    /// On-screen rectangle.
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.position, self.size())
    }

    /// Rotation/scale origin in source pixels.
    pub fn origin(&self) -> Vec2 {
        self.source_size().to_vec2() * self.anchor
    }

    /// Tint with opacity applied.
    pub fn draw_color(&self) -> Color {
        self.tint.faded(self.opacity as f32 / 100.0)
    }

    /// Whether dispose has released the texture reference.
    pub fn is_disposed(&self) -> bool {
        self.texture.is_none()
    }

    /// Describe this sprite for the graphics collaborator.
    /// `None` once disposed.
    pub fn draw_command(&self) -> Option<DrawCommand> {
        let texture: TextureId = self.texture.as_ref()?.id();
        Some(DrawCommand {
            texture,
            destination: self.rect(),
            source: self.region,
            tint: self.draw_color(),
            rotation: self.rotation,
            origin: self.origin(),
            mirror: self.mirror,
            layer_depth: self.layer_depth,
        })
    }

    fn release(&mut self) {
        if let Some(texture) = self.texture.take() {
            log::debug!("sprite `{}` released texture `{}`", self.name, texture.name());
        }
    }
}

impl RenderNode for Sprite {
    fn enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn position(&self) -> Vec2 {
        self.position
    }

    fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    fn size(&self) -> Area2D {
        self.source_size().scaled(self.scale)
    }

    fn draw(&self, target: &mut DrawTarget<'_>) {
        if let Some(command) = self.draw_command() {
            target.submit(command);
        }
    }

    fn dispose(&mut self) {
        self.release();
    }
}

impl Component for Sprite {
    fn enabled(&self) -> bool {
        self.enabled
    }

    fn draw(&self, target: &mut DrawTarget<'_>) {
        RenderNode::draw(self, target);
    }

    fn dispose(&mut self) {
        self.release();
    }

    fn owner_moved(&mut self, position: Vec2) {
        self.position = position;
    }

    fn owner_depth_changed(&mut self, depth: f32) {
        self.layer_depth = depth;
    }
}
