use glam::Vec2;

use crate::api::types::Rect;
use crate::assets::store::TextureHandle;
use crate::components::sprite::Sprite;
use crate::core::area::Area2D;
use crate::core::node::RenderNode;
use crate::renderer::traits::DrawTarget;

/// A sheet of equally sized icons; draws the one at `index`.
///
/// Icons are numbered row-major across the sheet's columns.
#[derive(Debug, Clone)]
pub struct Iconset {
    sprite: Sprite,
    icon_size: Area2D,
    columns: i32,
    index: u32,
}

impl Iconset {
    pub fn new(texture: TextureHandle, icon_size: Area2D) -> Self {
        let columns = texture
            .size()
            .checked_div(icon_size)
            .map(|grid| grid.width.max(1))
            .unwrap_or(1);
        let mut iconset = Self {
            sprite: Sprite::new(texture),
            icon_size,
            columns,
            index: 0,
        };
        iconset.sprite.set_region(Some(iconset.region()));
        iconset
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn set_index(&mut self, index: u32) {
        self.index = index;
        self.sprite.set_region(Some(self.region()));
    }

    pub fn icon_size(&self) -> Area2D {
        self.icon_size
    }

    pub fn sprite_mut(&mut self) -> &mut Sprite {
        &mut self.sprite
    }

    /// Source region of the current icon.
    pub fn region(&self) -> Rect {
        let index = self.index as i32;
        Rect::new(
            (index % self.columns) * self.icon_size.width,
            (index / self.columns) * self.icon_size.height,
            self.icon_size.width,
            self.icon_size.height,
        )
    }
}

impl RenderNode for Iconset {
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

    fn size(&self) -> Area2D {
        self.sprite.size()
    }

    fn draw(&self, target: &mut DrawTarget<'_>) {
        RenderNode::draw(&self.sprite, target);
    }

    fn dispose(&mut self) {
        RenderNode::dispose(&mut self.sprite);
    }
}
