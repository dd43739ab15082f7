use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::area::Area2D;

/// Handle to a node inside one [`RenderTree`](crate::core::tree::RenderTree).
/// Only meaningful for the tree that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// Integer grid point, used for sprite sheet cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned integer rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle at `pos` (truncated to whole pixels) with the given extent.
    pub fn from_pos_size(pos: Vec2, size: Area2D) -> Self {
        Self::new(pos.x as i32, pos.y as i32, size.width, size.height)
    }

    pub fn size(&self) -> Area2D {
        Area2D::new(self.width, self.height)
    }

    pub fn translated(self, offset: Vec2) -> Self {
        Self {
            x: self.x + offset.x as i32,
            y: self.y + offset.y as i32,
            ..self
        }
    }
}

/// 8-bit RGBA tint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Multiply every channel (alpha included) by `factor`, clamped to 0..=1.
    /// Matches premultiplied-alpha fading.
    pub fn faded(self, factor: f32) -> Self {
        let f = factor.clamp(0.0, 1.0);
        let scale = |c: u8| (c as f32 * f).round() as u8;
        Self::rgba(scale(self.r), scale(self.g), scale(self.b), scale(self.a))
    }

    pub fn to_array(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Mirror flags applied when drawing a sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Mirror {
    pub horizontal: bool,
    pub vertical: bool,
}

impl Mirror {
    pub const NONE: Self = Self { horizontal: false, vertical: false };

    pub const fn new(horizontal: bool, vertical: bool) -> Self {
        Self { horizontal, vertical }
    }

    /// Bit 0 = horizontal, bit 1 = vertical.
    pub fn bits(self) -> u32 {
        (self.horizontal as u32) | ((self.vertical as u32) << 1)
    }
}
