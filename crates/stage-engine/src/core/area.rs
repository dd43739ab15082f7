use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An extent without a position: integer width and height.
///
/// Arithmetic is component-wise. Division follows integer semantics and
/// panics on a zero divisor component, like `i32` division; use
/// [`Area2D::checked_div`] when the divisor may be zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Area2D {
    pub width: i32,
    pub height: i32,
}

impl Area2D {
    pub const ZERO: Self = Self::new(0, 0);

    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Square area with both sides equal to `value`.
    pub const fn splat(value: i32) -> Self {
        Self::new(value, value)
    }

    pub fn checked_div(self, divisor: Self) -> Option<Self> {
        Some(Self::new(
            self.width.checked_div(divisor.width)?,
            self.height.checked_div(divisor.height)?,
        ))
    }

    /// Scale by a float factor per axis. Negative factors use their magnitude
    /// and the result is truncated toward zero.
    pub fn scaled(self, scale: Vec2) -> Self {
        Self::new(
            (scale.x.abs() * self.width as f32) as i32,
            (scale.y.abs() * self.height as f32) as i32,
        )
    }

    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

impl Add for Area2D {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.width + rhs.width, self.height + rhs.height)
    }
}

impl Sub for Area2D {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.width - rhs.width, self.height - rhs.height)
    }
}

impl Mul for Area2D {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self::new(self.width * rhs.width, self.height * rhs.height)
    }
}

impl Div for Area2D {
    type Output = Self;
    fn div(self, rhs: Self) -> Self {
        Self::new(self.width / rhs.width, self.height / rhs.height)
    }
}

impl From<(i32, i32)> for Area2D {
    fn from((width, height): (i32, i32)) -> Self {
        Self::new(width, height)
    }
}

impl From<Area2D> for (i32, i32) {
    fn from(area: Area2D) -> Self {
        (area.width, area.height)
    }
}

impl fmt::Display for Area2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{Width:{} Height:{}}}", self.width, self.height)
    }
}
