use std::any::Any;

use glam::Vec2;

use crate::core::area::Area2D;
use crate::renderer::traits::DrawTarget;

/// Upcast to `Any` for typed lookups through trait objects.
/// Blanket-implemented; never implement by hand.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Anything that can live in a [`RenderTree`](crate::core::tree::RenderTree).
///
/// Update, draw and dispose default to no-ops so a node only implements the
/// capabilities it has. `dispose` must be idempotent.
pub trait RenderNode: AsAny {
    fn enabled(&self) -> bool;
    fn set_enabled(&mut self, enabled: bool);

    fn position(&self) -> Vec2;
    fn set_position(&mut self, position: Vec2);

    /// Current on-screen extent; may depend on scale.
    fn size(&self) -> Area2D;

    fn update(&mut self, _dt: f32) {}

    fn draw(&self, _target: &mut DrawTarget<'_>) {}

    fn dispose(&mut self) {}

    /// Nodes flagged here are removed and disposed by their tree after the
    /// current update pass.
    fn is_destroyed(&self) -> bool {
        false
    }
}
