//! Contract with the graphics collaborator.
//!
//! The engine never rasterizes. Drawable nodes describe each sprite as a
//! [`DrawCommand`] and hand it to whatever implements [`Graphics`]; the
//! implementor owns batching state and draw-call submission.

use glam::Vec2;

use crate::api::types::{Color, Mirror, Rect};
use crate::assets::store::TextureId;

/// One textured quad for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub texture: TextureId,
    /// Where the quad lands on screen, in pixels.
    pub destination: Rect,
    /// Region of the texture to sample. `None` = whole texture.
    pub source: Option<Rect>,
    pub tint: Color,
    /// Rotation in radians around `origin`.
    pub rotation: f32,
    /// Rotation/scale origin, in source-region pixels.
    pub origin: Vec2,
    pub mirror: Mirror,
    pub layer_depth: f32,
}

/// Graphics backend. Batches are opened and closed by render trees,
/// once per tree per frame, never nested.
pub trait Graphics {
    fn begin(&mut self);
    fn draw(&mut self, command: &DrawCommand);
    fn end(&mut self);
}

/// Draw-pass handle passed down a render tree.
///
/// Carries the accumulated origin of enclosing containers so children draw
/// relative to their parent without knowing about it.
pub struct DrawTarget<'a> {
    graphics: &'a mut dyn Graphics,
    offset: Vec2,
}

impl<'a> DrawTarget<'a> {
    pub fn new(graphics: &'a mut dyn Graphics) -> Self {
        Self {
            graphics,
            offset: Vec2::ZERO,
        }
    }

    /// Accumulated parent offset applied to submitted commands.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn begin_batch(&mut self) {
        self.graphics.begin();
    }

    pub fn end_batch(&mut self) {
        self.graphics.end();
    }

    /// Submit a command, translating its destination by the current offset.
    pub fn submit(&mut self, mut command: DrawCommand) {
        command.destination = command.destination.translated(self.offset);
        self.graphics.draw(&command);
    }

    /// Run `f` with the origin moved by `delta`, restoring it afterwards.
    pub fn with_offset<R>(&mut self, delta: Vec2, f: impl FnOnce(&mut Self) -> R) -> R {
        let saved = self.offset;
        self.offset += delta;
        let result = f(self);
        self.offset = saved;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::instance::RenderBuffer;

    fn command(x: i32) -> DrawCommand {
        DrawCommand {
            texture: TextureId(1),
            destination: Rect::new(x, 0, 8, 8),
            source: None,
            tint: Color::WHITE,
            rotation: 0.0,
            origin: Vec2::ZERO,
            mirror: Mirror::NONE,
            layer_depth: 0.0,
        }
    }

    #[test]
    fn offsets_nest_and_restore() {
        let mut buffer = RenderBuffer::new();
        {
            let mut target = DrawTarget::new(&mut buffer);
            target.begin_batch();
            target.with_offset(Vec2::new(10.0, 0.0), |t| {
                t.with_offset(Vec2::new(5.0, 0.0), |t| t.submit(command(1)));
                t.submit(command(1));
            });
            target.submit(command(1));
            assert_eq!(target.offset(), Vec2::ZERO);
            target.end_batch();
        }
        let xs: Vec<f32> = buffer.instances.iter().map(|i| i.x).collect();
        assert_eq!(xs, vec![16.0, 11.0, 1.0]);
    }
}
