use bytemuck::{Pod, Zeroable};

use super::traits::{DrawCommand, Graphics};

/// Flattened draw command, laid out for upload as a single float buffer.
/// 19 floats = 76 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Source region; all zero with `has_source` = 0.0 means whole texture.
    pub src_x: f32,
    pub src_y: f32,
    pub src_w: f32,
    pub src_h: f32,
    pub has_source: f32,
    pub rotation: f32,
    pub origin_x: f32,
    pub origin_y: f32,
    /// Tint as normalized RGBA.
    pub tint: [f32; 4],
    /// Mirror bits (1 = horizontal, 2 = vertical).
    pub mirror: f32,
    pub texture: f32,
    /// Sort key; the host orders or depth-tests by it.
    pub layer_depth: f32,
}

impl SpriteInstance {
    pub const FLOATS: usize = 19;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

impl From<&DrawCommand> for SpriteInstance {
    fn from(cmd: &DrawCommand) -> Self {
        let src = cmd.source.unwrap_or_default();
        Self {
            x: cmd.destination.x as f32,
            y: cmd.destination.y as f32,
            width: cmd.destination.width as f32,
            height: cmd.destination.height as f32,
            src_x: src.x as f32,
            src_y: src.y as f32,
            src_w: src.width as f32,
            src_h: src.height as f32,
            has_source: if cmd.source.is_some() { 1.0 } else { 0.0 },
            rotation: cmd.rotation,
            origin_x: cmd.origin.x,
            origin_y: cmd.origin.y,
            tint: cmd.tint.to_array(),
            mirror: cmd.mirror.bits() as f32,
            texture: cmd.texture.0 as f32,
            layer_depth: cmd.layer_depth,
        }
    }
}

/// Range of instances submitted between one `begin`/`end` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchRange {
    pub start: u32,
    /// Exclusive.
    pub end: u32,
}

/// Recording graphics backend.
///
/// Collects one frame's draw commands as [`SpriteInstance`]s plus the batch
/// boundaries, ready to hand to a GPU uploader. Unbalanced scopes are
/// logged and tolerated rather than panicking mid-frame.
pub struct RenderBuffer {
    pub instances: Vec<SpriteInstance>,
    pub batches: Vec<BatchRange>,
    open: Option<u32>,
    /// Commands seen outside any batch scope this frame.
    pub stray_draws: u32,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(512)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            batches: Vec::new(),
            open: None,
            stray_draws: 0,
        }
    }

    /// Start a new frame.
    pub fn clear(&mut self) {
        if self.open.is_some() {
            log::warn!("render buffer cleared with a batch still open");
        }
        self.instances.clear();
        self.batches.clear();
        self.open = None;
        self.stray_draws = 0;
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    pub fn batch_count(&self) -> usize {
        self.batches.len()
    }

    pub fn is_batch_open(&self) -> bool {
        self.open.is_some()
    }

    /// Instance data as one flat float slice.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Graphics for RenderBuffer {
    fn begin(&mut self) {
        if self.open.is_some() {
            log::warn!("begin called while a batch is already open; ignoring");
            return;
        }
        self.open = Some(self.instance_count());
    }

    fn draw(&mut self, command: &DrawCommand) {
        if self.open.is_none() {
            self.stray_draws += 1;
            log::warn!("draw outside of a batch scope");
        }
        self.instances.push(SpriteInstance::from(command));
    }

    fn end(&mut self) {
        match self.open.take() {
            Some(start) => self.batches.push(BatchRange {
                start,
                end: self.instance_count(),
            }),
            None => log::warn!("end called without a matching begin"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{Color, Mirror, Rect};
    use crate::assets::store::TextureId;
    use glam::Vec2;

    fn command() -> DrawCommand {
        DrawCommand {
            texture: TextureId(3),
            destination: Rect::new(1, 2, 16, 16),
            source: Some(Rect::new(16, 0, 16, 16)),
            tint: Color::WHITE,
            rotation: 0.5,
            origin: Vec2::new(8.0, 8.0),
            mirror: Mirror::new(false, true),
            layer_depth: 0.25,
        }
    }

    #[test]
    fn sprite_instance_is_19_floats() {
        assert_eq!(std::mem::size_of::<SpriteInstance>(), SpriteInstance::STRIDE_BYTES);
    }

    #[test]
    fn records_batches_and_flattens() {
        let mut buf = RenderBuffer::new();
        buf.begin();
        buf.draw(&command());
        buf.draw(&command());
        buf.end();
        buf.begin();
        buf.draw(&command());
        buf.end();

        assert_eq!(buf.batches, vec![BatchRange { start: 0, end: 2 }, BatchRange { start: 2, end: 3 }]);
        assert_eq!(buf.as_floats().len(), 3 * SpriteInstance::FLOATS);
        let inst = buf.instances[0];
        assert_eq!(inst.src_x, 16.0);
        assert_eq!(inst.has_source, 1.0);
        assert_eq!(inst.mirror, 2.0);
        assert_eq!(inst.texture, 3.0);
        assert_eq!(inst.layer_depth, 0.25);
    }

    #[test]
    fn layer_depth_survives_flattening() {
        let front = SpriteInstance::from(&command());
        let back = SpriteInstance::from(&DrawCommand {
            layer_depth: 0.9,
            ..command()
        });
        assert_ne!(front, back);
        assert_eq!(back.layer_depth, 0.9);
        assert_eq!(bytemuck::cast_slice::<SpriteInstance, f32>(&[back])[18], 0.9);
    }

    #[test]
    fn nested_begin_is_ignored() {
        let mut buf = RenderBuffer::new();
        buf.begin();
        buf.draw(&command());
        buf.begin();
        buf.draw(&command());
        buf.end();
        assert_eq!(buf.batch_count(), 1);
        assert_eq!(buf.batches[0], BatchRange { start: 0, end: 2 });
        assert!(!buf.is_batch_open());
    }

    #[test]
    fn stray_draws_are_counted() {
        let mut buf = RenderBuffer::new();
        buf.draw(&command());
        buf.end();
        assert_eq!(buf.stray_draws, 1);
        buf.clear();
        assert_eq!(buf.stray_draws, 0);
        assert_eq!(buf.instance_count(), 0);
    }
}
