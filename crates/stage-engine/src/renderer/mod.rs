pub mod instance;
pub mod traits;

pub use instance::{BatchRange, RenderBuffer, SpriteInstance};
pub use traits::{DrawCommand, DrawTarget, Graphics};
