//! Rendering module
//!
//! Entities draw through the [`Screen`] blit primitive. [`SpriteBatch`] turns
//! blits into coloured quads in game pixels, which [`RenderState`] draws with
//! WebGPU.

pub mod pipeline;
pub mod screen;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, View};
pub use screen::{Anchor, Blit, Screen, Sprite, SpriteBatch};
pub use vertex::Vertex;
