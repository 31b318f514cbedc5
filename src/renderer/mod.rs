//! Render boundary
//!
//! The simulation hands out `FrameSnapshot`s; a `Renderer` draws them. Drawing
//! never feeds back into the simulation.

pub mod json;
pub mod snapshot;

pub use json::JsonLinesRenderer;
pub use snapshot::{FrameSnapshot, Hud, Sprite, SpriteKind, snapshot};

/// A drawing backend
pub trait Renderer {
    fn draw(&mut self, frame: &FrameSnapshot);
}

/// Renderer that draws nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw(&mut self, _frame: &FrameSnapshot) {}
}
