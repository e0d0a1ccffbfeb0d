//! Shared entity capabilities and the events entities raise

use crate::renderer::Screen;

/// Anything that paints itself onto the screen
pub trait Drawable {
    fn draw(&self, screen: &mut dyn Screen);
}

/// What an interaction with a foreground entity turned out to be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    Consume,
}

/// Side effects raised during a tick, drained by the front-end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A Mac took its first bite of a grass tuft
    Bite { player: u32 },
}

/// Draw a whole layer in order
pub fn draw_layer<T: Drawable>(layer: &[T], screen: &mut dyn Screen) {
    for entity in layer {
        entity.draw(screen);
    }
}
