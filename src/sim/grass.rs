//! Grass tufts - the consumables Macs eat

use glam::Vec2;

use super::entity::{Drawable, InteractionKind};
use crate::renderer::{Anchor, Screen, Sprite};

/// Grass lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrassState {
    /// Untouched
    Exists,
    /// Being eaten, `remaining` ticks until it disappears
    Consuming { remaining: u32 },
    /// Gone; pruned by the world at the end of the tick
    Removed,
}

/// A grass tuft occupying one cell
#[derive(Debug, Clone, PartialEq)]
pub struct Grass {
    pub id: u32,
    pub pos: Vec2,
    pub state: GrassState,
    /// Half the tile size; the interaction box extends this far on each axis
    half_extent: f32,
    /// Ticks a bite lasts
    consume_duration: u32,
}

impl Grass {
    pub fn new(id: u32, pos: Vec2, tile_size: u32, consume_duration: u32) -> Self {
        Self {
            id,
            pos,
            state: GrassState::Exists,
            half_extent: tile_size as f32 / 2.0,
            consume_duration,
        }
    }

    /// True iff `target` lies inside this tuft's cell box
    pub fn detect_interaction(&self, target: Vec2) -> bool {
        let delta = (self.pos - target).abs();
        delta.x < self.half_extent && delta.y < self.half_extent
    }

    /// Start being eaten. Resets the timer if called twice.
    pub fn perform_interaction(&mut self) -> InteractionKind {
        self.state = GrassState::Consuming {
            remaining: self.consume_duration,
        };
        InteractionKind::Consume
    }

    /// Only untouched grass can be bitten
    pub fn is_interactable(&self) -> bool {
        self.state == GrassState::Exists
    }

    pub fn is_removed(&self) -> bool {
        self.state == GrassState::Removed
    }

    pub fn update(&mut self) {
        if let GrassState::Consuming { remaining } = self.state {
            let remaining = remaining.saturating_sub(1);
            self.state = if remaining == 0 {
                log::trace!("Grass {} eaten", self.id);
                GrassState::Removed
            } else {
                GrassState::Consuming { remaining }
            };
        }
    }
}

impl Drawable for Grass {
    fn draw(&self, screen: &mut dyn Screen) {
        let sprite = match self.state {
            GrassState::Exists => Sprite::Grass,
            GrassState::Consuming { .. } => Sprite::GrassBitten,
            GrassState::Removed => return,
        };
        screen.blit(sprite, self.pos, Anchor::Center);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::SpriteBatch;

    fn tuft() -> Grass {
        Grass::new(1, Vec2::new(60.0, 100.0), 40, 20)
    }

    #[test]
    fn detection_is_an_axis_aligned_box() {
        let grass = tuft();
        assert!(grass.detect_interaction(Vec2::new(60.0, 100.0)));
        assert!(grass.detect_interaction(Vec2::new(79.0, 81.0)));
        // Inside on x, outside on y
        assert!(!grass.detect_interaction(Vec2::new(60.0, 120.0)));
        // Neighbouring cell centers never match
        assert!(!grass.detect_interaction(Vec2::new(100.0, 100.0)));
        assert!(!grass.detect_interaction(Vec2::new(20.0, 60.0)));
    }

    #[test]
    fn consume_lifecycle() {
        let mut grass = tuft();
        assert!(grass.is_interactable());
        assert_eq!(grass.perform_interaction(), InteractionKind::Consume);
        assert_eq!(grass.state, GrassState::Consuming { remaining: 20 });
        assert!(!grass.is_interactable());

        for _ in 0..19 {
            grass.update();
            assert!(!grass.is_removed());
        }
        grass.update();
        assert!(grass.is_removed());
    }

    #[test]
    fn second_interaction_resets_timer() {
        let mut grass = tuft();
        grass.perform_interaction();
        for _ in 0..5 {
            grass.update();
        }
        assert_eq!(grass.state, GrassState::Consuming { remaining: 15 });
        grass.perform_interaction();
        assert_eq!(grass.state, GrassState::Consuming { remaining: 20 });
    }

    #[test]
    fn untouched_grass_does_not_age() {
        let mut grass = tuft();
        for _ in 0..100 {
            grass.update();
        }
        assert_eq!(grass.state, GrassState::Exists);
    }

    #[test]
    fn draw_switches_sprite_while_eaten() {
        let mut grass = tuft();
        let mut batch = SpriteBatch::new(640, 640, 40);
        grass.draw(&mut batch);
        grass.perform_interaction();
        grass.draw(&mut batch);
        grass.state = GrassState::Removed;
        grass.draw(&mut batch);

        let sprites: Vec<Sprite> = batch.blits().iter().map(|b| b.sprite).collect();
        assert_eq!(sprites, vec![Sprite::Grass, Sprite::GrassBitten]);
    }
}
