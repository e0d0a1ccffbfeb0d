//! Background tiles

use glam::Vec2;

use super::entity::Drawable;
use crate::renderer::{Anchor, Screen, Sprite};

/// A dirt background cell
#[derive(Debug, Clone, PartialEq)]
pub struct Dirt {
    pub pos: Vec2,
}

impl Dirt {
    pub fn new(pos: Vec2) -> Self {
        Self { pos }
    }

    /// Dirt has no mechanics beyond being background
    pub fn update(&mut self) {}
}

impl Drawable for Dirt {
    fn draw(&self, screen: &mut dyn Screen) {
        screen.blit(Sprite::Dirt, self.pos, Anchor::Center);
    }
}
