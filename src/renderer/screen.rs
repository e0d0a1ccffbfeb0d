//! The blit primitive entities draw through
//!
//! A [`Screen`] is anything that can paint a named sprite at a pixel
//! position. [`SpriteBatch`] is the implementation used by the game: it
//! remembers every blit and builds coloured quads for the GPU.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::config::GameConfig;
use crate::sim::player::{Coat, Direction, Pose};

/// Which point of the sprite `pos` refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Center,
    TopLeft,
}

/// Every image the game can draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    Dirt,
    Grass,
    /// Grass while it is being eaten
    GrassBitten,
    Mac {
        coat: Coat,
        facing: Direction,
        pose: Pose,
    },
    /// Full-screen title overlay
    Title,
    /// Full-screen game over overlay
    GameOver,
}

impl Sprite {
    /// Asset name of the image
    pub fn name(&self) -> String {
        match self {
            Sprite::Dirt => "dirt".to_string(),
            Sprite::Grass => "grass".to_string(),
            Sprite::GrassBitten => "grass_bitten".to_string(),
            Sprite::Mac { coat, facing, pose } => {
                format!("mac_{}_{}_{}", coat.as_str(), facing.as_str(), pose.as_str())
            }
            Sprite::Title => "title".to_string(),
            Sprite::GameOver => "over".to_string(),
        }
    }

    /// Most vertices one blit of this sprite can produce
    pub fn max_vertices(&self) -> usize {
        match self {
            Sprite::Dirt => 12,
            Sprite::Grass => GRASS_BLADES * 3,
            Sprite::GrassBitten => BITTEN_BLADES * 3,
            Sprite::Mac { .. } => MAC_VERTICES,
            Sprite::Title | Sprite::GameOver => 12,
        }
    }
}

const GRASS_BLADES: usize = 5;
const BITTEN_BLADES: usize = 3;
/// Body, eye and mouth quads
const MAC_VERTICES: usize = 18;

/// Drawing surface
pub trait Screen {
    fn blit(&mut self, sprite: Sprite, pos: Vec2, anchor: Anchor);
}

/// A recorded blit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blit {
    pub sprite: Sprite,
    pub pos: Vec2,
    pub anchor: Anchor,
}

/// Collects blits for one frame and turns them into vertices
#[derive(Debug, Clone)]
pub struct SpriteBatch {
    /// Screen size in pixels (overlays cover all of it)
    size: Vec2,
    /// Tile size in pixels (cell sprites fill one tile)
    tile_size: f32,
    blits: Vec<Blit>,
}

impl SpriteBatch {
    pub fn new(width: u32, height: u32, tile_size: u32) -> Self {
        Self {
            size: Vec2::new(width as f32, height as f32),
            tile_size: tile_size as f32,
            blits: Vec::new(),
        }
    }

    /// Vertex count a full frame can never exceed: dirt and grass on every
    /// cell, every Mac, and one overlay
    pub fn frame_budget(config: &GameConfig) -> usize {
        let cells = (config.tiles_width() as usize).saturating_mul(config.tiles_height() as usize);
        let per_cell = Sprite::Dirt.max_vertices() + Sprite::Grass.max_vertices();
        cells
            .saturating_mul(per_cell)
            .saturating_add((config.n_players as usize).saturating_mul(MAC_VERTICES))
            .saturating_add(Sprite::Title.max_vertices())
    }

    /// Forget last frame's blits
    pub fn clear(&mut self) {
        self.blits.clear();
    }

    pub fn blits(&self) -> &[Blit] {
        &self.blits
    }

    /// Pixel size of a sprite
    fn sprite_size(&self, sprite: Sprite) -> Vec2 {
        match sprite {
            Sprite::Dirt | Sprite::Grass | Sprite::GrassBitten => Vec2::splat(self.tile_size),
            Sprite::Mac { .. } => Vec2::splat(self.tile_size * 0.8),
            Sprite::Title | Sprite::GameOver => self.size,
        }
    }

    /// Build the vertex list in blit order (painter's algorithm)
    pub fn vertices(&self) -> Vec<Vertex> {
        let mut vertices = Vec::with_capacity(self.blits.len() * 12);

        for blit in &self.blits {
            let size = self.sprite_size(blit.sprite);
            let center = match blit.anchor {
                Anchor::Center => blit.pos,
                Anchor::TopLeft => blit.pos + size / 2.0,
            };
            let half = size / 2.0;

            match blit.sprite {
                Sprite::Dirt => {
                    vertices.extend(shapes::quad(center, half, colors::DIRT));
                    vertices.extend(shapes::quad(
                        center + half * Vec2::new(-0.4, 0.3),
                        half * 0.12,
                        colors::DIRT_SPECK,
                    ));
                }
                Sprite::Grass => {
                    vertices.extend(shapes::tuft(center, half.x * 0.8, GRASS_BLADES as u32, colors::GRASS));
                }
                Sprite::GrassBitten => {
                    vertices.extend(shapes::tuft(center, half.x * 0.5, BITTEN_BLADES as u32, colors::GRASS_BITTEN));
                }
                Sprite::Mac { coat, facing, pose } => {
                    let body = match pose {
                        Pose::Hop => half * Vec2::new(0.9, 1.0),
                        _ => half,
                    };
                    vertices.extend(shapes::quad(center, body, coat.color()));

                    // Eye sits toward the facing side
                    let dir = facing.offset();
                    let eye = center + dir * half * 0.55 - dir.perp() * half * 0.3;
                    vertices.extend(shapes::quad(eye, half * 0.12, colors::MAC_EYE));

                    if pose == Pose::Eat {
                        let mouth = center + dir * half * 0.9;
                        vertices.extend(shapes::quad(mouth, half * 0.25, colors::MAC_MOUTH));
                    }
                }
                Sprite::Title => {
                    vertices.extend(shapes::quad(center, half, colors::TITLE_VEIL));
                    vertices.extend(shapes::quad(
                        center,
                        half * Vec2::new(0.7, 0.12),
                        colors::TITLE_BANNER,
                    ));
                }
                Sprite::GameOver => {
                    vertices.extend(shapes::quad(center, half, colors::OVER_VEIL));
                    vertices.extend(shapes::quad(
                        center,
                        half * Vec2::new(0.7, 0.12),
                        colors::OVER_BANNER,
                    ));
                }
            }
        }

        vertices
    }
}

impl Screen for SpriteBatch {
    fn blit(&mut self, sprite: Sprite, pos: Vec2, anchor: Anchor) {
        self.blits.push(Blit { sprite, pos, anchor });
    }
}
