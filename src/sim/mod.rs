//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame ticks only, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (layer order, then spawn order)
//! - Side effects such as sounds leave as `GameEvent`s

pub mod entity;
pub mod grass;
pub mod grid;
pub mod player;
pub mod tile;
pub mod world;

pub use entity::{Drawable, GameEvent, InteractionKind};
pub use grass::{Grass, GrassState};
pub use grid::{Cell, GridParams, Layout, generate_layout};
pub use player::{Coat, Direction, MoveOutcome, Player, PlayerAction, Pose};
pub use tile::Dirt;
pub use world::World;
