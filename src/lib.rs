//! Hungry Mac - a grass-munching tile game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid generation, grass, Mac behaviour)
//! - `app`: Menu/Play/GameOver state machine driving the world
//! - `renderer`: Blit primitive, sprite batching and the WebGPU pipeline
//! - `config`: Data-driven game constants with validation
//! - `settings`: Audio preferences

pub mod app;
pub mod audio;
pub mod config;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use app::{App, AppState};
pub use config::{ConfigError, GameConfig, SpawnPolicy};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (the game is tuned in frames at 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Window size in pixels - should be a multiple of the tile size
    pub const WIDTH: u32 = 640;
    pub const HEIGHT: u32 = 640;

    /// Base tile size in pixels
    pub const TILE_SIZE: u32 = 40;

    /// Chance (0-1) of grass spawning on any cell
    pub const GRASS_PERCENTAGE: f64 = 0.25;

    /// Number of Macs in the world
    pub const N_PLAYERS: u32 = 1;

    /// Hop movement: pixels per tick and ticks per hop (one tile per hop)
    pub const HOP_SPEED: f32 = 2.0;
    pub const HOP_DURATION: u32 = 20;

    /// Pause between actions, in ticks
    pub const IDLE_DELAY_AVERAGE: u32 = 30;
    pub const IDLE_DELAY_VARIANCE: u32 = 15;

    /// Ticks a bite takes, for both the Mac and the grass being eaten
    pub const CONSUME_DURATION: u32 = 20;
}

/// Pixel center of a grid index along one axis
#[inline]
pub fn tile_center(index: u32, tile_size: u32) -> f32 {
    tile_size as f32 / 2.0 + (index * tile_size) as f32
}
