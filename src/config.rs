//! Game configuration
//!
//! Every tunable constant lives in [`GameConfig`]. Values are fixed for the
//! lifetime of a world; a JSON file can override the defaults at start-up.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app::AppState;
use crate::consts::*;

/// Environment variable naming a JSON config file (native only)
pub const CONFIG_ENV_VAR: &str = "HUNGRY_MAC_CONFIG";

/// How spawn cells are sampled when several Macs are placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpawnPolicy {
    /// Sample each spawn independently; two Macs may share a cell
    AllowCollisions,
    /// Re-sample until every spawn cell is distinct
    #[default]
    RejectCollisions,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tile size must be positive")]
    ZeroTileSize,
    #[error("window size {width}x{height} must be a positive multiple of the tile size {tile_size}")]
    BadWindowSize {
        width: u32,
        height: u32,
        tile_size: u32,
    },
    #[error("grass percentage {0} is outside [0, 1]")]
    BadGrassPercentage(f64),
    #[error("hop speed {0} must be finite and positive")]
    BadHopSpeed(f32),
    #[error("hop duration must be at least one tick")]
    ZeroHopDuration,
    #[error("consume duration must be at least one tick")]
    ZeroConsumeDuration,
    #[error("a {tiles_width}x{tiles_height} grid has too many cells")]
    GridTooLarge { tiles_width: u32, tiles_height: u32 },
    #[error("{players} players cannot spawn on distinct cells of a {cells}-cell grid")]
    TooManyPlayers { players: u32, cells: u32 },
}

/// All game constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Tile size in pixels
    pub tile_size: u32,
    /// Chance of grass on each cell
    pub grass_percentage: f64,
    /// Number of Macs
    pub n_players: u32,
    /// Pixels moved per hop tick
    pub hop_speed: f32,
    /// Ticks per hop
    pub hop_duration: u32,
    pub idle_delay_average: u32,
    pub idle_delay_variance: u32,
    /// Ticks a bite lasts (Mac animation and grass removal)
    pub consume_duration: u32,
    pub spawn_policy: SpawnPolicy,
    /// State the app starts in
    pub initial_state: AppState,
    /// Fixed seed for reproducible runs
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            tile_size: TILE_SIZE,
            grass_percentage: GRASS_PERCENTAGE,
            n_players: N_PLAYERS,
            hop_speed: HOP_SPEED,
            hop_duration: HOP_DURATION,
            idle_delay_average: IDLE_DELAY_AVERAGE,
            idle_delay_variance: IDLE_DELAY_VARIANCE,
            consume_duration: CONSUME_DURATION,
            spawn_policy: SpawnPolicy::default(),
            initial_state: AppState::Play,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Grid width in tiles
    pub fn tiles_width(&self) -> u32 {
        self.width / self.tile_size.max(1)
    }

    /// Grid height in tiles
    pub fn tiles_height(&self) -> u32 {
        self.height / self.tile_size.max(1)
    }

    /// Number of grid cells, or an error if it does not fit in a `u32`
    pub fn cell_count(&self) -> Result<u32, ConfigError> {
        let (tiles_width, tiles_height) = (self.tiles_width(), self.tiles_height());
        tiles_width
            .checked_mul(tiles_height)
            .ok_or(ConfigError::GridTooLarge {
                tiles_width,
                tiles_height,
            })
    }

    /// Distance covered by one full hop
    pub fn hop_distance(&self) -> f32 {
        self.hop_speed * self.hop_duration as f32
    }

    /// Range an idle delay is drawn from
    pub fn idle_delay_range(&self) -> std::ops::RangeInclusive<u32> {
        let low = self.idle_delay_average.saturating_sub(self.idle_delay_variance);
        let high = self.idle_delay_average.saturating_add(self.idle_delay_variance);
        low..=high
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tile_size == 0 {
            return Err(ConfigError::ZeroTileSize);
        }
        if self.width == 0
            || self.height == 0
            || self.width % self.tile_size != 0
            || self.height % self.tile_size != 0
        {
            return Err(ConfigError::BadWindowSize {
                width: self.width,
                height: self.height,
                tile_size: self.tile_size,
            });
        }
        if !(0.0..=1.0).contains(&self.grass_percentage) {
            return Err(ConfigError::BadGrassPercentage(self.grass_percentage));
        }
        if !self.hop_speed.is_finite() || self.hop_speed <= 0.0 {
            return Err(ConfigError::BadHopSpeed(self.hop_speed));
        }
        if self.hop_duration == 0 {
            return Err(ConfigError::ZeroHopDuration);
        }
        if self.consume_duration == 0 {
            return Err(ConfigError::ZeroConsumeDuration);
        }
        let cells = self.cell_count()?;
        if self.spawn_policy == SpawnPolicy::RejectCollisions && self.n_players > cells {
            return Err(ConfigError::TooManyPlayers {
                players: self.n_players,
                cells,
            });
        }
        Ok(())
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load the file named by `HUNGRY_MAC_CONFIG`, or fall back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }
}
