//! Startup configuration
//!
//! Every tunable is fixed when the game starts. Values can be overridden from
//! a JSON file; anything missing falls back to [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::Grid;

/// Errors raised while loading or validating a [`Config`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("cell size must be non-zero")]
    ZeroCellSize,
    #[error("resolution {resolution} is not a multiple of cell size {cell_size}")]
    UnevenGrid { resolution: u32, cell_size: u32 },
    #[error("grid must be at least 2x2 cells, got {0}")]
    GridTooSmall(u32),
    #[error("{0} must be positive")]
    NonPositive(&'static str),
    #[error("{0} must not be negative")]
    Negative(&'static str),
    #[error("initial length must be at least 1")]
    ZeroLength,
    #[error("archetype {0} has zero hp")]
    ZeroHp(usize),
    #[error("all spawn weights are zero")]
    NoSpawnWeight,
}

/// One enemy archetype: hit points, speed and draw color
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeSpec {
    pub hp: u32,
    /// Cells per second
    pub speed_cells: f32,
    pub color: [u8; 3],
}

/// Game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Window resolution (square, pixels)
    pub resolution: u32,
    /// Cell size (pixels)
    pub cell_size: u32,

    // === Snake ===
    /// Cells per second
    pub snake_speed_cells: f32,
    pub initial_length: usize,

    // === Projectiles ===
    /// Pixels per second
    pub projectile_speed: f32,
    pub projectile_radius: f32,
    /// Seconds a projectile lingers after impact
    pub projectile_fade_time: f32,
    /// Off-screen distance at which unhit projectiles are culled
    pub projectile_cull_margin: f32,

    // === Enemies ===
    /// Seconds between spawns
    pub enemy_spawn_every: f64,
    /// Seconds between A* replans
    pub enemy_repath_every: f32,
    /// Pink, red, maroon
    pub archetypes: [ArchetypeSpec; 3],
    /// Relative spawn odds per archetype
    pub spawn_weights: [u32; 3],

    /// Fixed run seed (random when absent)
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resolution: RES,
            cell_size: SIZE,

            snake_speed_cells: SPEED_CELLS,
            initial_length: INIT_LEN,

            projectile_speed: BULLET_SPEED,
            projectile_radius: BULLET_RADIUS,
            projectile_fade_time: BULLET_FADE_TIME,
            projectile_cull_margin: BULLET_CULL_MARGIN,

            enemy_spawn_every: ENEMY_SPAWN_EVERY,
            enemy_repath_every: ENEMY_REPATH_EVERY,
            archetypes: [
                ArchetypeSpec {
                    hp: 1,
                    speed_cells: 15.0,
                    color: [255, 105, 180],
                },
                ArchetypeSpec {
                    hp: 3,
                    speed_cells: 5.0,
                    color: [220, 0, 0],
                },
                ArchetypeSpec {
                    hp: 15,
                    speed_cells: 2.0,
                    color: [128, 0, 32],
                },
            ],
            // More pinks and reds, the odd maroon
            spawn_weights: [3, 2, 1],

            seed: None,
        }
    }
}

impl Config {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        if self.resolution % self.cell_size != 0 {
            return Err(ConfigError::UnevenGrid {
                resolution: self.resolution,
                cell_size: self.cell_size,
            });
        }
        let cells = self.resolution / self.cell_size;
        if cells < 2 {
            return Err(ConfigError::GridTooSmall(cells));
        }
        if self.initial_length == 0 {
            return Err(ConfigError::ZeroLength);
        }

        let positive: [(&'static str, f64); 6] = [
            ("snake_speed_cells", self.snake_speed_cells.into()),
            ("projectile_speed", self.projectile_speed.into()),
            ("projectile_radius", self.projectile_radius.into()),
            ("projectile_fade_time", self.projectile_fade_time.into()),
            ("enemy_spawn_every", self.enemy_spawn_every),
            ("enemy_repath_every", self.enemy_repath_every.into()),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive(name));
            }
        }

        if !(self.projectile_cull_margin >= 0.0) {
            return Err(ConfigError::Negative("projectile_cull_margin"));
        }

        for (index, spec) in self.archetypes.iter().enumerate() {
            if spec.hp == 0 {
                return Err(ConfigError::ZeroHp(index));
            }
            if !(spec.speed_cells > 0.0) {
                return Err(ConfigError::NonPositive("archetype speed_cells"));
            }
        }
        if self.spawn_weights.iter().all(|&w| w == 0) {
            return Err(ConfigError::NoSpawnWeight);
        }

        Ok(())
    }

    /// Grid geometry derived from resolution and cell size
    pub fn grid(&self) -> Grid {
        Grid::new((self.resolution / self.cell_size) as i32, self.cell_size as f32)
    }

    /// Snake speed in pixels per second
    pub fn snake_speed_px(&self) -> f32 {
        self.snake_speed_cells * self.cell_size as f32
    }
}
