//! Snake Shooter - grid snake with A*-driven pursuers
//!
//! Core modules:
//! - `sim`: Deterministic simulation (body, pathfinding, projectiles, combat)
//! - `runner`: Frame loop and the collaborator traits it drives
//! - `renderer`: CPU geometry for a render sink
//! - `config`: Startup configuration

pub mod config;
pub mod renderer;
pub mod runner;
pub mod sim;

pub use config::{ArchetypeSpec, Config, ConfigError};

/// Game configuration constants (defaults for [`Config`])
pub mod consts {
    /// Target frame rate of the simulation loop
    pub const TARGET_FPS: u32 = 60;
    /// Largest measured dt fed into a single frame (seconds)
    pub const MAX_FRAME_DT: f32 = 0.25;

    /// Window resolution (square, pixels)
    pub const RES: u32 = 800;
    /// Cell size (pixels)
    pub const SIZE: u32 = 20;

    /// Snake speed (cells per second)
    pub const SPEED_CELLS: f32 = 15.0;
    /// Starting body length in cells
    pub const INIT_LEN: usize = 5;

    /// Projectile defaults
    pub const BULLET_SPEED: f32 = 700.0;
    pub const BULLET_RADIUS: f32 = 5.0;
    /// Seconds a projectile lingers after impact
    pub const BULLET_FADE_TIME: f32 = 0.25;
    /// Radius growth at the end of the fade (fraction of base radius)
    pub const BULLET_HIT_GROWTH: f32 = 0.6;
    /// How far past the screen edge a projectile may fly before culling
    pub const BULLET_CULL_MARGIN: f32 = 50.0;

    /// Seconds between enemy spawns
    pub const ENEMY_SPAWN_EVERY: f64 = 1.5;
    /// Seconds between A* replans
    pub const ENEMY_REPATH_EVERY: f32 = 0.25;

    /// Head footprint inset from its cell (pixels, each side)
    pub const HEAD_INSET: f32 = 2.0;
    /// Enemy footprint is this much smaller than a cell (pixels, total)
    pub const ENEMY_SHRINK: f32 = 2.0;

    /// Trail fade floor (alpha of the oldest segment)
    pub const TRAIL_FADE_TO: u8 = 10;
}
