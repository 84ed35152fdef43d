//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (spawn/fire order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod enemy;
pub mod grid;
pub mod pathfind;
pub mod projectile;
pub mod snake;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod trail;

pub use autopilot::Autopilot;
pub use collision::Aabb;
pub use enemy::{Archetype, Enemy, MotionState};
pub use grid::{Cell, Direction, Grid};
pub use pathfind::find_path;
pub use projectile::{Projectile, ProjectileState};
pub use snake::Snake;
pub use snapshot::{HudInfo, Snapshot};
pub use state::{GameEvent, GameOverCause, GamePhase, GameState};
pub use tick::{Intent, TickInput, tick};
pub use trail::Trail;
