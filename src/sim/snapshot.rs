//! Read-only view of a frame for render and HUD sinks

use glam::Vec2;
use serde::Serialize;

use super::collision::{Aabb, enemy_footprint, head_footprint};
use super::enemy::Archetype;
use super::grid::Cell;
use super::state::{GameOverCause, GamePhase, GameState};
use crate::consts::TRAIL_FADE_TO;

/// One trail segment with its fade
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrailSegment {
    pub from: Vec2,
    pub to: Vec2,
    pub alpha: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnemyView {
    pub id: u32,
    pub kind: Archetype,
    pub rect: Aabb,
    pub color: [u8; 3],
    pub hp: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectileView {
    pub pos: Vec2,
    pub radius: f32,
    pub alpha: u8,
    pub hit: bool,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub frame: u64,
    pub cell_size: f32,
    pub apple: Cell,
    pub trail: Vec<TrailSegment>,
    pub head: Aabb,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub score: u32,
    pub game_over: Option<GameOverCause>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let cell_size = state.grid.size;
        Self {
            frame: state.frame,
            cell_size,
            apple: state.apple,
            trail: state
                .trail
                .segments(TRAIL_FADE_TO)
                .into_iter()
                .map(|(from, to, alpha)| TrailSegment { from, to, alpha })
                .collect(),
            head: head_footprint(state),
            enemies: state
                .enemies
                .iter()
                .map(|e| EnemyView {
                    id: e.id,
                    kind: e.kind,
                    rect: enemy_footprint(e.pos, cell_size),
                    color: e.color,
                    hp: e.hp,
                })
                .collect(),
            projectiles: state
                .projectiles
                .iter()
                .map(|p| ProjectileView {
                    pos: p.pos,
                    radius: p.radius,
                    alpha: p.alpha,
                    hit: p.is_hit(),
                })
                .collect(),
            score: state.score,
            game_over: match state.phase {
                GamePhase::GameOver(cause) => Some(cause),
                GamePhase::Playing => None,
            },
        }
    }
}

/// HUD readout
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HudInfo {
    pub fps: u32,
    /// Interpolated head cell origin in pixels
    pub head_px: Vec2,
    pub score: u32,
    /// Configured snake speed, cells per second
    pub speed_cells: f32,
}

impl HudInfo {
    pub fn capture(state: &GameState, fps: u32) -> Self {
        Self {
            fps,
            head_px: state.snake.head_origin(&state.grid),
            score: state.score,
            speed_cells: state.config.snake_speed_cells,
        }
    }
}
