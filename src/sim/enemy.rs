//! Pursuing enemies and their path-following motion
//!
//! Each enemy replans with A* on a fixed interval and walks the resulting path
//! cell center to cell center. The reported cell only changes on arrival, so
//! it is always a node of the most recent path.

use std::collections::HashSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::grid::{Cell, Grid};
use super::pathfind::find_path;
use crate::config::ArchetypeSpec;

/// Enemy kind; indexes the archetype table in [`crate::Config`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    /// Fast and fragile
    Pink,
    Red,
    /// Slow tank
    Maroon,
}

impl Archetype {
    pub const ALL: [Archetype; 3] = [Archetype::Pink, Archetype::Red, Archetype::Maroon];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Archetype::Pink => 0,
            Archetype::Red => 1,
            Archetype::Maroon => 2,
        }
    }
}

/// Where an enemy is in its path-following cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionState {
    /// No usable path (never planned, or endpoints off-grid)
    NeedPath,
    /// Walking toward `path[next_idx]`
    Following,
    /// Reached the end of the path; waits for the next replan
    Arrived,
}

/// A pursuing enemy
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: u32,
    pub kind: Archetype,
    pub hp: u32,
    /// Pixels per second
    pub speed_px: f32,
    pub color: [u8; 3],
    /// Last cell center actually reached
    pub cell: Cell,
    /// Continuous pixel position (center)
    pub pos: Vec2,
    /// Current plan, starting at the cell the plan was made from
    pub path: Vec<Cell>,
    pub next_idx: usize,
    /// Seconds until the next replan
    pub repath_timer: f32,
}

impl Enemy {
    pub fn new(id: u32, kind: Archetype, spec: &ArchetypeSpec, cell: Cell, grid: &Grid) -> Self {
        Self {
            id,
            kind,
            hp: spec.hp,
            speed_px: spec.speed_cells * grid.size,
            color: spec.color,
            cell,
            pos: grid.cell_to_pixel_center(cell),
            path: Vec::new(),
            next_idx: 0,
            repath_timer: 0.0,
        }
    }

    pub fn motion_state(&self) -> MotionState {
        if self.path.is_empty() {
            MotionState::NeedPath
        } else if self.next_idx < self.path.len() {
            MotionState::Following
        } else {
            MotionState::Arrived
        }
    }

    /// Recompute the path from the current cell
    pub fn replan(&mut self, grid: &Grid, target: Cell, blocked: &HashSet<Cell>, every: f32) {
        self.path = find_path(grid, self.cell, target, blocked);
        // path[0] is where we stand; aim one past it unless there is nowhere to go
        self.next_idx = if self.path.len() > 1 { 1 } else { 0 };
        self.repath_timer = every;
    }

    /// Advance one frame toward `target` around `blocked`
    pub fn update(
        &mut self,
        dt: f32,
        grid: &Grid,
        target: Cell,
        blocked: &HashSet<Cell>,
        repath_every: f32,
    ) {
        self.repath_timer -= dt;
        if self.repath_timer <= 0.0 || self.path.is_empty() {
            self.replan(grid, target, blocked, repath_every);
        }

        let Some(&next) = self.path.get(self.next_idx) else {
            return;
        };

        let target_px = grid.cell_to_pixel_center(next);
        let to_target = target_px - self.pos;
        let dist = to_target.length();
        let step = self.speed_px * dt;

        if dist <= step {
            self.pos = target_px;
            self.cell = next;
            self.next_idx += 1;
        } else {
            self.pos += to_target / dist * step;
        }
    }

    /// The reported cell belongs to the current plan
    pub fn cell_on_path(&self) -> bool {
        self.path.is_empty() || self.path.contains(&self.cell)
    }
}
