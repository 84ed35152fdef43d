//! Player body: discrete grid steps with sub-step interpolation
//!
//! The body advances one whole cell at a time. Between steps the head is drawn
//! at `cell - dir * (1 - progress)`, which gives smooth motion without ever
//! leaving the grid model.

use std::collections::{HashSet, VecDeque};

use glam::Vec2;

use super::grid::{Cell, Direction, Grid};
use super::state::GameOverCause;

/// The player's snake
#[derive(Debug, Clone)]
pub struct Snake {
    /// Occupied cells, oldest first; the head is the back
    body: VecDeque<Cell>,
    head: Cell,
    pub dir: Direction,
    /// Turn waiting for the next step boundary
    pub queued_dir: Direction,
    /// Fraction of the current step already travelled
    pub progress: f32,
    pub length_cells: usize,
}

impl Snake {
    pub fn new(head: Cell, dir: Direction, length_cells: usize) -> Self {
        let mut body = VecDeque::with_capacity(length_cells + 1);
        body.push_back(head);
        Self {
            body,
            head,
            dir,
            queued_dir: dir,
            progress: 0.0,
            length_cells,
        }
    }

    /// Build a snake from explicit cells (oldest first, head last)
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>, dir: Direction) -> Self {
        let body: VecDeque<Cell> = cells.into_iter().collect();
        let head = body.back().copied().unwrap_or_default();
        debug_assert!(!body.is_empty(), "snake needs at least a head");
        let length_cells = body.len();
        Self {
            body,
            head,
            dir,
            queued_dir: dir,
            progress: 0.0,
            length_cells,
        }
    }

    #[inline]
    pub fn head(&self) -> Cell {
        self.head
    }

    pub fn body(&self) -> impl ExactSizeIterator<Item = &Cell> {
        self.body.iter()
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Body cells as a blocked set for pathfinding
    pub fn blocked_set(&self) -> HashSet<Cell> {
        self.body.iter().copied().collect()
    }

    /// Buffer a turn; reversals are ignored
    pub fn queue_turn(&mut self, dir: Direction) {
        if dir != self.dir && self.dir.can_turn_to(dir) {
            self.queued_dir = dir;
        }
    }

    /// Add travel for this frame, in cells
    pub fn accumulate(&mut self, dt: f32, speed_px: f32, cell_size: f32) {
        self.progress += speed_px * dt / cell_size;
    }

    /// Consume one whole step from the accumulator, if available
    pub fn take_step(&mut self) -> bool {
        if self.progress >= 1.0 {
            self.progress -= 1.0;
            true
        } else {
            false
        }
    }

    /// Advance one cell. Returns the new head, or why the move was fatal.
    pub fn step(&mut self, grid: &Grid) -> Result<Cell, GameOverCause> {
        if self.queued_dir != self.dir && self.dir.can_turn_to(self.queued_dir) {
            self.dir = self.queued_dir;
        }

        let next = self.head() + self.dir.delta();
        if !grid.in_bounds(next) {
            return Err(GameOverCause::OutOfBounds);
        }
        if self.occupies(next) {
            return Err(GameOverCause::SelfIntersection);
        }

        self.body.push_back(next);
        self.head = next;
        while self.body.len() > self.length_cells {
            self.body.pop_front();
        }
        Ok(next)
    }

    pub fn grow(&mut self) {
        self.length_cells += 1;
    }

    /// Fractional grid position of the head between steps
    pub fn interpolated(&self) -> Vec2 {
        self.head().as_vec2() - self.dir.as_vec2() * (1.0 - self.progress)
    }

    /// Interpolated head center in pixels
    pub fn head_center(&self, grid: &Grid) -> Vec2 {
        grid.grid_to_pixel_center(self.interpolated())
    }

    /// Interpolated head cell origin (top-left) in pixels
    pub fn head_origin(&self, grid: &Grid) -> Vec2 {
        self.interpolated() * grid.size
    }

    /// Trail budget in pixels
    pub fn trail_budget(&self, grid: &Grid) -> f32 {
        self.length_cells as f32 * grid.size
    }

    /// All body cells are pairwise distinct
    pub fn is_self_disjoint(&self) -> bool {
        self.blocked_set().len() == self.body.len()
    }
}
