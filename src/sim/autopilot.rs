//! Demo-mode player
//!
//! Steers toward the apple along an A* route around its own body and shoots
//! the nearest enemy on a cooldown. Used by the headless binary.

use super::grid::{Cell, Direction};
use super::pathfind::find_path;
use super::state::GameState;
use super::tick::{Intent, TickInput};

/// Frames between shots
pub const FIRE_COOLDOWN_FRAMES: u32 = 12;

#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    cooldown: u32,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick this frame's intents
    pub fn decide(&mut self, state: &GameState) -> TickInput {
        let mut intents = Vec::new();

        if let Some(dir) = self.choose_heading(state) {
            if dir != state.snake.dir {
                intents.push(Intent::Turn(dir));
            }
        }

        self.cooldown = self.cooldown.saturating_sub(1);
        if self.cooldown == 0 {
            let head = state.snake.head_center(&state.grid);
            let nearest = state.enemies.iter().min_by(|a, b| {
                a.pos
                    .distance_squared(head)
                    .total_cmp(&b.pos.distance_squared(head))
            });
            if let Some(enemy) = nearest {
                intents.push(Intent::Fire(enemy.pos));
                self.cooldown = FIRE_COOLDOWN_FRAMES;
            }
        }

        TickInput { intents }
    }

    fn choose_heading(&self, state: &GameState) -> Option<Direction> {
        let snake = &state.snake;
        let head = snake.head();
        let blocked = snake.blocked_set();

        let route = find_path(&state.grid, head, state.apple, &blocked);
        let wanted = route
            .get(1)
            .and_then(|&next| Direction::ALL.into_iter().find(|d| head + d.delta() == next));

        let safe = |dir: Direction| {
            let next: Cell = head + dir.delta();
            snake.dir.can_turn_to(dir) && state.grid.in_bounds(next) && !blocked.contains(&next)
        };

        match wanted {
            Some(dir) if safe(dir) => Some(dir),
            // No route (or a reversal): keep going if that is safe, else any safe turn
            _ if safe(snake.dir) => Some(snake.dir),
            _ => Direction::ALL.into_iter().find(|&d| safe(d)),
        }
    }
}
