//! Game state and core simulation types
//!
//! One aggregate owns every entity for the frame. Components get `&mut` access
//! through it and never keep references across frames.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand::seq::IndexedRandom;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::enemy::{Archetype, Enemy};
use super::grid::{Cell, Direction, Grid};
use super::projectile::{Projectile, ProjectileParams};
use super::snake::Snake;
use super::trail::Trail;
use crate::config::Config;
use crate::consts::BULLET_HIT_GROWTH;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    /// Run ended; no further frames are simulated
    GameOver(GameOverCause),
}

/// Why the run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    OutOfBounds,
    SelfIntersection,
    EnemyContact { enemy_id: u32 },
}

/// Something that happened during a frame (drained by the frame loop)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    AppleEaten { cell: Cell, score: u32 },
    EnemySpawned { id: u32, kind: Archetype, cell: Cell },
    ProjectileFired { id: u32, velocity: Vec2 },
    EnemyHit { id: u32, hp_left: u32 },
    EnemyKilled { id: u32, kind: Archetype },
    GameOver { cause: GameOverCause },
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: Config,
    pub grid: Grid,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub score: u32,
    /// Simulated frames so far
    pub frame: u64,
    pub snake: Snake,
    pub trail: Trail,
    pub apple: Cell,
    /// Live enemies (spawn order)
    pub enemies: Vec<Enemy>,
    /// Live projectiles (fire order)
    pub projectiles: Vec<Projectile>,
    /// Wall-clock time of the last spawn
    pub last_spawn: Option<f64>,
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new run. The snake starts mid-grid heading right.
    ///
    /// `config` must have passed [`Config::validate`].
    pub fn new(config: Config, seed: u64) -> Self {
        debug_assert!(config.validate().is_ok(), "unvalidated config");
        let grid = config.grid();
        let head = Cell::splat(grid.cells / 2);
        let snake = Snake::new(head, Direction::Right, config.initial_length);
        Self::with_snake(config, seed, snake)
    }

    /// Create a run around a prepared snake
    pub fn with_snake(config: Config, seed: u64, snake: Snake) -> Self {
        debug_assert!(config.validate().is_ok(), "unvalidated config");
        let grid = config.grid();
        let trail = Trail::new(snake.head_center(&grid));
        let mut state = Self {
            config,
            grid,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            score: 0,
            frame: 0,
            snake,
            trail,
            apple: Cell::ZERO,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            last_spawn: None,
            events: Vec::new(),
            next_id: 1,
        };
        state.relocate_apple();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver(_))
    }

    /// Enter the terminal phase. The first cause wins.
    pub fn end(&mut self, cause: GameOverCause) {
        if self.is_over() {
            return;
        }
        self.phase = GamePhase::GameOver(cause);
        self.events.push(GameEvent::GameOver { cause });
    }

    /// Move the apple to a uniformly random cell outside the body
    pub fn relocate_apple(&mut self) {
        let free: Vec<Cell> = self
            .grid
            .iter_cells()
            .filter(|&c| !self.snake.occupies(c))
            .collect();
        match free.choose(&mut self.rng) {
            Some(&cell) => self.apple = cell,
            None => log::warn!("No free cell left for the apple"),
        }
    }

    /// Projectile tuning derived from config
    pub fn projectile_params(&self) -> ProjectileParams {
        ProjectileParams {
            speed: self.config.projectile_speed,
            radius: self.config.projectile_radius,
            fade_time: self.config.projectile_fade_time,
            growth: BULLET_HIT_GROWTH,
            bounds: self.grid.extent(),
            cull_margin: self.config.projectile_cull_margin,
        }
    }

    /// Fire a projectile from the head center toward `aim`
    pub fn fire(&mut self, aim: Vec2) {
        let id = self.next_entity_id();
        let origin = self.snake.head_center(&self.grid);
        let projectile = Projectile::fire(id, origin, aim, &self.projectile_params());
        self.events.push(GameEvent::ProjectileFired {
            id,
            velocity: projectile.vel,
        });
        self.projectiles.push(projectile);
    }

    /// Pick a weighted archetype and a random edge cell
    pub fn spawn_enemy(&mut self) {
        let kind = self.roll_archetype();
        let cell = self.random_edge_cell();
        self.spawn_enemy_at(kind, cell);
    }

    /// Spawn a specific enemy (tests, scripted setups)
    pub fn spawn_enemy_at(&mut self, kind: Archetype, cell: Cell) -> u32 {
        let id = self.next_entity_id();
        let spec = self.config.archetypes[kind.index()];
        self.enemies.push(Enemy::new(id, kind, &spec, cell, &self.grid));
        self.events.push(GameEvent::EnemySpawned { id, kind, cell });
        id
    }

    fn roll_archetype(&mut self) -> Archetype {
        let weights = self.config.spawn_weights;
        // u64 so three u32 weights cannot overflow
        let total: u64 = weights.iter().map(|&w| u64::from(w)).sum();
        let mut roll = self.rng.random_range(0..total);
        for kind in Archetype::ALL {
            let w = u64::from(weights[kind.index()]);
            if roll < w {
                return kind;
            }
            roll -= w;
        }
        Archetype::Pink
    }

    fn random_edge_cell(&mut self) -> Cell {
        let last = self.grid.cells - 1;
        let along = self.rng.random_range(0..self.grid.cells);
        match self.rng.random_range(0..4) {
            0 => Cell::new(along, 0),
            1 => Cell::new(along, last),
            2 => Cell::new(0, along),
            _ => Cell::new(last, along),
        }
    }

    /// Take this frame's events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "unvalidated config")]
    fn test_new_rejects_unvalidated_config() {
        let config = Config {
            spawn_weights: [0, 0, 0],
            ..Config::default()
        };
        GameState::new(config, 1);
    }

    #[test]
    fn test_roll_archetype_with_huge_weights() {
        let config = Config {
            spawn_weights: [u32::MAX, u32::MAX, 1],
            ..Config::default()
        };
        let mut state = GameState::new(config, 3);
        let rolled: Vec<Archetype> = (0..200).map(|_| state.roll_archetype()).collect();
        assert!(rolled.contains(&Archetype::Pink));
        assert!(rolled.contains(&Archetype::Red));
    }

    #[test]
    fn test_new_state() {
        let state = GameState::new(Config::default(), 42);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.snake.head(), Cell::new(20, 20));
        assert_eq!(state.snake.length_cells, 5);
        assert!(!state.snake.occupies(state.apple));
        assert!(state.grid.in_bounds(state.apple));
    }

    #[test]
    fn test_same_seed_same_apple() {
        let a = GameState::new(Config::default(), 7);
        let b = GameState::new(Config::default(), 7);
        assert_eq!(a.apple, b.apple);
    }

    #[test]
    fn test_spawn_on_edge() {
        let mut state = GameState::new(Config::default(), 3);
        for _ in 0..50 {
            state.spawn_enemy();
        }
        let last = state.grid.cells - 1;
        for enemy in &state.enemies {
            let c = enemy.cell;
            assert!(state.grid.in_bounds(c));
            assert!(c.x == 0 || c.y == 0 || c.x == last || c.y == last);
        }
        let ids: std::collections::HashSet<u32> = state.enemies.iter().map(|e| e.id).collect();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_spawn_weights_respected() {
        let mut config = Config::default();
        config.spawn_weights = [0, 0, 1];
        let mut state = GameState::new(config, 11);
        for _ in 0..20 {
            state.spawn_enemy();
        }
        assert!(state.enemies.iter().all(|e| e.kind == Archetype::Maroon));
        assert!(state.enemies.iter().all(|e| e.hp == 15));
    }

    #[test]
    fn test_end_is_sticky() {
        let mut state = GameState::new(Config::default(), 1);
        state.end(GameOverCause::OutOfBounds);
        state.end(GameOverCause::SelfIntersection);
        assert_eq!(state.phase, GamePhase::GameOver(GameOverCause::OutOfBounds));
        assert_eq!(state.drain_events().len(), 1);
    }

    #[test]
    fn test_apple_avoids_body_on_tiny_grid() {
        let config = Config {
            resolution: 40,
            cell_size: 20,
            ..Config::default()
        };
        let snake = Snake::from_cells(
            [Cell::new(0, 0), Cell::new(1, 0), Cell::new(1, 1)],
            Direction::Down,
        );
        let state = GameState::with_snake(config, 5, snake);
        assert_eq!(state.apple, Cell::new(0, 1));
    }
}
