//! Per-frame simulation step
//!
//! Order: input intents, snake (body + trail), timed spawn, enemy motion,
//! projectile motion, combat. Once the run is over no frame is simulated.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision;
use super::grid::Direction;
use super::state::{GameEvent, GameState};

/// One player intent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Intent {
    Turn(Direction),
    /// Fire toward a screen-space aim point
    Fire(Vec2),
}

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub intents: Vec<Intent>,
}

impl TickInput {
    pub fn turn(dir: Direction) -> Self {
        Self {
            intents: vec![Intent::Turn(dir)],
        }
    }

    pub fn fire(aim: Vec2) -> Self {
        Self {
            intents: vec![Intent::Fire(aim)],
        }
    }
}

/// Advance the game by one frame of `dt` seconds. `now` is wall-clock seconds,
/// used for spawn timing.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32, now: f64) {
    if state.is_over() {
        return;
    }
    state.frame += 1;

    apply_input(state, input);

    advance_snake(state, dt);
    if state.is_over() {
        // Body collision takes precedence over everything else this frame
        return;
    }

    maybe_spawn(state, now);
    advance_enemies(state, dt);
    advance_projectiles(state, dt);
    collision::resolve(state);
}

fn apply_input(state: &mut GameState, input: &TickInput) {
    for intent in &input.intents {
        match *intent {
            Intent::Turn(dir) => state.snake.queue_turn(dir),
            Intent::Fire(aim) => state.fire(aim),
        }
    }
}

/// Take every whole step the accumulator allows, eating apples on the way,
/// then refresh the interpolated trail.
fn advance_snake(state: &mut GameState, dt: f32) {
    let speed_px = state.config.snake_speed_px();
    state.snake.accumulate(dt, speed_px, state.grid.size);

    while state.snake.take_step() {
        match state.snake.step(&state.grid) {
            Ok(head) => {
                if head == state.apple {
                    state.snake.grow();
                    state.score += 1;
                    state.events.push(GameEvent::AppleEaten {
                        cell: head,
                        score: state.score,
                    });
                    state.relocate_apple();
                }
            }
            Err(cause) => {
                state.end(cause);
                return;
            }
        }
    }

    let head = state.snake.head_center(&state.grid);
    let budget = state.snake.trail_budget(&state.grid);
    state.trail.record(head, budget);
}

fn maybe_spawn(state: &mut GameState, now: f64) {
    let due = match state.last_spawn {
        None => true,
        Some(last) => now - last >= state.config.enemy_spawn_every,
    };
    if due {
        state.spawn_enemy();
        state.last_spawn = Some(now);
    }
}

fn advance_enemies(state: &mut GameState, dt: f32) {
    // Read-only snapshot of the obstacles for this frame
    let blocked = state.snake.blocked_set();
    let target = state.snake.head();
    let every = state.config.enemy_repath_every;
    let grid = state.grid;

    for enemy in state.enemies.iter_mut() {
        enemy.update(dt, &grid, target, &blocked, every);
    }
}

fn advance_projectiles(state: &mut GameState, dt: f32) {
    let params = state.projectile_params();
    state.projectiles.retain_mut(|p| p.update(dt, &params));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::consts::*;
    use crate::sim::enemy::Archetype;
    use crate::sim::grid::Cell;
    use crate::sim::snake::Snake;
    use crate::sim::state::{GameOverCause, GamePhase};

    const DT: f32 = 1.0 / TARGET_FPS as f32;

    fn quiet_config() -> Config {
        // Spawns effectively disabled unless a test wants them
        Config {
            enemy_spawn_every: 1.0e9,
            ..Config::default()
        }
    }

    fn body_line(head: Cell, len: i32) -> Snake {
        Snake::from_cells((0..len).rev().map(|i| head - Cell::new(i, 0)), Direction::Right)
    }

    #[test]
    fn test_apple_scenario() {
        let snake = body_line(Cell::new(10, 10), 5);
        let mut state = GameState::with_snake(quiet_config(), 9, snake);
        state.last_spawn = Some(0.0);
        state.apple = Cell::new(11, 10);

        // One full step: 300 px/s over 20 px cells
        tick(&mut state, &TickInput::default(), 1.0 / 15.0 + 1e-4, 0.0);

        assert_eq!(state.snake.head(), Cell::new(11, 10));
        assert_eq!(state.snake.length_cells, 6);
        assert_eq!(state.score, 1);
        assert!(!state.snake.occupies(state.apple));
        assert!(
            state
                .drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::AppleEaten { score: 1, .. }))
        );
    }

    #[test]
    fn test_fastest_enemy_killed_by_one_shot() {
        let mut state = GameState::new(quiet_config(), 4);
        state.last_spawn = Some(0.0);
        let cell = Cell::new(5, 30);
        state.spawn_enemy_at(Archetype::Pink, cell);
        assert_eq!(state.enemies[0].hp, 1);
        let aim = state.grid.cell_to_pixel_center(cell);
        let origin = state.snake.head_center(&state.grid);
        state.fire(aim);
        // The enemy moves at most 5 px this frame, well inside its footprint
        state.projectiles[0].pos = aim;
        state.projectiles[0].vel = (aim - origin).normalize() * 1.0e-3;

        tick(&mut state, &TickInput::default(), DT, 0.0);

        assert!(state.enemies.is_empty());
        assert!(state.projectiles[0].is_hit());
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_fire_at_head_has_fixed_direction() {
        let mut state = GameState::new(quiet_config(), 4);
        state.last_spawn = Some(0.0);
        let head = state.snake.head_center(&state.grid);
        tick(&mut state, &TickInput::fire(head), DT, 0.0);

        let p = &state.projectiles[0];
        assert!(p.vel.is_finite());
        assert!((p.vel.length() - BULLET_SPEED).abs() < 1e-3);
        assert_eq!(p.vel.normalize(), Vec2::X);
    }

    #[test]
    fn test_walled_in_enemy_does_not_move() {
        // Body wraps around (5,5) on all four sides; head far away
        let cells = [
            Cell::new(4, 6),
            Cell::new(4, 5),
            Cell::new(4, 4),
            Cell::new(5, 4),
            Cell::new(6, 4),
            Cell::new(6, 5),
            Cell::new(6, 6),
            Cell::new(5, 6),
            Cell::new(5, 7),
            Cell::new(5, 8),
            Cell::new(5, 9),
            Cell::new(5, 10),
            Cell::new(6, 10),
            Cell::new(7, 10),
            Cell::new(8, 10),
            Cell::new(9, 10),
            Cell::new(10, 10),
        ];
        let snake = Snake::from_cells(cells, Direction::Right);
        let mut state = GameState::with_snake(
            Config {
                snake_speed_cells: 0.01,
                ..quiet_config()
            },
            2,
            snake,
        );
        state.last_spawn = Some(0.0);
        let start = Cell::new(5, 5);
        state.spawn_enemy_at(Archetype::Pink, start);
        let origin = state.enemies[0].pos;

        for _ in 0..30 {
            tick(&mut state, &TickInput::default(), DT, 0.0);
            assert_eq!(state.enemies[0].path, vec![start]);
            assert_eq!(state.enemies[0].pos, origin);
        }
    }

    #[test]
    fn test_wall_ends_game_and_freezes() {
        let snake = Snake::new(Cell::new(39, 20), Direction::Right, 5);
        let mut state = GameState::with_snake(quiet_config(), 1, snake);
        state.last_spawn = Some(0.0);
        state.apple = Cell::new(0, 0);

        tick(&mut state, &TickInput::default(), 0.1, 0.0);
        assert_eq!(state.phase, GamePhase::GameOver(GameOverCause::OutOfBounds));

        let frame = state.frame;
        tick(&mut state, &TickInput::turn(Direction::Up), 0.1, 0.0);
        assert_eq!(state.frame, frame);
        assert_eq!(state.snake.dir, Direction::Right);
    }

    #[test]
    fn test_multiple_steps_in_one_frame_eat_every_apple_cell() {
        let snake = body_line(Cell::new(10, 10), 3);
        let mut state = GameState::with_snake(quiet_config(), 6, snake);
        state.last_spawn = Some(0.0);
        state.apple = Cell::new(11, 10);

        // Three steps in one long frame; the apple sits on the first
        tick(&mut state, &TickInput::default(), 3.0 / 15.0 + 1e-4, 0.0);
        assert_eq!(state.snake.head(), Cell::new(13, 10));
        assert!(state.score >= 1);
        assert_eq!(state.snake.length_cells, 3 + state.score as usize);
        assert!(state.snake.is_self_disjoint());
    }

    #[test]
    fn test_spawn_timer() {
        let mut config = Config::default();
        config.enemy_spawn_every = 1.5;
        let mut state = GameState::new(config, 8);

        tick(&mut state, &TickInput::default(), DT, 10.0);
        assert_eq!(state.enemies.len(), 1);
        tick(&mut state, &TickInput::default(), DT, 11.0);
        assert_eq!(state.enemies.len(), 1);
        tick(&mut state, &TickInput::default(), DT, 11.5);
        assert_eq!(state.enemies.len(), 2);
    }

    #[test]
    fn test_trail_tracks_budget_every_frame() {
        let mut state = GameState::new(quiet_config(), 12);
        state.last_spawn = Some(0.0);
        let turns = [Direction::Up, Direction::Left, Direction::Down, Direction::Right];
        for frame in 0..240 {
            let input = if frame % 20 == 0 {
                TickInput::turn(turns[(frame / 20) % 4])
            } else {
                TickInput::default()
            };
            tick(&mut state, &input, DT, 0.0);
            if state.is_over() {
                break;
            }
            let budget = state.snake.trail_budget(&state.grid);
            assert!(state.trail.length() <= budget + 1e-2);
            assert!(state.snake.is_self_disjoint());
        }
    }

    #[test]
    fn test_determinism() {
        let run = |seed| {
            let mut state = GameState::new(Config::default(), seed);
            let mut now = 0.0;
            for frame in 0..180u32 {
                let input = match frame % 45 {
                    0 => TickInput::turn(Direction::Down),
                    15 => TickInput::fire(Vec2::new(10.0, 10.0)),
                    30 => TickInput::turn(Direction::Right),
                    _ => TickInput::default(),
                };
                tick(&mut state, &input, DT, now);
                now += DT as f64;
            }
            state
        };
        let a = run(99);
        let b = run(99);
        assert_eq!(a.frame, b.frame);
        assert_eq!(a.snake.head(), b.snake.head());
        assert_eq!(a.apple, b.apple);
        assert_eq!(a.enemies.len(), b.enemies.len());
        for (x, y) in a.enemies.iter().zip(&b.enemies) {
            assert_eq!(x.pos, y.pos);
            assert_eq!(x.kind, y.kind);
        }
    }
}
