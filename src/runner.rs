//! Frame loop driver
//!
//! Owns the simulation state and its collaborators: an input source, a frame
//! clock, a render sink and a HUD sink. One call to [`FrameLoop::step`] is one
//! displayed frame.

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::consts::{MAX_FRAME_DT, TARGET_FPS};
use crate::sim::{
    Autopilot, GameEvent, GameOverCause, GamePhase, GameState, HudInfo, Snapshot, TickInput, tick,
};

/// Supplies the player's intents for the coming frame
pub trait InputSource {
    fn poll(&mut self, state: &GameState) -> TickInput;
}

/// Paces frames and reports elapsed time
pub trait FrameClock {
    /// Block until the next frame is due and return the seconds since the last one
    fn wait_for_frame(&mut self) -> f32;
    /// Seconds since the clock started
    fn now(&self) -> f64;
}

pub trait RenderSink {
    fn draw(&mut self, snapshot: &Snapshot);
}

pub trait HudSink {
    fn show(&mut self, hud: &HudInfo);
}

impl InputSource for Autopilot {
    fn poll(&mut self, state: &GameState) -> TickInput {
        self.decide(state)
    }
}

/// Wall clock capped at a target frame rate
#[derive(Debug)]
pub struct RealtimeClock {
    start: Instant,
    last: Instant,
    frame: Duration,
}

impl RealtimeClock {
    pub fn new(fps: u32) -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last: now,
            frame: Duration::from_secs_f64(1.0 / fps.max(1) as f64),
        }
    }
}

impl Default for RealtimeClock {
    fn default() -> Self {
        Self::new(TARGET_FPS)
    }
}

impl FrameClock for RealtimeClock {
    fn wait_for_frame(&mut self) -> f32 {
        let due = self.last + self.frame;
        let now = Instant::now();
        if now < due {
            std::thread::sleep(due - now);
        }
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        dt
    }

    fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Constant-step clock for headless runs and tests
#[derive(Debug, Clone)]
pub struct FixedClock {
    dt: f32,
    time: f64,
}

impl FixedClock {
    pub fn new(dt: f32) -> Self {
        Self { dt, time: 0.0 }
    }
}

impl FrameClock for FixedClock {
    fn wait_for_frame(&mut self) -> f32 {
        self.time += self.dt as f64;
        self.dt
    }

    fn now(&self) -> f64 {
        self.time
    }
}

const FPS_SAMPLES: usize = 60;

/// Frame rate over the last 60 frames
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frame_times: [f64; FPS_SAMPLES],
    frame_index: usize,
    filled: usize,
    fps: u32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            frame_times: [0.0; FPS_SAMPLES],
            frame_index: 0,
            filled: 0,
            fps: 0,
        }
    }
}

impl FpsCounter {
    /// Record a frame timestamp (seconds) and return the updated rate
    pub fn record(&mut self, time: f64) -> u32 {
        self.frame_times[self.frame_index] = time;
        self.frame_index = (self.frame_index + 1) % FPS_SAMPLES;
        self.filled = (self.filled + 1).min(FPS_SAMPLES);

        if self.filled > 1 {
            let oldest_idx = if self.filled == FPS_SAMPLES {
                self.frame_index
            } else {
                0
            };
            let elapsed = time - self.frame_times[oldest_idx];
            if elapsed > 0.0 {
                self.fps = ((self.filled - 1) as f64 / elapsed).round() as u32;
            }
        }
        self.fps
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

/// HUD sink that logs the readout once per second of frames
#[derive(Debug, Default)]
pub struct LogHud {
    shown: u64,
}

impl HudSink for LogHud {
    fn show(&mut self, hud: &HudInfo) {
        if self.shown % TARGET_FPS as u64 == 0 {
            log::debug!(
                "fps {} | head ({:.0}, {:.0}) | score {} | speed {} cells/s",
                hud.fps,
                hud.head_px.x,
                hud.head_px.y,
                hud.score,
                hud.speed_cells
            );
        }
        self.shown += 1;
    }
}

/// Outcome of a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunSummary {
    pub frames: u64,
    pub score: u32,
    pub cause: Option<GameOverCause>,
    pub kills: u32,
}

pub struct FrameLoop<I, C, R, H> {
    state: GameState,
    input: I,
    clock: C,
    renderer: R,
    hud: H,
    fps: FpsCounter,
    frames: u64,
    kills: u32,
}

impl<I, C, R, H> FrameLoop<I, C, R, H>
where
    I: InputSource,
    C: FrameClock,
    R: RenderSink,
    H: HudSink,
{
    pub fn new(state: GameState, input: I, clock: C, renderer: R, hud: H) -> Self {
        Self {
            state,
            input,
            clock,
            renderer,
            hud,
            fps: FpsCounter::default(),
            frames: 0,
            kills: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn hud(&self) -> &H {
        &self.hud
    }

    /// Run one frame. Returns false once the game is over.
    pub fn step(&mut self) -> bool {
        let dt = self.clock.wait_for_frame().clamp(0.0, MAX_FRAME_DT);
        let now = self.clock.now();

        let input = self.input.poll(&self.state);
        tick(&mut self.state, &input, dt, now);
        self.frames += 1;

        for event in self.state.drain_events() {
            self.on_event(&event);
        }

        let fps = self.fps.record(now);
        self.renderer.draw(&Snapshot::capture(&self.state));
        self.hud.show(&HudInfo::capture(&self.state, fps));

        !self.state.is_over()
    }

    /// Run until the game ends or `max_frames` frames have been shown
    pub fn run(&mut self, max_frames: Option<u64>) -> RunSummary {
        log::info!("Frame loop starting (seed {})", self.state.seed);
        while !self.state.is_over() && max_frames.is_none_or(|max| self.frames < max) {
            if !self.step() {
                break;
            }
        }
        let summary = self.summary();
        log::info!(
            "Frame loop stopped after {} frames: score {}, kills {}",
            summary.frames,
            summary.score,
            summary.kills
        );
        summary
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            frames: self.frames,
            score: self.state.score,
            cause: match self.state.phase {
                GamePhase::GameOver(cause) => Some(cause),
                GamePhase::Playing => None,
            },
            kills: self.kills,
        }
    }

    fn on_event(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::AppleEaten { cell, score } => {
                log::debug!("Apple eaten at ({}, {}), score {}", cell.x, cell.y, score);
            }
            GameEvent::EnemySpawned { id, kind, cell } => {
                log::debug!("Enemy {} ({:?}) spawned at ({}, {})", id, kind, cell.x, cell.y);
            }
            GameEvent::ProjectileFired { id, velocity } => {
                log::trace!("Projectile {} fired, velocity {:?}", id, velocity);
            }
            GameEvent::EnemyHit { id, hp_left } => {
                log::debug!("Enemy {} hit, {} hp left", id, hp_left);
            }
            GameEvent::EnemyKilled { id, kind } => {
                self.kills += 1;
                log::debug!("Enemy {} ({:?}) killed", id, kind);
            }
            GameEvent::GameOver { cause } => {
                log::info!("Game over: {:?}", cause);
            }
        }
    }
}
