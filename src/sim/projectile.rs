//! Projectiles: straight-line flight, then a short impact fade

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Heading used when the aim point sits exactly on the muzzle
pub const FALLBACK_AIM: Vec2 = Vec2::X;

/// Flight state of a projectile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ProjectileState {
    Flying,
    /// Stopped on a target; `elapsed` seconds since impact
    Hit { elapsed: f32 },
}

/// Projectile tuning shared by every shot
#[derive(Debug, Clone, Copy)]
pub struct ProjectileParams {
    pub speed: f32,
    pub radius: f32,
    pub fade_time: f32,
    pub growth: f32,
    /// Visible area side length (pixels)
    pub bounds: f32,
    pub cull_margin: f32,
}

/// A projectile entity
#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub state: ProjectileState,
    /// 0-255
    pub alpha: u8,
}

impl Projectile {
    /// Fire from `origin` toward `aim` at the configured speed
    pub fn fire(id: u32, origin: Vec2, aim: Vec2, params: &ProjectileParams) -> Self {
        let dir = match (aim - origin).try_normalize() {
            Some(dir) => dir,
            None => FALLBACK_AIM,
        };
        Self {
            id,
            pos: origin,
            vel: dir * params.speed,
            radius: params.radius,
            state: ProjectileState::Flying,
            alpha: 255,
        }
    }

    #[inline]
    pub fn is_hit(&self) -> bool {
        matches!(self.state, ProjectileState::Hit { .. })
    }

    /// Stop on impact and start the fade
    pub fn mark_hit(&mut self) {
        self.vel = Vec2::ZERO;
        self.alpha = 255;
        self.state = ProjectileState::Hit { elapsed: 0.0 };
    }

    /// Advance one frame. Returns false once the projectile should be culled.
    pub fn update(&mut self, dt: f32, params: &ProjectileParams) -> bool {
        match &mut self.state {
            ProjectileState::Flying => {
                self.pos += self.vel * dt;
                let lo = -params.cull_margin;
                let hi = params.bounds + params.cull_margin;
                !(self.pos.x < lo || self.pos.x > hi || self.pos.y < lo || self.pos.y > hi)
            }
            ProjectileState::Hit { elapsed } => {
                *elapsed += dt;
                let t = *elapsed / params.fade_time;
                self.radius = params.radius * (1.0 + params.growth * t);
                self.alpha = (255.0 * (1.0 - t)).clamp(0.0, 255.0) as u8;
                *elapsed < params.fade_time
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> ProjectileParams {
        ProjectileParams {
            speed: 700.0,
            radius: 5.0,
            fade_time: 0.25,
            growth: 0.6,
            bounds: 800.0,
            cull_margin: 50.0,
        }
    }

    #[test]
    fn test_fire_normalizes_to_speed() {
        let p = Projectile::fire(1, Vec2::new(100.0, 100.0), Vec2::new(103.0, 104.0), &params());
        assert!((p.vel.length() - 700.0).abs() < 1e-3);
        assert!((p.vel - Vec2::new(420.0, 560.0)).length() < 1e-3);
    }

    #[test]
    fn test_fire_at_self_uses_fallback() {
        let origin = Vec2::new(210.0, 210.0);
        let p = Projectile::fire(1, origin, origin, &params());
        assert_eq!(p.vel, FALLBACK_AIM * 700.0);
        assert!(p.vel.length() > 0.0);
        assert!(p.vel.is_finite());
    }

    #[test]
    fn test_culled_past_margin() {
        let mut p = Projectile::fire(1, Vec2::new(790.0, 400.0), Vec2::new(900.0, 400.0), &params());
        assert!(p.update(0.05, &params())); // x = 825
        assert!(!p.update(0.05, &params())); // x = 860
    }

    #[test]
    fn test_hit_fade() {
        let mut p = Projectile::fire(1, Vec2::ZERO, Vec2::X, &params());
        p.mark_hit();
        assert!(p.is_hit());
        assert_eq!(p.vel, Vec2::ZERO);

        assert!(p.update(0.125, &params()));
        assert_eq!(p.pos, Vec2::ZERO);
        assert!((p.radius - 6.5).abs() < 1e-4);
        assert_eq!(p.alpha, 127);

        assert!(!p.update(0.125, &params()));
        assert_eq!(p.alpha, 0);
    }
}
