//! CPU-side rendering module
//!
//! Tessellates a [`Snapshot`] into flat triangle lists. Presenting them on a
//! surface is left to the embedding application.

pub mod shapes;
pub mod vertex;

pub use vertex::Vertex;

use glam::Vec2;

use crate::runner::RenderSink;
use crate::sim::Aabb;
use crate::sim::snapshot::Snapshot;
use vertex::{colors, rgba};

/// Segments used for projectile circles
const CIRCLE_SEGMENTS: u32 = 16;

/// Trail stroke is this much narrower than a cell
const TRAIL_INSET: f32 = 8.0;

/// Build the full draw list for one frame, back to front
pub fn build_scene(snap: &Snapshot) -> Vec<Vertex> {
    let size = snap.cell_size;
    let mut vertices = Vec::new();

    let apple = Aabb::new(snap.apple.as_vec2() * size, Vec2::splat(size));
    vertices.extend(shapes::rect(&apple, rgba(colors::APPLE, 255)));

    vertices.extend(shapes::trail(
        &snap.trail,
        colors::TRAIL,
        size - TRAIL_INSET,
    ));
    vertices.extend(shapes::rect(&snap.head, rgba(colors::HEAD, 255)));

    for enemy in &snap.enemies {
        vertices.extend(shapes::rect(&enemy.rect, rgba(enemy.color, 255)));
    }

    for p in &snap.projectiles {
        vertices.extend(shapes::circle(
            p.pos,
            p.radius,
            rgba(colors::PROJECTILE, p.alpha),
            CIRCLE_SEGMENTS,
        ));
    }

    vertices
}

/// Render sink that tessellates every frame and keeps the last draw list
#[derive(Debug, Default)]
pub struct SceneRenderer {
    vertices: Vec<Vertex>,
    frames: u64,
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw list of the most recent frame
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Raw bytes ready for a vertex buffer upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl RenderSink for SceneRenderer {
    fn draw(&mut self, snapshot: &Snapshot) {
        self.vertices = build_scene(snapshot);
        self.frames += 1;
        log::trace!(
            "frame {}: {} vertices ({} enemies, {} projectiles)",
            snapshot.frame,
            self.vertices.len(),
            snapshot.enemies.len(),
            snapshot.projectiles.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::sim::{Archetype, Cell, GameState};

    #[test]
    fn test_scene_counts() {
        let mut state = GameState::new(Config::default(), 4);
        state.spawn_enemy_at(Archetype::Pink, Cell::new(0, 0));
        state.fire(Vec2::X);
        let snap = Snapshot::capture(&state);

        let scene = build_scene(&snap);
        // apple + head + one enemy quad, one circle, no trail yet
        let expected = 6 + 6 + 6 + (CIRCLE_SEGMENTS * 3) as usize;
        assert_eq!(snap.trail.len(), 0);
        assert_eq!(scene.len(), expected);
    }

    #[test]
    fn test_enemy_uses_archetype_color() {
        let mut state = GameState::new(Config::default(), 4);
        state.spawn_enemy_at(Archetype::Maroon, Cell::new(3, 3));
        let scene = build_scene(&Snapshot::capture(&state));
        let maroon = rgba([128, 0, 32], 255);
        assert_eq!(scene.iter().filter(|v| v.color == maroon).count(), 6);
    }

    #[test]
    fn test_renderer_sink_keeps_last_frame() {
        let state = GameState::new(Config::default(), 4);
        let mut renderer = SceneRenderer::new();
        renderer.draw(&Snapshot::capture(&state));
        assert_eq!(renderer.frames(), 1);
        assert_eq!(
            renderer.vertex_bytes().len(),
            renderer.vertices().len() * std::mem::size_of::<Vertex>()
        );
    }
}
