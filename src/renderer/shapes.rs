//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::sim::Aabb;
use crate::sim::snapshot::TrailSegment;

/// Generate vertices for a filled axis-aligned rectangle
pub fn rect(r: &Aabb, color: [f32; 4]) -> Vec<Vertex> {
    let min = r.min;
    let max = r.max();
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Generate vertices for a fading trail, one quad per segment
pub fn trail(segments: &[TrailSegment], rgb: [u8; 3], width: f32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(segments.len() * 6);
    let half = width.max(2.0) / 2.0;

    for seg in segments {
        let dir = (seg.to - seg.from).normalize_or_zero();
        if dir == Vec2::ZERO {
            continue;
        }
        let color = super::vertex::rgba(rgb, seg.alpha);
        // Perpendicular for width
        let perp = Vec2::new(-dir.y, dir.x) * half;
        // Extend along the segment so corners join without gaps
        let a = seg.from - dir * half;
        let b = seg.to + dir * half;

        let v1a = a + perp;
        let v1b = a - perp;
        let v2a = b + perp;
        let v2b = b - perp;

        // Two triangles
        vertices.push(Vertex::new(v1a.x, v1a.y, color));
        vertices.push(Vertex::new(v1b.x, v1b.y, color));
        vertices.push(Vertex::new(v2a.x, v2a.y, color));

        vertices.push(Vertex::new(v2a.x, v2a.y, color));
        vertices.push(Vertex::new(v1b.x, v1b.y, color));
        vertices.push(Vertex::new(v2b.x, v2b.y, color));
    }

    vertices
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}
