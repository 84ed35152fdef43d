//! Smooth trail behind the head
//!
//! One point is sampled per frame at the interpolated head position. The
//! polyline is cut back to an exact pixel budget: the oldest kept point is
//! interpolated along its segment rather than dropped.

use std::collections::VecDeque;

use glam::Vec2;

/// Trail polyline, oldest point first
#[derive(Debug, Clone, Default)]
pub struct Trail {
    points: VecDeque<Vec2>,
}

impl Trail {
    pub fn new(start: Vec2) -> Self {
        let mut points = VecDeque::new();
        points.push_back(start);
        Self { points }
    }

    /// Sample the head and trim to `max_len` pixels
    pub fn record(&mut self, head: Vec2, max_len: f32) {
        self.points.push_back(head);
        self.trim_to_length(max_len);
    }

    /// Cut the oldest end so the polyline is at most `max_len` long
    pub fn trim_to_length(&mut self, max_len: f32) {
        if self.points.len() <= 1 {
            return;
        }

        let mut total = 0.0;
        // Walk newest to oldest; segment (i-1, i)
        for i in (1..self.points.len()).rev() {
            let newer = self.points[i];
            let older = self.points[i - 1];
            let seg = newer.distance(older);

            if total + seg >= max_len {
                let leftover = (max_len - total).max(0.0);
                let cut = if seg > f32::EPSILON {
                    newer + (older - newer) * (leftover / seg)
                } else {
                    newer
                };
                self.points.drain(..i - 1);
                self.points[0] = cut;
                return;
            }
            total += seg;
        }
    }

    /// Cumulative polyline length in pixels
    pub fn length(&self) -> f32 {
        self.points
            .iter()
            .zip(self.points.iter().skip(1))
            .map(|(a, b)| a.distance(*b))
            .sum()
    }

    pub fn points(&self) -> impl ExactSizeIterator<Item = &Vec2> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Segments with alpha rising from `fade_to` (oldest) toward 255 (newest)
    pub fn segments(&self, fade_to: u8) -> Vec<(Vec2, Vec2, u8)> {
        let n = self.points.len().saturating_sub(1);
        let fade = fade_to as f32;
        (0..n)
            .map(|i| {
                let alpha = fade + (255.0 - fade) * (i + 1) as f32 / (n + 1) as f32;
                (self.points[i], self.points[i + 1], alpha as u8)
            })
            .collect()
    }
}
