//! # Shape Batching
//!
//! [`ShapeBatch`] is the drawing surface the particle network renders into
//! when running under the wgpu host. Draw calls are tessellated on the CPU
//! into a flat triangle list which the [`RenderEngine`](super::RenderEngine)
//! uploads once per frame.
//!
//! Circles become triangle fans around their center, lines become quads of
//! the requested width. Triangles are emitted in call order, so later shapes
//! blend over earlier ones exactly like a canvas.

use cgmath::{InnerSpace, Vector2};
use std::f32::consts::PI;

use super::{color::Rgba, vertex::Vertex2D};
use crate::simulation::traits::DrawSurface;

/// Segments used to approximate a circle
///
/// Particles are a few pixels wide, so a dozen segments is indistinguishable
/// from a true circle.
pub const DEFAULT_CIRCLE_SEGMENTS: u32 = 12;

/// CPU-side triangle list for one frame of 2D shapes
#[derive(Debug, Clone)]
pub struct ShapeBatch {
    size: (u32, u32),
    vertices: Vec<Vertex2D>,
    circle_segments: u32,
    circle_count: usize,
    line_count: usize,
}

impl ShapeBatch {
    pub fn new() -> Self {
        Self::with_circle_segments(DEFAULT_CIRCLE_SEGMENTS)
    }

    /// Creates a batch using `segments` triangles per circle (minimum 3)
    pub fn with_circle_segments(segments: u32) -> Self {
        Self {
            size: (0, 0),
            vertices: Vec::new(),
            circle_segments: segments.max(3),
            circle_count: 0,
            line_count: 0,
        }
    }

    /// Triangle-list vertices for everything drawn since the last clear
    pub fn vertices(&self) -> &[Vertex2D] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn circle_count(&self) -> usize {
        self.circle_count
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    fn push_triangle(
        &mut self,
        a: Vector2<f32>,
        b: Vector2<f32>,
        c: Vector2<f32>,
        color: [f32; 4],
    ) {
        for p in [a, b, c] {
            self.vertices.push(Vertex2D {
                position: [p.x, p.y],
                color,
            });
        }
    }
}

impl Default for ShapeBatch {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawSurface for ShapeBatch {
    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    /// Drops all shapes but keeps the vertex allocation for the next frame
    fn clear(&mut self) {
        self.vertices.clear();
        self.circle_count = 0;
        self.line_count = 0;
    }

    fn fill_circle(&mut self, center: Vector2<f32>, radius: f32, color: Rgba) {
        if radius <= 0.0 {
            return;
        }

        let color = color.to_array();
        let step = 2.0 * PI / self.circle_segments as f32;
        let rim = |i: u32| {
            let angle = i as f32 * step;
            center + Vector2::new(angle.cos(), angle.sin()) * radius
        };

        for i in 0..self.circle_segments {
            self.push_triangle(center, rim(i), rim(i + 1), color);
        }
        self.circle_count += 1;
    }

    fn stroke_line(&mut self, from: Vector2<f32>, to: Vector2<f32>, width: f32, color: Rgba) {
        let direction = to - from;
        let length = direction.magnitude();
        // Degenerate segments have no orientation and cover no pixels
        if length <= f32::EPSILON || width <= 0.0 {
            return;
        }

        let normal = Vector2::new(-direction.y, direction.x) / length * (width * 0.5);
        let color = color.to_array();

        let a = from + normal;
        let b = from - normal;
        let c = to - normal;
        let d = to + normal;
        self.push_triangle(a, b, c, color);
        self.push_triangle(c, d, a, color);
        self.line_count += 1;
    }
}
