//! Star geometry: evenly spaced vertices on a circle.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec2;

use crate::types::VertexIndex;

/// Returns the position of vertex `index` of a `point_count`-pointed star.
///
/// Vertex `0` lies directly above `center` and indices advance clockwise
/// (screen coordinates, y pointing down):
///
/// `angle = index / point_count * 2π - π/2`
///
/// ### Parameters
/// - `index` - Vertex index, expected in `0..point_count`.
/// - `point_count` - Number of vertices, expected to be at least 2.
/// - `center` - Circle center.
/// - `radius` - Circle radius.
///
/// ### Returns
/// The vertex position. The caller guarantees the domain; nothing here can fail.
pub fn vertex_position(
    index: VertexIndex,
    point_count: usize,
    center: Vec2,
    radius: f32,
) -> Vec2 {
    let angle = (index as f32 / point_count as f32) * TAU - FRAC_PI_2;
    let (sin, cos) = angle.sin_cos();
    Vec2::new(center.x + radius * cos, center.y + radius * sin)
}

/// Yields every unordered vertex pair `(i, j)` with `i < j`.
///
/// A star with `n` points has `n * (n - 1) / 2` such pairs.
pub fn edges(point_count: usize) -> impl Iterator<Item = (VertexIndex, VertexIndex)> {
    (0..point_count).flat_map(move |i| (i + 1..point_count).map(move |j| (i, j)))
}

/// Circle that the star vertices are placed on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarLayout {
    pub center: Vec2,
    pub radius: f32,
}

impl StarLayout {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Centers the star on a surface of `size` with a radius of
    /// `radius_fraction` times the shorter side.
    pub fn fit(size: Vec2, radius_fraction: f32) -> Self {
        Self {
            center: size * 0.5,
            radius: size.min_element() * radius_fraction,
        }
    }

    /// Same center, radius multiplied by `factor`.
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            center: self.center,
            radius: self.radius * factor,
        }
    }

    #[inline]
    pub fn vertex(&self, index: VertexIndex, point_count: usize) -> Vec2 {
        vertex_position(index, point_count, self.center, self.radius)
    }

    pub fn vertices(&self, point_count: usize) -> Vec<Vec2> {
        (0..point_count)
            .map(|i| self.vertex(i, point_count))
            .collect()
    }
}
