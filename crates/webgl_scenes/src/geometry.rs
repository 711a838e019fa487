//! Demo geometry and the CPU clip-space check.
//!
//! The demos draw a letter "F": three rectangles in 2D, or the same outline
//! extruded 30 units deep in 3D. [`clip_bounds`] runs the vertices through a
//! matrix exactly like the vertex shader (`u_matrix * a_position`) followed by
//! the perspective divide, which is enough to tell whether a frame puts
//! anything on screen.

use serde::{Deserialize, Serialize};
use webgl_math::{Matrix3, Matrix4, Vector2, Vector3};

use crate::error::SceneError;

/// Width and height of the F's bounding box, in model units.
pub const F_SIZE: Vector2 = Vector2::new(100.0, 150.0);

/// Thickness of the extruded 3D F.
pub const F_DEPTH: f32 = 30.0;

/// The three rectangles of the F: left column, top rung, middle rung.
const F_RECTS: [(f32, f32, f32, f32); 3] = [
    (0.0, 0.0, 30.0, 150.0),
    (30.0, 0.0, 100.0, 30.0),
    (30.0, 60.0, 67.0, 90.0),
];

/// The flat F: 3 rectangles, 18 vertices.
#[must_use]
pub fn f_shape_2d() -> Vec<Vector2> {
    let mut vertices = Vec::with_capacity(18);
    for (x1, y1, x2, y2) in F_RECTS {
        vertices.extend([
            Vector2::new(x1, y1),
            Vector2::new(x2, y1),
            Vector2::new(x1, y2),
            Vector2::new(x1, y2),
            Vector2::new(x2, y1),
            Vector2::new(x2, y2),
        ]);
    }
    vertices
}

/// The extruded F: 16 quads, 96 vertices.
///
/// Front and back faces repeat the three rectangles at `z = 0` and
/// `z = F_DEPTH`; the remaining ten quads walk the outline.
#[must_use]
pub fn f_shape_3d() -> Vec<Vector3> {
    let mut vertices = Vec::with_capacity(96);

    for z in [0.0, F_DEPTH] {
        for (x1, y1, x2, y2) in F_RECTS {
            push_quad(
                &mut vertices,
                [
                    Vector3::new(x1, y1, z),
                    Vector3::new(x2, y1, z),
                    Vector3::new(x2, y2, z),
                    Vector3::new(x1, y2, z),
                ],
            );
        }
    }

    // (x1, y1, x2, y2) edges of the outline, swept along Z.
    let outline: [(f32, f32, f32, f32); 10] = [
        (0.0, 0.0, 100.0, 0.0),
        (100.0, 0.0, 100.0, 30.0),
        (30.0, 30.0, 100.0, 30.0),
        (30.0, 30.0, 30.0, 60.0),
        (30.0, 60.0, 67.0, 60.0),
        (67.0, 60.0, 67.0, 90.0),
        (30.0, 90.0, 67.0, 90.0),
        (30.0, 90.0, 30.0, 150.0),
        (0.0, 150.0, 30.0, 150.0),
        (0.0, 0.0, 0.0, 150.0),
    ];
    for (x1, y1, x2, y2) in outline {
        push_quad(
            &mut vertices,
            [
                Vector3::new(x1, y1, 0.0),
                Vector3::new(x2, y2, 0.0),
                Vector3::new(x2, y2, F_DEPTH),
                Vector3::new(x1, y1, F_DEPTH),
            ],
        );
    }

    vertices
}

fn push_quad(out: &mut Vec<Vector3>, [a, b, c, d]: [Vector3; 4]) {
    out.extend([a, b, c, a, c, d]);
}

/// Axis-aligned bounds in normalized device coordinates.
///
/// An empty vertex list yields `min > max`, which is never visible.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipBounds {
    pub min: Vector3,
    pub max: Vector3,
}

impl ClipBounds {
    fn empty() -> Self {
        Self {
            min: Vector3::splat(f32::INFINITY),
            max: Vector3::splat(f32::NEG_INFINITY),
        }
    }

    fn include(&mut self, p: Vector3) {
        self.min = Vector3::new(self.min.x.min(p.x), self.min.y.min(p.y), self.min.z.min(p.z));
        self.max = Vector3::new(self.max.x.max(p.x), self.max.y.max(p.y), self.max.z.max(p.z));
    }

    /// Whether the box overlaps the canonical clip cube `[-1, 1]³`.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.min.x <= 1.0
            && self.max.x >= -1.0
            && self.min.y <= 1.0
            && self.max.y >= -1.0
            && self.min.z <= 1.0
            && self.max.z >= -1.0
    }

    /// Whether the box lies entirely inside the clip cube.
    #[must_use]
    pub fn is_contained(&self) -> bool {
        [self.min, self.max]
            .iter()
            .all(|p| p.to_array().iter().all(|c| (-1.0..=1.0).contains(c)))
    }
}

/// Project 3D vertices through `matrix` and divide by `w`.
///
/// # Errors
///
/// Returns [`SceneError::BehindCamera`] for the first vertex with `w <= 0`.
pub fn clip_bounds(matrix: &Matrix4, vertices: &[Vector3]) -> Result<ClipBounds, SceneError> {
    let mut bounds = ClipBounds::empty();
    for (index, vertex) in vertices.iter().enumerate() {
        let clip = matrix.transform_point(*vertex);
        if clip.w <= 0.0 {
            return Err(SceneError::BehindCamera { index, w: clip.w });
        }
        bounds.include(clip.truncate().scale(1.0 / clip.w));
    }
    Ok(bounds)
}

/// Project 2D vertices through `matrix`; `z` is reported as 0.
#[must_use]
pub fn clip_bounds_2d(matrix: &Matrix3, vertices: &[Vector2]) -> ClipBounds {
    let mut bounds = ClipBounds::empty();
    for vertex in vertices {
        let p = matrix.transform_point(*vertex);
        bounds.include(Vector3::new(p.x, p.y, 0.0));
    }
    bounds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_counts() {
        assert_eq!(f_shape_2d().len(), 18);
        assert_eq!(f_shape_3d().len(), 96);
    }

    #[test]
    fn test_3d_shape_extent() {
        let bounds = clip_bounds(&Matrix4::IDENTITY, &f_shape_3d()).unwrap();
        assert_eq!(bounds.min, Vector3::ZERO);
        assert_eq!(bounds.max, Vector3::new(F_SIZE.x, F_SIZE.y, F_DEPTH));
    }

    #[test]
    fn test_2d_projection_bounds() {
        let matrix = Matrix3::projection(F_SIZE.x, F_SIZE.y);
        let bounds = clip_bounds_2d(&matrix, &f_shape_2d());
        assert!((bounds.min.x + 1.0).abs() < 1.0e-5);
        assert!((bounds.max.x - 1.0).abs() < 1.0e-5);
        assert!((bounds.max.y - 1.0).abs() < 1.0e-5);
        assert!(bounds.is_visible());
    }

    #[test]
    fn test_offscreen_is_not_visible() {
        let matrix = Matrix3::projection(400.0, 300.0).translate(1000.0, 0.0);
        let bounds = clip_bounds_2d(&matrix, &f_shape_2d());
        assert!(!bounds.is_visible());
    }

    #[test]
    fn test_behind_camera() {
        let matrix = Matrix4::perspective(1.0, 1.0, 1.0, 100.0).translate(0.0, 0.0, 50.0);
        let result = clip_bounds(&matrix, &f_shape_3d());
        assert!(matches!(result, Err(SceneError::BehindCamera { index: 0, .. })));
    }

    #[test]
    fn test_empty_is_not_visible() {
        assert!(!clip_bounds_2d(&Matrix3::IDENTITY, &[]).is_visible());
    }
}
