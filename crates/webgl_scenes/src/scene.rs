//! The demo scenes.
//!
//! Each [`Scene`] reproduces the uniform matrices one demo uploads per frame.
//! Scenes own their animation state; [`Scene::update`] advances it and
//! [`Scene::draw_calls`] evaluates the current frame against a
//! [`SceneConfig`].

use std::f32::consts::{FRAC_PI_8, TAU};

use serde::{Deserialize, Serialize};
use webgl_math::{Matrix3, Matrix4, Transform2D, Transform3D, Vector2, Vector3};

use crate::config::SceneConfig;
use crate::error::SceneError;
use crate::geometry::{self, ClipBounds};

/// The available scenes, in demo order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SceneKind {
    /// A 2D F placed with a 3×3 matrix chain.
    #[value(name = "matrices-2d")]
    #[serde(rename = "matrices-2d")]
    Matrices2d,
    /// A 3D F under the pixel-space projection.
    OrthoDepth,
    /// A 3D F under a perspective projection.
    Perspective,
    /// A ring of Fs seen by a `look_at` camera.
    CameraRing,
    /// A camera orbiting a single F.
    OrbitCamera,
    /// A spinning F under a perspective camera.
    SpinningModel,
}

impl SceneKind {
    pub const ALL: [SceneKind; 6] = [
        SceneKind::Matrices2d,
        SceneKind::OrthoDepth,
        SceneKind::Perspective,
        SceneKind::CameraRing,
        SceneKind::OrbitCamera,
        SceneKind::SpinningModel,
    ];

    /// Create the scene in its initial state.
    #[must_use]
    pub fn build(self) -> Box<dyn Scene> {
        match self {
            SceneKind::Matrices2d => Box::new(Matrices2d::default()),
            SceneKind::OrthoDepth => Box::new(OrthoDepth::default()),
            SceneKind::Perspective => Box::new(Perspective::default()),
            SceneKind::CameraRing => Box::new(CameraRing::default()),
            SceneKind::OrbitCamera => Box::new(OrbitCameraScene::default()),
            SceneKind::SpinningModel => Box::new(SpinningModel::default()),
        }
    }
}

/// A matrix uniform as uploaded: 9 elements for `mat3`, 16 for `mat4`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum UniformMatrix {
    Mat3(Matrix3),
    Mat4(Matrix4),
}

impl UniformMatrix {
    /// The elements in upload order.
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        match self {
            UniformMatrix::Mat3(m) => m.as_slice(),
            UniformMatrix::Mat4(m) => m.as_slice(),
        }
    }
}

/// One `drawArrays` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawCall {
    /// The `u_matrix` uniform.
    pub matrix: UniformMatrix,
    /// Number of vertices drawn.
    pub vertex_count: usize,
    /// Where the geometry lands after the perspective divide; `None` if part
    /// of it is behind the camera.
    pub bounds: Option<ClipBounds>,
}

impl DrawCall {
    fn flat(matrix: Matrix3) -> Self {
        let vertices = geometry::f_shape_2d();
        Self {
            matrix: UniformMatrix::Mat3(matrix),
            vertex_count: vertices.len(),
            bounds: Some(geometry::clip_bounds_2d(&matrix, &vertices)),
        }
    }

    fn solid(matrix: Matrix4) -> Result<Self, SceneError> {
        let vertices = geometry::f_shape_3d();
        let bounds = match geometry::clip_bounds(&matrix, &vertices) {
            Ok(bounds) => Some(bounds),
            Err(SceneError::BehindCamera { .. }) => None,
            Err(e) => return Err(e),
        };
        Ok(Self {
            matrix: UniformMatrix::Mat4(matrix),
            vertex_count: vertices.len(),
            bounds,
        })
    }

    /// Whether any of the geometry can reach the screen.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.bounds.is_none_or(|b| b.is_visible())
    }
}

/// A demo scene.
pub trait Scene: Send {
    fn kind(&self) -> SceneKind;

    /// Advance animation state by `delta_ms` milliseconds.
    fn update(&mut self, _delta_ms: f32) {}

    /// Compute this frame's draw calls.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Math`] if a camera cannot be built.
    fn draw_calls(&self, config: &SceneConfig) -> Result<Vec<DrawCall>, SceneError>;
}

/// A camera on a horizontal circle around `target`, looking at it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitCamera {
    /// Position on the circle, in degrees about +Y.
    pub angle_degrees: f32,
    /// Distance from the circle's center (the world origin).
    pub radius: f32,
    /// Point the camera looks at.
    pub target: Vector3,
}

impl OrbitCamera {
    /// Degrees per millisecond used by the animated orbit.
    pub const ORBIT_SPEED: f32 = 0.1;

    #[must_use]
    pub fn new(angle_degrees: f32, radius: f32, target: Vector3) -> Self {
        Self {
            angle_degrees,
            radius,
            target,
        }
    }

    /// Camera position in world space.
    #[must_use]
    pub fn eye(&self) -> Vector3 {
        Matrix4::y_rotation(self.angle_degrees.to_radians())
            .translate(0.0, 0.0, self.radius)
            .translation_part()
    }

    /// The world-to-camera matrix.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Math`] if the eye coincides with the target or
    /// the camera matrix is singular.
    pub fn view_matrix(&self) -> Result<Matrix4, SceneError> {
        let camera = Matrix4::look_at(self.eye(), self.target, Vector3::Y)?;
        Ok(camera.inverse()?)
    }

    /// `projection · view` for the given config.
    ///
    /// # Errors
    ///
    /// See [`OrbitCamera::view_matrix`].
    pub fn view_projection(&self, config: &SceneConfig) -> Result<Matrix4, SceneError> {
        let view = self.view_matrix()?;
        Ok(perspective(config).multiply(&view))
    }

    /// The orbit scene's camera: `camera_radius` from the origin.
    fn orbiting(config: &SceneConfig, angle_degrees: f32) -> Self {
        Self::new(angle_degrees, config.camera_radius, Vector3::ZERO)
    }
}

fn perspective(config: &SceneConfig) -> Matrix4 {
    Matrix4::perspective(
        config.field_of_view_radians(),
        config.aspect(),
        config.z_near,
        config.z_far,
    )
}

/// Projection, translation, rotation, scale and a pivot offset on a 3×3 chain.
#[derive(Debug, Clone)]
pub struct Matrices2d {
    pub transform: Transform2D,
}

impl Default for Matrices2d {
    fn default() -> Self {
        Self {
            transform: Transform2D {
                translation: Vector2::new(150.0, 150.0),
                rotation_degrees: 10.0,
                scale: Vector2::new(0.9, 0.9),
                origin: Vector2::new(50.0, 75.0),
            },
        }
    }
}

impl Scene for Matrices2d {
    fn kind(&self) -> SceneKind {
        SceneKind::Matrices2d
    }

    fn draw_calls(&self, config: &SceneConfig) -> Result<Vec<DrawCall>, SceneError> {
        let projection = Matrix3::projection(config.canvas_width, config.canvas_height);
        Ok(vec![DrawCall::flat(self.transform.apply_to(&projection))])
    }
}

/// A 3D F under [`Matrix4::projection`].
#[derive(Debug, Clone)]
pub struct OrthoDepth {
    pub transform: Transform3D,
}

impl Default for OrthoDepth {
    fn default() -> Self {
        Self {
            transform: Transform3D::from_translation(Vector3::splat(150.0))
                .with_rotation(Vector3::splat(FRAC_PI_8))
                .with_scale(Vector3::splat(2.0)),
        }
    }
}

impl Scene for OrthoDepth {
    fn kind(&self) -> SceneKind {
        SceneKind::OrthoDepth
    }

    fn draw_calls(&self, config: &SceneConfig) -> Result<Vec<DrawCall>, SceneError> {
        let projection =
            Matrix4::projection(config.canvas_width, config.canvas_height, config.depth);
        Ok(vec![DrawCall::solid(self.transform.apply_to(&projection))?])
    }
}

/// A 3D F pushed 200 units in front of a perspective camera.
#[derive(Debug, Clone)]
pub struct Perspective {
    pub transform: Transform3D,
}

impl Default for Perspective {
    fn default() -> Self {
        Self {
            transform: Transform3D::from_translation(Vector3::new(0.0, 0.0, -200.0))
                .with_rotation(Vector3::new(FRAC_PI_8, FRAC_PI_8, 0.0)),
        }
    }
}

impl Scene for Perspective {
    fn kind(&self) -> SceneKind {
        SceneKind::Perspective
    }

    fn draw_calls(&self, config: &SceneConfig) -> Result<Vec<DrawCall>, SceneError> {
        Ok(vec![DrawCall::solid(self.transform.apply_to(&perspective(config)))?])
    }
}

/// Fs evenly spaced on a circle, viewed from outside the circle.
#[derive(Debug, Clone)]
pub struct CameraRing {
    /// Number of Fs on the ring.
    pub count: usize,
    /// Camera position on its orbit, in degrees.
    pub camera_angle_degrees: f32,
}

impl Default for CameraRing {
    fn default() -> Self {
        Self {
            count: 5,
            camera_angle_degrees: 105.0,
        }
    }
}

impl Scene for CameraRing {
    fn kind(&self) -> SceneKind {
        SceneKind::CameraRing
    }

    fn draw_calls(&self, config: &SceneConfig) -> Result<Vec<DrawCall>, SceneError> {
        let radius = config.camera_radius;
        // The camera stays outside the ring and looks at the first F.
        let camera = OrbitCamera::new(
            self.camera_angle_degrees,
            radius * 1.5,
            Vector3::new(radius, 0.0, 0.0),
        );
        let view_projection = camera.view_projection(config)?;

        (0..self.count)
            .map(|i| {
                let angle = i as f32 * TAU / self.count as f32;
                let x = angle.cos() * radius;
                let z = angle.sin() * radius;
                DrawCall::solid(view_projection.translate(x, 0.0, z))
            })
            .collect()
    }
}

/// A single F at the origin with the camera circling it.
#[derive(Debug, Clone, Default)]
pub struct OrbitCameraScene {
    pub camera_angle_degrees: f32,
}

impl Scene for OrbitCameraScene {
    fn kind(&self) -> SceneKind {
        SceneKind::OrbitCamera
    }

    fn update(&mut self, delta_ms: f32) {
        self.camera_angle_degrees =
            (self.camera_angle_degrees + OrbitCamera::ORBIT_SPEED * delta_ms) % 360.0;
    }

    fn draw_calls(&self, config: &SceneConfig) -> Result<Vec<DrawCall>, SceneError> {
        let camera = OrbitCamera::orbiting(config, self.camera_angle_degrees);
        Ok(vec![DrawCall::solid(camera.view_projection(config)?)?])
    }
}

/// An F spinning one degree per frame about its Y axis.
///
/// The model chain is appended to the projection and the view matrix is
/// applied before it, so the spin happens in camera space.
#[derive(Debug, Clone, Default)]
pub struct SpinningModel {
    pub transform: Transform3D,
    pub camera_angle_degrees: f32,
}

impl SpinningModel {
    /// Radians added to the Y rotation on every frame.
    pub const SPIN_PER_FRAME: f32 = TAU / 360.0;
}

impl Scene for SpinningModel {
    fn kind(&self) -> SceneKind {
        SceneKind::SpinningModel
    }

    fn update(&mut self, _delta_ms: f32) {
        self.transform = self
            .transform
            .rotated(Vector3::new(0.0, Self::SPIN_PER_FRAME, 0.0));
    }

    fn draw_calls(&self, config: &SceneConfig) -> Result<Vec<DrawCall>, SceneError> {
        let camera = OrbitCamera::orbiting(config, self.camera_angle_degrees);
        let model = self.transform.apply_to(&perspective(config));
        let matrix = model.multiply(&camera.view_matrix()?);
        Ok(vec![DrawCall::solid(matrix)?])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SceneConfig {
        SceneConfig::default()
    }

    #[test]
    fn test_every_kind_builds_and_draws() {
        for kind in SceneKind::ALL {
            let scene = kind.build();
            assert_eq!(scene.kind(), kind);
            let calls = scene.draw_calls(&config()).unwrap();
            assert!(!calls.is_empty(), "{kind:?} produced no draw calls");
        }
    }

    #[test]
    fn test_uniform_lengths() {
        let flat = SceneKind::Matrices2d.build().draw_calls(&config()).unwrap();
        assert_eq!(flat[0].matrix.as_slice().len(), 9);
        assert_eq!(flat[0].vertex_count, 18);

        let solid = SceneKind::Perspective.build().draw_calls(&config()).unwrap();
        assert_eq!(solid[0].matrix.as_slice().len(), 16);
        assert_eq!(solid[0].vertex_count, 96);
    }

    #[test]
    fn test_matrices_2d_chain() {
        let calls = Matrices2d::default().draw_calls(&config()).unwrap();
        let expected = Matrix3::projection(800.0, 600.0)
            .translate(150.0, 150.0)
            .rotate(10.0)
            .scale(0.9, 0.9)
            .translate(-50.0, -75.0);
        assert_eq!(calls[0].matrix, UniformMatrix::Mat3(expected));
        let bounds = calls[0].bounds.unwrap();
        assert!(bounds.is_contained());
    }

    #[test]
    fn test_perspective_is_on_screen() {
        let calls = Perspective::default().draw_calls(&config()).unwrap();
        let bounds = calls[0].bounds.expect("F is in front of the camera");
        assert!(bounds.is_visible());
    }

    #[test]
    fn test_camera_ring_draws_each_f() {
        let calls = CameraRing::default().draw_calls(&config()).unwrap();
        assert_eq!(calls.len(), 5);
        // The first F is the look-at target and sits in front of the camera.
        let first = calls[0].bounds.expect("target is in front of the camera");
        assert!(first.is_visible());
    }

    #[test]
    fn test_orbit_camera_advances_with_time() {
        let mut scene = OrbitCameraScene::default();
        scene.update(500.0);
        assert!((scene.camera_angle_degrees - 50.0).abs() < 1.0e-4);
        scene.update(4000.0);
        assert!((scene.camera_angle_degrees - 90.0).abs() < 1.0e-3);
    }

    #[test]
    fn test_orbit_eye_distance() {
        let camera = OrbitCamera::new(37.0, 200.0, Vector3::ZERO);
        assert!((camera.eye().length() - 200.0).abs() < 1.0e-3);
        assert!(camera.eye().y.abs() < 1.0e-6);
    }

    #[test]
    fn test_orbit_view_centers_target() {
        let camera = OrbitCamera::new(60.0, 200.0, Vector3::ZERO);
        let view = camera.view_matrix().unwrap();
        let target = view.transform_point(Vector3::ZERO);
        assert!(target.x.abs() < 1.0e-3);
        assert!(target.y.abs() < 1.0e-3);
        assert!((target.z + 200.0).abs() < 1.0e-3);
    }

    #[test]
    fn test_orbit_camera_on_target_fails() {
        let camera = OrbitCamera::new(0.0, 0.0, Vector3::ZERO);
        assert!(matches!(camera.view_matrix(), Err(SceneError::Math(_))));
    }

    #[test]
    fn test_spinning_model_turns_per_frame() {
        let mut scene = SpinningModel::default();
        scene.update(16.0);
        assert!((scene.transform.rotation.y - 1.0_f32.to_radians()).abs() < 1.0e-6);
        for _ in 1..360 {
            scene.update(16.0);
        }
        // A full turn brings the model chain back to where it started.
        assert!(scene.transform.to_matrix().approx_eq(&Matrix4::IDENTITY, 1.0e-3));
        let calls = scene.draw_calls(&config()).unwrap();
        assert!(calls[0].is_visible());
    }
}
