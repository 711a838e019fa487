//! Model transforms.
//!
//! [`Transform3D`] and [`Transform2D`] bundle the translation, rotation and
//! scale parameters a demo animates, and expand them into the matrix chain
//! the vertex shader receives.

use serde::{Deserialize, Serialize};

use crate::mat3::Matrix3;
use crate::mat4::Matrix4;
use crate::vec::{Vector2, Vector3};

/// A 3D model transform: translation, Euler rotation and per-axis scale.
///
/// The matrix chain is `translate · x_rotate · y_rotate · z_rotate · scale`,
/// so a vertex is scaled first, rotated about Z, Y then X, and translated
/// last.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Transform3D {
    /// Offset applied after rotation and scale.
    pub translation: Vector3,
    /// Euler angles in radians about X, Y and Z.
    pub rotation: Vector3,
    /// Per-axis scale factors.
    pub scale: Vector3,
}

impl Transform3D {
    /// The identity transform: origin, no rotation, unit scale.
    pub const IDENTITY: Self = Self {
        translation: Vector3::ZERO,
        rotation: Vector3::ZERO,
        scale: Vector3::ONE,
    };

    /// Create a new transform with the given translation and default rotation/scale.
    #[must_use]
    pub fn from_translation(translation: Vector3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    /// Replace the Euler rotation (radians).
    #[must_use]
    pub fn with_rotation(mut self, rotation: Vector3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Replace the scale.
    #[must_use]
    pub fn with_scale(mut self, scale: Vector3) -> Self {
        self.scale = scale;
        self
    }

    /// Compute the 4×4 model matrix for this transform.
    #[must_use]
    pub fn to_matrix(&self) -> Matrix4 {
        self.apply_to(&Matrix4::IDENTITY)
    }

    /// Append this transform's chain to `base` (typically a projection or
    /// view-projection matrix).
    #[must_use]
    pub fn apply_to(&self, base: &Matrix4) -> Matrix4 {
        let Self {
            translation: t,
            rotation: r,
            scale: s,
        } = *self;
        base.translate(t.x, t.y, t.z)
            .x_rotate(r.x)
            .y_rotate(r.y)
            .z_rotate(r.z)
            .scale(s.x, s.y, s.z)
    }

    /// Rotate further about each axis by `delta` radians.
    #[must_use]
    pub fn rotated(mut self, delta: Vector3) -> Self {
        self.rotation = self.rotation + delta;
        self
    }
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A 2D model transform in pixel space.
///
/// `origin` is the pivot, in model coordinates, that rotation and scale are
/// applied about.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Transform2D {
    pub translation: Vector2,
    /// Rotation in degrees.
    pub rotation_degrees: f32,
    pub scale: Vector2,
    pub origin: Vector2,
}

impl Transform2D {
    pub const IDENTITY: Self = Self {
        translation: Vector2::ZERO,
        rotation_degrees: 0.0,
        scale: Vector2::ONE,
        origin: Vector2::ZERO,
    };

    /// Compute the 3×3 model matrix for this transform.
    #[must_use]
    pub fn to_matrix(&self) -> Matrix3 {
        self.apply_to(&Matrix3::IDENTITY)
    }

    /// Append this transform's chain to `base`.
    #[must_use]
    pub fn apply_to(&self, base: &Matrix3) -> Matrix3 {
        base.translate(self.translation.x, self.translation.y)
            .rotate(self.rotation_degrees)
            .scale(self.scale.x, self.scale.y)
            .translate(-self.origin.x, -self.origin.y)
    }
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}
