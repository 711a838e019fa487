//! 4×4 matrices for 3D transforms, projections and cameras.
//!
//! Storage follows the same rule as [`Matrix3`](crate::Matrix3): the 16
//! elements are in `uniformMatrix4fv` upload order, which read as rows acts on
//! row vectors (`[x, y, z, 1] · M`). Rows 0..3 are the transformed X, Y and Z
//! axes and row 3 is the translation.
//!
//! ## Composition
//!
//! [`Matrix4::multiply`] returns a matrix that applies its argument first and
//! `self` second. The fluent wrappers ([`Matrix4::translate`],
//! [`Matrix4::x_rotate`], ...) multiply on the right, so in
//!
//! ```
//! use webgl_math::Matrix4;
//!
//! let m = Matrix4::perspective(1.2, 1.5, 1.0, 2000.0)
//!     .translate(0.0, 0.0, -200.0)
//!     .y_rotate(0.4)
//!     .scale(2.0, 2.0, 2.0);
//! # let _ = m;
//! ```
//!
//! a vertex is scaled, then rotated, then translated, then projected.
//!
//! All 3D rotations take radians.

use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::error::MathError;
use crate::vec::{Vector3, Vector4};

/// A 4×4 homogeneous 3D transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Matrix4([f32; 16]);

impl Matrix4 {
    /// Number of stored elements.
    pub const LEN: usize = 16;

    #[rustfmt::skip]
    pub const IDENTITY: Self = Self([
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ]);

    /// Wrap raw elements.
    #[must_use]
    pub const fn from_array(elements: [f32; 16]) -> Self {
        Self(elements)
    }

    /// Copy elements out of a slice.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::InvalidLength`] unless `elements.len() == 16`.
    pub fn from_slice(elements: &[f32]) -> Result<Self, MathError> {
        let array: [f32; 16] = elements.try_into().map_err(|_| MathError::InvalidLength {
            expected: Self::LEN,
            actual: elements.len(),
        })?;
        Ok(Self(array))
    }

    #[must_use]
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    #[rustfmt::skip]
    #[must_use]
    pub const fn translation(tx: f32, ty: f32, tz: f32) -> Self {
        Self([
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            tx,  ty,  tz,  1.0,
        ])
    }

    #[rustfmt::skip]
    #[must_use]
    pub fn x_rotation(radians: f32) -> Self {
        let (s, c) = radians.sin_cos();
        Self([
            1.0, 0.0, 0.0, 0.0,
            0.0, c,   s,   0.0,
            0.0, -s,  c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    #[rustfmt::skip]
    #[must_use]
    pub fn y_rotation(radians: f32) -> Self {
        let (s, c) = radians.sin_cos();
        Self([
            c,   0.0, -s,  0.0,
            0.0, 1.0, 0.0, 0.0,
            s,   0.0, c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    #[rustfmt::skip]
    #[must_use]
    pub fn z_rotation(radians: f32) -> Self {
        let (s, c) = radians.sin_cos();
        Self([
            c,   s,   0.0, 0.0,
            -s,  c,   0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    #[rustfmt::skip]
    #[must_use]
    pub const fn scaling(sx: f32, sy: f32, sz: f32) -> Self {
        Self([
            sx,  0.0, 0.0, 0.0,
            0.0, sy,  0.0, 0.0,
            0.0, 0.0, sz,  0.0,
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Copy Z into W scaled by `fudge_factor`, a poor man's perspective.
    #[rustfmt::skip]
    #[must_use]
    pub const fn z_to_w(fudge_factor: f32) -> Self {
        Self([
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, fudge_factor,
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Map the box `[left, right] × [bottom, top] × [-near, -far]` onto the
    /// clip cube.
    #[rustfmt::skip]
    #[must_use]
    pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        Self([
            2.0 / (right - left), 0.0, 0.0, 0.0,
            0.0, 2.0 / (top - bottom), 0.0, 0.0,
            0.0, 0.0, 2.0 / (near - far), 0.0,
            (left + right) / (left - right),
            (bottom + top) / (bottom - top),
            (near + far) / (near - far),
            1.0,
        ])
    }

    /// Pixel-space projection without perspective: Y is flipped so the
    /// origin is the top-left corner, and Z is scaled by `2 / depth`.
    #[rustfmt::skip]
    #[must_use]
    pub fn projection(width: f32, height: f32, depth: f32) -> Self {
        Self([
            2.0 / width, 0.0,           0.0,         0.0,
            0.0,         -2.0 / height, 0.0,         0.0,
            0.0,         0.0,           2.0 / depth, 0.0,
            -1.0,        1.0,           0.0,         1.0,
        ])
    }

    /// Symmetric perspective frustum.
    ///
    /// `near` maps to clip `z = -1` and `far` to `z = 1`. The `-1` at
    /// element 11 copies `-z` into `w` for the perspective divide. Y is
    /// negated to match [`Matrix4::projection`].
    #[rustfmt::skip]
    #[must_use]
    pub fn perspective(fov_radians: f32, aspect: f32, near: f32, far: f32) -> Self {
        let f = (std::f32::consts::FRAC_PI_2 - 0.5 * fov_radians).tan();
        let range_inv = 1.0 / (near - far);
        Self([
            f / aspect, 0.0, 0.0,                           0.0,
            0.0,        -f,  0.0,                           0.0,
            0.0,        0.0, (near + far) * range_inv,      -1.0,
            0.0,        0.0, near * far * range_inv * 2.0,  0.0,
        ])
    }

    /// Camera placement matrix at `eye`, facing `target`.
    ///
    /// The camera looks down its local -Z axis. Rows 0..3 are the camera's
    /// right, up and backward axes in world space and row 3 is `eye`, so the
    /// result maps camera space to world space; invert it to get a view
    /// matrix.
    ///
    /// # Errors
    ///
    /// - [`MathError::CoincidentEyeTarget`] if `eye == target`.
    /// - [`MathError::CollinearUp`] if `up` is zero or parallel to
    ///   `eye - target`.
    #[rustfmt::skip]
    pub fn look_at(eye: Vector3, target: Vector3, up: Vector3) -> Result<Self, MathError> {
        let forward = eye
            .subtract(target)
            .normalize()
            .map_err(|_| MathError::CoincidentEyeTarget)?;
        let right = up
            .cross(forward)
            .normalize()
            .map_err(|_| MathError::CollinearUp)?;
        let true_up = forward.cross(right);

        Ok(Self([
            right.x,   right.y,   right.z,   0.0,
            true_up.x, true_up.y, true_up.z, 0.0,
            forward.x, forward.y, forward.z, 0.0,
            eye.x,     eye.y,     eye.z,     1.0,
        ]))
    }

    /// Compose two transforms: the result applies `other` first, then `self`.
    #[must_use]
    pub fn multiply(&self, other: &Self) -> Self {
        let a = &self.0;
        let b = &other.0;
        let mut out = [0.0; 16];
        for row in 0..4 {
            for col in 0..4 {
                out[row * 4 + col] = (0..4).map(|k| b[row * 4 + k] * a[k * 4 + col]).sum();
            }
        }
        Self(out)
    }

    /// `self · translation(tx, ty, tz)`.
    #[must_use]
    pub fn translate(&self, tx: f32, ty: f32, tz: f32) -> Self {
        self.multiply(&Self::translation(tx, ty, tz))
    }

    /// `self · x_rotation(radians)`.
    #[must_use]
    pub fn x_rotate(&self, radians: f32) -> Self {
        self.multiply(&Self::x_rotation(radians))
    }

    /// `self · y_rotation(radians)`.
    #[must_use]
    pub fn y_rotate(&self, radians: f32) -> Self {
        self.multiply(&Self::y_rotation(radians))
    }

    /// `self · z_rotation(radians)`.
    #[must_use]
    pub fn z_rotate(&self, radians: f32) -> Self {
        self.multiply(&Self::z_rotation(radians))
    }

    /// `self · scaling(sx, sy, sz)`.
    #[must_use]
    pub fn scale(&self, sx: f32, sy: f32, sz: f32) -> Self {
        self.multiply(&Self::scaling(sx, sy, sz))
    }

    /// General inverse via the adjugate.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::Singular`] if the determinant is zero or the
    /// result is not finite.
    pub fn inverse(&self) -> Result<Self, MathError> {
        let [
            a00, a01, a02, a03,
            a10, a11, a12, a13,
            a20, a21, a22, a23,
            a30, a31, a32, a33,
        ] = self.0;

        // 2×2 minors of the top two and bottom two rows.
        let b00 = a00 * a11 - a01 * a10;
        let b01 = a00 * a12 - a02 * a10;
        let b02 = a00 * a13 - a03 * a10;
        let b03 = a01 * a12 - a02 * a11;
        let b04 = a01 * a13 - a03 * a11;
        let b05 = a02 * a13 - a03 * a12;
        let b06 = a20 * a31 - a21 * a30;
        let b07 = a20 * a32 - a22 * a30;
        let b08 = a20 * a33 - a23 * a30;
        let b09 = a21 * a32 - a22 * a31;
        let b10 = a21 * a33 - a23 * a31;
        let b11 = a22 * a33 - a23 * a32;

        let determinant = b00 * b11 - b01 * b10 + b02 * b09 + b03 * b08 - b04 * b07 + b05 * b06;
        if determinant == 0.0 || !determinant.is_finite() {
            return Err(MathError::Singular { determinant });
        }
        let d = 1.0 / determinant;

        let inverse = Self([
            (a11 * b11 - a12 * b10 + a13 * b09) * d,
            (a02 * b10 - a01 * b11 - a03 * b09) * d,
            (a31 * b05 - a32 * b04 + a33 * b03) * d,
            (a22 * b04 - a21 * b05 - a23 * b03) * d,
            (a12 * b08 - a10 * b11 - a13 * b07) * d,
            (a00 * b11 - a02 * b08 + a03 * b07) * d,
            (a32 * b02 - a30 * b05 - a33 * b01) * d,
            (a20 * b05 - a22 * b02 + a23 * b01) * d,
            (a10 * b10 - a11 * b08 + a13 * b06) * d,
            (a01 * b08 - a00 * b10 - a03 * b06) * d,
            (a30 * b04 - a31 * b02 + a33 * b00) * d,
            (a21 * b02 - a20 * b04 - a23 * b00) * d,
            (a11 * b07 - a10 * b09 - a12 * b06) * d,
            (a00 * b09 - a01 * b07 + a02 * b06) * d,
            (a31 * b01 - a30 * b03 - a32 * b00) * d,
            (a20 * b03 - a21 * b01 + a22 * b00) * d,
        ]);

        if inverse.0.iter().all(|v| v.is_finite()) {
            Ok(inverse)
        } else {
            Err(MathError::Singular { determinant })
        }
    }

    /// Transform a homogeneous vector.
    #[must_use]
    pub fn transform_vector(&self, v: Vector4) -> Vector4 {
        let m = &self.0;
        let column = |j: usize| v.x * m[j] + v.y * m[4 + j] + v.z * m[8 + j] + v.w * m[12 + j];
        Vector4::new(column(0), column(1), column(2), column(3))
    }

    /// Transform a point (`w = 1`). No perspective divide is applied.
    #[must_use]
    pub fn transform_point(&self, point: Vector3) -> Vector4 {
        self.transform_vector(point.extend(1.0))
    }

    /// The translation row (elements 12, 13, 14).
    #[must_use]
    pub fn translation_part(&self) -> Vector3 {
        Vector3::new(self.0[12], self.0[13], self.0[14])
    }

    /// The `index`-th stored row.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 4`.
    #[must_use]
    pub fn row(&self, index: usize) -> [f32; 4] {
        let start = index * 4;
        [self.0[start], self.0[start + 1], self.0[start + 2], self.0[start + 3]]
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    #[must_use]
    pub const fn to_array(self) -> [f32; 16] {
        self.0
    }

    /// Element-wise comparison within `epsilon`.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.0.iter().zip(&other.0).all(|(a, b)| (a - b).abs() <= epsilon)
    }
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Index<usize> for Matrix4 {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        &self.0[index]
    }
}

impl TryFrom<&[f32]> for Matrix4 {
    type Error = MathError;

    fn try_from(elements: &[f32]) -> Result<Self, MathError> {
        Self::from_slice(elements)
    }
}

impl TryFrom<Vec<f32>> for Matrix4 {
    type Error = MathError;

    fn try_from(elements: Vec<f32>) -> Result<Self, MathError> {
        Self::from_slice(&elements)
    }
}

impl From<Matrix4> for glam::Mat4 {
    fn from(m: Matrix4) -> Self {
        glam::Mat4::from_cols_array(&m.0)
    }
}

impl From<glam::Mat4> for Matrix4 {
    fn from(m: glam::Mat4) -> Self {
        Self(m.to_cols_array())
    }
}

/// Multiply two matrices given as raw element slices.
///
/// # Errors
///
/// Returns [`MathError::InvalidLength`] if either operand does not have
/// exactly 16 elements.
pub fn multiply(a: &[f32], b: &[f32]) -> Result<Matrix4, MathError> {
    let a = Matrix4::from_slice(a)?;
    let b = Matrix4::from_slice(b)?;
    Ok(a.multiply(&b))
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_2, PI, TAU};

    use super::*;

    const EPS: f32 = 1.0e-5;

    fn sample() -> Matrix4 {
        Matrix4::translation(10.0, -20.0, 30.0)
            .x_rotate(0.3)
            .y_rotate(-1.1)
            .z_rotate(2.0)
            .scale(2.0, 3.0, 0.5)
    }

    fn assert_vec_near(actual: Vector3, expected: Vector3, eps: f32) {
        assert!(
            (actual - expected).length() <= eps,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn test_identity_is_neutral() {
        let m = sample();
        assert_eq!(Matrix4::IDENTITY.multiply(&m), m);
        assert_eq!(m.multiply(&Matrix4::IDENTITY), m);
    }

    #[test]
    fn test_translations_add() {
        let m = Matrix4::translation(1.0, 2.0, 3.0).translate(-4.0, 0.5, 10.0);
        assert_eq!(m, Matrix4::translation(-3.0, 2.5, 13.0));
    }

    #[test]
    fn test_full_turn_is_identity() {
        assert!(Matrix4::z_rotation(TAU).approx_eq(&Matrix4::IDENTITY, EPS));
        assert!(Matrix4::x_rotation(TAU).approx_eq(&Matrix4::IDENTITY, EPS));
    }

    #[test]
    fn test_fluent_wrappers_match_multiply() {
        let m = sample();
        assert_eq!(m.x_rotate(0.7), m.multiply(&Matrix4::x_rotation(0.7)));
        assert_eq!(m.scale(1.0, 2.0, 3.0), m.multiply(&Matrix4::scaling(1.0, 2.0, 3.0)));
    }

    #[test]
    fn test_multiply_applies_right_operand_first() {
        // Rotate +X a quarter turn about Y, then translate.
        let m = Matrix4::translation(0.0, 0.0, 5.0).y_rotate(FRAC_PI_2);
        let p = m.transform_point(Vector3::new(1.0, 0.0, 0.0)).truncate();
        assert_vec_near(p, Vector3::new(0.0, 0.0, 4.0), EPS);
    }

    #[test]
    fn test_inverse_round_trips() {
        let m = sample();
        let inv = m.inverse().unwrap();
        assert!(m.multiply(&inv).approx_eq(&Matrix4::IDENTITY, 1.0e-4));
        assert!(inv.multiply(&m).approx_eq(&Matrix4::IDENTITY, 1.0e-4));
        assert!(inv.inverse().unwrap().approx_eq(&m, 1.0e-3));
    }

    #[test]
    fn test_inverse_matches_glam() {
        let m = sample();
        let expected = Matrix4::from(glam::Mat4::from(m).inverse());
        assert!(m.inverse().unwrap().approx_eq(&expected, 1.0e-4));
    }

    #[test]
    fn test_inverse_of_translation() {
        let inv = Matrix4::translation(1.0, 2.0, 3.0).inverse().unwrap();
        assert!(inv.approx_eq(&Matrix4::translation(-1.0, -2.0, -3.0), EPS));
    }

    #[test]
    fn test_inverse_singular() {
        let result = Matrix4::scaling(1.0, 0.0, 1.0).inverse();
        assert!(matches!(result, Err(MathError::Singular { .. })));
    }

    #[test]
    fn test_perspective_layout() {
        let m = Matrix4::perspective(FRAC_PI_2, 1.0, 1.0, 100.0);
        let row0 = m.row(0);
        let row1 = m.row(1);
        for (actual, expected) in row0.iter().zip([1.0, 0.0, 0.0, 0.0]) {
            assert!((actual - expected).abs() < EPS);
        }
        for (actual, expected) in row1.iter().zip([0.0, -1.0, 0.0, 0.0]) {
            assert!((actual - expected).abs() < EPS);
        }
        assert_eq!(m[11], -1.0);
        assert_eq!(m[15], 0.0);
    }

    #[test]
    fn test_perspective_maps_near_and_far() {
        let (near, far) = (1.0, 2000.0);
        let m = Matrix4::perspective(100.0_f32.to_radians(), 1.5, near, far);

        let n = m.transform_point(Vector3::new(0.0, 0.0, -near));
        assert!((n.z / n.w + 1.0).abs() < 1.0e-4);
        let f = m.transform_point(Vector3::new(0.0, 0.0, -far));
        assert!((f.z / f.w - 1.0).abs() < 1.0e-4);
        assert!((f.w - far).abs() < 1.0e-3);
    }

    #[test]
    fn test_orthographic_maps_box_to_cube() {
        let m = Matrix4::orthographic(-2.0, 2.0, -1.0, 1.0, 1.0, 10.0);
        let lo = m.transform_point(Vector3::new(-2.0, -1.0, -1.0)).truncate();
        let hi = m.transform_point(Vector3::new(2.0, 1.0, -10.0)).truncate();
        assert_vec_near(lo, Vector3::splat(-1.0), EPS);
        assert_vec_near(hi, Vector3::splat(1.0), EPS);
    }

    #[test]
    fn test_projection_maps_pixels() {
        let m = Matrix4::projection(400.0, 300.0, 400.0);
        let origin = m.transform_point(Vector3::ZERO).truncate();
        assert_vec_near(origin, Vector3::new(-1.0, 1.0, 0.0), EPS);
        let corner = m.transform_point(Vector3::new(400.0, 300.0, 200.0)).truncate();
        assert_vec_near(corner, Vector3::new(1.0, -1.0, 1.0), EPS);
    }

    #[test]
    fn test_z_to_w() {
        let m = Matrix4::z_to_w(0.5);
        assert_eq!(m[11], 0.5);
        let v = m.transform_point(Vector3::new(1.0, 2.0, 4.0));
        assert_eq!(v.w, 3.0);
    }

    #[test]
    fn test_look_at_basis() {
        let m = Matrix4::look_at(Vector3::new(0.0, 0.0, 5.0), Vector3::ZERO, Vector3::Y).unwrap();
        assert_eq!(m.translation_part(), Vector3::new(0.0, 0.0, 5.0));
        assert_eq!(m.row(0), [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(m.row(1), [0.0, 1.0, 0.0, 0.0]);
        assert_eq!(m.row(2), [0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_look_at_view_matches_glam() {
        let eye = Vector3::new(120.0, 40.0, -80.0);
        let target = Vector3::new(200.0, 0.0, 0.0);
        let view = Matrix4::look_at(eye, target, Vector3::Y)
            .unwrap()
            .inverse()
            .unwrap();
        let expected = glam::Mat4::look_at_rh(eye.into(), target.into(), glam::Vec3::Y);
        assert!(view.approx_eq(&Matrix4::from(expected), 1.0e-3));
    }

    #[test]
    fn test_look_at_degenerate_inputs() {
        let eye = Vector3::new(0.0, 10.0, 0.0);
        assert_eq!(
            Matrix4::look_at(eye, Vector3::ZERO, Vector3::Y),
            Err(MathError::CollinearUp)
        );
        assert_eq!(
            Matrix4::look_at(eye, eye, Vector3::Y),
            Err(MathError::CoincidentEyeTarget)
        );
    }

    #[test]
    fn test_camera_orbit_position() {
        let placement = Matrix4::y_rotation(FRAC_PI_2).translate(0.0, 0.0, 300.0);
        assert_vec_near(placement.translation_part(), Vector3::new(300.0, 0.0, 0.0), 1.0e-3);
        let half_turn = Matrix4::y_rotation(PI).translate(0.0, 0.0, 300.0);
        assert_vec_near(half_turn.translation_part(), Vector3::new(0.0, 0.0, -300.0), 1.0e-3);
    }

    #[test]
    fn test_slice_multiply_rejects_wrong_length() {
        let id = Matrix4::IDENTITY.to_array();
        assert_eq!(
            multiply(&id, &[0.0; 9]),
            Err(MathError::InvalidLength {
                expected: 16,
                actual: 9
            })
        );
        assert_eq!(
            Matrix4::try_from(vec![0.0; 17]),
            Err(MathError::InvalidLength {
                expected: 16,
                actual: 17
            })
        );
    }
}
