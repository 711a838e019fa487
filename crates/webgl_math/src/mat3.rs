//! 3×3 matrices for 2D affine transforms.
//!
//! A [`Matrix3`] stores its 9 elements in the order they are uploaded with
//! `uniformMatrix3fv` (`transpose = false`). Read as rows, that layout acts
//! on row vectors: `[x, y, 1] · M`. Elements 6 and 7 hold the translation.

use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::error::MathError;
use crate::vec::Vector2;

/// A 3×3 homogeneous 2D transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Matrix3([f32; 9]);

impl Matrix3 {
    /// Number of stored elements.
    pub const LEN: usize = 9;

    #[rustfmt::skip]
    pub const IDENTITY: Self = Self([
        1.0, 0.0, 0.0,
        0.0, 1.0, 0.0,
        0.0, 0.0, 1.0,
    ]);

    /// Wrap raw elements.
    #[must_use]
    pub const fn from_array(elements: [f32; 9]) -> Self {
        Self(elements)
    }

    /// Copy elements out of a slice.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::InvalidLength`] unless `elements.len() == 9`.
    pub fn from_slice(elements: &[f32]) -> Result<Self, MathError> {
        let array: [f32; 9] = elements.try_into().map_err(|_| MathError::InvalidLength {
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
    pub const fn translation(tx: f32, ty: f32) -> Self {
        Self([
            1.0, 0.0, 0.0,
            0.0, 1.0, 0.0,
            tx,  ty,  1.0,
        ])
    }

    /// Rotation by `degrees`.
    ///
    /// The 2D builders take degrees; use [`Matrix3::rotation_radians`] when
    /// the angle is already in radians.
    #[must_use]
    pub fn rotation(degrees: f32) -> Self {
        Self::rotation_radians(degrees.to_radians())
    }

    #[rustfmt::skip]
    #[must_use]
    pub fn rotation_radians(radians: f32) -> Self {
        let (s, c) = radians.sin_cos();
        Self([
            c,   -s,  0.0,
            s,   c,   0.0,
            0.0, 0.0, 1.0,
        ])
    }

    #[rustfmt::skip]
    #[must_use]
    pub const fn scaling(sx: f32, sy: f32) -> Self {
        Self([
            sx,  0.0, 0.0,
            0.0, sy,  0.0,
            0.0, 0.0, 1.0,
        ])
    }

    /// Map pixel coordinates (origin top-left, Y down) of a `width × height`
    /// canvas to clip space.
    #[rustfmt::skip]
    #[must_use]
    pub fn projection(width: f32, height: f32) -> Self {
        Self([
            2.0 / width, 0.0,           0.0,
            0.0,         -2.0 / height, 0.0,
            -1.0,        1.0,           1.0,
        ])
    }

    /// Compose two transforms: the result applies `other` first, then `self`.
    #[must_use]
    pub fn multiply(&self, other: &Self) -> Self {
        let a = &self.0;
        let b = &other.0;
        let mut out = [0.0; 9];
        for row in 0..3 {
            for col in 0..3 {
                out[row * 3 + col] = (0..3).map(|k| b[row * 3 + k] * a[k * 3 + col]).sum();
            }
        }
        Self(out)
    }

    /// `self · translation(tx, ty)`.
    #[must_use]
    pub fn translate(&self, tx: f32, ty: f32) -> Self {
        self.multiply(&Self::translation(tx, ty))
    }

    /// `self · rotation(degrees)`.
    #[must_use]
    pub fn rotate(&self, degrees: f32) -> Self {
        self.multiply(&Self::rotation(degrees))
    }

    /// `self · scaling(sx, sy)`.
    #[must_use]
    pub fn scale(&self, sx: f32, sy: f32) -> Self {
        self.multiply(&Self::scaling(sx, sy))
    }

    /// Transform a point (implicit `w = 1`).
    #[must_use]
    pub fn transform_point(&self, point: Vector2) -> Vector2 {
        let m = &self.0;
        Vector2::new(
            point.x * m[0] + point.y * m[3] + m[6],
            point.x * m[1] + point.y * m[4] + m[7],
        )
    }

    /// The `index`-th stored row.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 3`.
    #[must_use]
    pub fn row(&self, index: usize) -> [f32; 3] {
        let start = index * 3;
        [self.0[start], self.0[start + 1], self.0[start + 2]]
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    #[must_use]
    pub const fn to_array(self) -> [f32; 9] {
        self.0
    }

    /// Element-wise comparison within `epsilon`.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.0.iter().zip(&other.0).all(|(a, b)| (a - b).abs() <= epsilon)
    }
}

impl Default for Matrix3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Index<usize> for Matrix3 {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        &self.0[index]
    }
}

impl TryFrom<&[f32]> for Matrix3 {
    type Error = MathError;

    fn try_from(elements: &[f32]) -> Result<Self, MathError> {
        Self::from_slice(elements)
    }
}

impl TryFrom<Vec<f32>> for Matrix3 {
    type Error = MathError;

    fn try_from(elements: Vec<f32>) -> Result<Self, MathError> {
        Self::from_slice(&elements)
    }
}

impl From<Matrix3> for glam::Mat3 {
    fn from(m: Matrix3) -> Self {
        glam::Mat3::from_cols_array(&m.0)
    }
}

impl From<glam::Mat3> for Matrix3 {
    fn from(m: glam::Mat3) -> Self {
        Self(m.to_cols_array())
    }
}

/// Multiply two matrices given as raw element slices.
///
/// # Errors
///
/// Returns [`MathError::InvalidLength`] if either operand does not have
/// exactly 9 elements.
pub fn multiply(a: &[f32], b: &[f32]) -> Result<Matrix3, MathError> {
    let a = Matrix3::from_slice(a)?;
    let b = Matrix3::from_slice(b)?;
    Ok(a.multiply(&b))
}
