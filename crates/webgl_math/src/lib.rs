//! # webgl_math
//!
//! Transform matrices for the WebGL basics demos. Every function is pure and
//! returns a new value; the matrices it produces are handed unchanged to
//! `uniformMatrix3fv` / `uniformMatrix4fv`.
//!
//! This crate provides:
//!
//! - [`Matrix3`] — 2D translation, rotation (degrees), scaling and the
//!   pixel-to-clip projection.
//! - [`Matrix4`] — 3D builders, orthographic/pixel/perspective projections,
//!   [`look_at`](Matrix4::look_at) cameras and [`inverse`](Matrix4::inverse).
//! - [`Vector2`], [`Vector3`], [`Vector4`] — component storage plus the
//!   vector helpers cameras need.
//! - [`Transform2D`], [`Transform3D`] — model parameters expanded into
//!   matrix chains.
//! - [`MathError`] — length mismatches and degenerate inputs.
//!
//! Conversions to and from the corresponding [`glam`] types are lossless:
//! glam's column-major arrays match the upload layout used here.

pub mod error;
pub mod mat3;
pub mod mat4;
pub mod transform;
pub mod vec;

pub use error::MathError;
pub use mat3::Matrix3;
pub use mat4::Matrix4;
pub use transform::{Transform2D, Transform3D};
pub use vec::{Vector2, Vector3, Vector4};
