//! Math error types.

/// Errors raised by matrix and vector operations.
///
/// Every variant is a violated precondition on the caller's input; none of
/// them are transient.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MathError {
    /// A matrix was built from a slice of the wrong length.
    #[error("length has to be {expected}, but got {actual}")]
    InvalidLength {
        /// Element count the matrix type requires (9 or 16).
        expected: usize,
        /// Element count that was supplied.
        actual: usize,
    },

    /// Attempted to normalize a vector whose length is (nearly) zero.
    #[error("cannot normalize a zero-length vector")]
    ZeroLength,

    /// `look_at` was given an eye position equal to its target.
    #[error("camera eye and target coincide")]
    CoincidentEyeTarget,

    /// `look_at` was given an up vector parallel to the view direction.
    #[error("camera up vector is collinear with the view direction")]
    CollinearUp,

    /// The matrix has no inverse.
    #[error("matrix is singular (determinant {determinant})")]
    Singular {
        /// The computed determinant.
        determinant: f32,
    },
}
