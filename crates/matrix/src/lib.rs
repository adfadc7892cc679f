//! Dense matrix engine for the glint support layer.
//!
//! Fixed-layout row-major storage, the elementwise and linear operators a
//! renderer needs per frame, and closed-form constructors for orthographic
//! projection, translation, and quaternion rotation.
//!
//! # Invariants
//! - Backing storage is always exactly `rows * columns` elements, row-major.
//! - A failed operation leaves no new allocation behind.
//! - Operands are never mutated unless the operation is documented in-place.

mod matrix;
mod transform;

pub use matrix::{Matrix, MatrixError};

pub fn crate_info() -> &'static str {
    "glint-matrix v0.1.0"
}
