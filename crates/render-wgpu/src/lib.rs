//! wgpu graphics wrapper for the glint support layer.
//!
//! Device and surface setup, buffer/texture helpers, and a quad renderer
//! whose transform comes from glint-matrix.
//!
//! # Invariants
//! - Matrices arrive row-major and are transposed to column-major at the
//!   upload boundary; the matrix engine never stores column-major.
//! - Wrappers never mutate caller-owned matrices.

mod buffer;
mod gpu;
mod quad;
mod shaders;
mod texture;

pub use buffer::{IndexBuffer, UniformBuffer, VertexBuffer, matrix_uniform};
pub use gpu::{Frame, GpuContext, RenderError};
pub use quad::QuadRenderer;
pub use texture::Texture2d;

pub fn crate_info() -> &'static str {
    "glint-render-wgpu v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
