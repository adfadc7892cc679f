//! Closed-form 4x4 transform constructors for homogeneous coordinates.

use crate::matrix::{Matrix, MatrixError};

impl Matrix {
    /// Square identity matrix.
    pub fn identity(size: usize) -> Result<Self, MatrixError> {
        let mut matrix = Self::new(size, size)?;
        for i in 0..size {
            matrix[(i, i)] = 1.0;
        }
        Ok(matrix)
    }

    /// Orthographic projection mapping `[left,right]x[bottom,top]x[near,far]`
    /// to the canonical clip volume.
    ///
    /// Degenerate bounds (a zero-width interval) divide by zero and produce
    /// non-finite entries rather than an error.
    pub fn orthographic(
        left: f32,
        right: f32,
        top: f32,
        bottom: f32,
        near: f32,
        far: f32,
    ) -> Result<Self, MatrixError> {
        let mut projection = Self::new(4, 4)?;

        projection[(0, 0)] = 2.0 / (right - left);
        projection[(1, 1)] = 2.0 / (top - bottom);
        projection[(2, 2)] = 2.0 / (far - near);
        projection[(3, 3)] = 1.0;

        projection[(0, 3)] = -(right + left) / (right - left);
        projection[(1, 3)] = -(top + bottom) / (top - bottom);
        projection[(2, 3)] = -(far + near) / (far - near);

        Ok(projection)
    }

    /// Homogeneous translation by `(x, y, z)`.
    pub fn translation(x: f32, y: f32, z: f32) -> Result<Self, MatrixError> {
        let mut translation = Self::identity(4)?;

        translation[(0, 3)] = x;
        translation[(1, 3)] = y;
        translation[(2, 3)] = z;

        Ok(translation)
    }

    /// Rotation matrix from the quaternion `(w, x, y, z)`.
    ///
    /// The quaternion is normalized by its Euclidean magnitude first, so any
    /// non-zero multiple encodes the same rotation. A zero-length quaternion
    /// divides by zero and fills the rotation block with NaN.
    pub fn rotation(w: f32, x: f32, y: f32, z: f32) -> Result<Self, MatrixError> {
        let mut rotation = Self::new(4, 4)?;

        let magnitude = (w * w + x * x + y * y + z * z).sqrt();
        let w = w / magnitude;
        let x = x / magnitude;
        let y = y / magnitude;
        let z = z / magnitude;

        rotation[(0, 0)] = 1.0 - 2.0 * (y * y + z * z);
        rotation[(0, 1)] = 2.0 * (x * y - z * w);
        rotation[(0, 2)] = 2.0 * (x * z + y * w);

        rotation[(1, 0)] = 2.0 * (x * y + z * w);
        rotation[(1, 1)] = 1.0 - 2.0 * (x * x + z * z);
        rotation[(1, 2)] = 2.0 * (y * z - x * w);

        rotation[(2, 0)] = 2.0 * (x * z - y * w);
        rotation[(2, 1)] = 2.0 * (y * z + x * w);
        rotation[(2, 2)] = 1.0 - 2.0 * (x * x + y * y);

        rotation[(3, 3)] = 1.0;

        Ok(rotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_has_unit_diagonal() {
        let identity = Matrix::identity(3).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(identity[(i, j)], if i == j { 1.0 } else { 0.0 });
            }
        }
    }

    #[test]
    fn orthographic_unit_box_is_identity() {
        let projection = Matrix::orthographic(-1.0, 1.0, 1.0, -1.0, -1.0, 1.0).unwrap();
        assert_eq!(projection, Matrix::identity(4).unwrap());
    }

    #[test]
    fn orthographic_maps_box_corners_to_clip_corners() {
        let projection = Matrix::orthographic(0.0, 8.0, 6.0, 0.0, -2.0, 2.0).unwrap();

        let lower = Matrix::from_rows(&[[0.0], [0.0], [-2.0], [1.0]]).unwrap();
        let mapped = projection.multiply(&lower).unwrap();
        assert_eq!(mapped, Matrix::from_rows(&[[-1.0], [-1.0], [-1.0], [1.0]]).unwrap());

        let upper = Matrix::from_rows(&[[8.0], [6.0], [2.0], [1.0]]).unwrap();
        let mapped = projection.multiply(&upper).unwrap();
        assert_eq!(mapped, Matrix::from_rows(&[[1.0], [1.0], [1.0], [1.0]]).unwrap());
    }

    #[test]
    fn orthographic_degenerate_bounds_are_not_finite() {
        let projection = Matrix::orthographic(1.0, 1.0, 1.0, -1.0, -1.0, 1.0).unwrap();
        assert!(!projection[(0, 0)].is_finite());
    }

    #[test]
    fn translation_moves_homogeneous_point() {
        let translation = Matrix::translation(2.0, -3.0, 0.5).unwrap();
        let point = Matrix::from_rows(&[[1.0], [1.0], [1.0], [1.0]]).unwrap();

        let moved = translation.multiply(&point).unwrap();
        assert_eq!(
            moved,
            Matrix::from_rows(&[[3.0], [-2.0], [1.5], [1.0]]).unwrap()
        );
    }

    #[test]
    fn rotation_identity_quaternion_is_identity() {
        let rotation = Matrix::rotation(1.0, 0.0, 0.0, 0.0).unwrap();
        assert_eq!(rotation, Matrix::identity(4).unwrap());
    }

    #[test]
    fn rotation_normalizes_quaternion() {
        // Any non-zero multiple of a quaternion encodes the same rotation.
        let unit = Matrix::rotation(1.0, 0.0, 0.0, 0.0).unwrap();
        let scaled = Matrix::rotation(4.0, 0.0, 0.0, 0.0).unwrap();
        assert_eq!(unit, scaled);
    }

    #[test]
    fn rotation_half_turn_about_z() {
        let rotation = Matrix::rotation(0.0, 0.0, 0.0, 1.0).unwrap();

        assert_eq!(rotation[(0, 0)], -1.0);
        assert_eq!(rotation[(1, 1)], -1.0);
        assert_eq!(rotation[(2, 2)], 1.0);
        assert_eq!(rotation[(3, 3)], 1.0);
        assert_eq!(rotation[(0, 1)], 0.0);
        assert_eq!(rotation[(1, 0)], 0.0);
    }

    #[test]
    fn rotation_zero_quaternion_is_nan() {
        // Pins the documented divide-by-zero behavior.
        let rotation = Matrix::rotation(0.0, 0.0, 0.0, 0.0).unwrap();
        assert!(rotation[(0, 0)].is_nan());
    }
}
