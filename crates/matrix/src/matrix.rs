use std::fmt;
use std::ops::{Index, IndexMut};

/// Errors from matrix creation and arithmetic.
#[derive(Debug, thiserror::Error)]
pub enum MatrixError {
    #[error("cannot allocate a {rows}x{columns} matrix")]
    Allocation { rows: usize, columns: usize },
    #[error(
        "shape mismatch: expected {expected_rows}x{expected_columns}, got {actual_rows}x{actual_columns}"
    )]
    ShapeMismatch {
        expected_rows: usize,
        expected_columns: usize,
        actual_rows: usize,
        actual_columns: usize,
    },
}

/// Dense row-major matrix of `f32` elements.
///
/// Element `(i, j)` lives at linear offset `i * columns + j`. The backing
/// storage is exclusively owned; cloning deep-copies it. Arithmetic follows
/// IEEE-754 with no special handling of NaN or infinity.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    columns: usize,
    data: Vec<f32>,
}

impl Matrix {
    /// Create a zero-filled matrix with the given dimensions.
    ///
    /// Fails when either dimension is zero, the element count overflows, or
    /// the backing allocation cannot be made.
    pub fn new(rows: usize, columns: usize) -> Result<Self, MatrixError> {
        let len = match rows.checked_mul(columns) {
            Some(len) if rows > 0 && columns > 0 => len,
            _ => return Err(MatrixError::Allocation { rows, columns }),
        };
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| MatrixError::Allocation { rows, columns })?;
        data.resize(len, 0.0);
        Ok(Self {
            rows,
            columns,
            data,
        })
    }

    /// Create a matrix from an array of equal-length rows.
    pub fn from_rows<const C: usize>(rows: &[[f32; C]]) -> Result<Self, MatrixError> {
        let mut matrix = Self::new(rows.len(), C)?;
        for (storage, row) in matrix.data.chunks_exact_mut(C).zip(rows) {
            storage.copy_from_slice(row);
        }
        Ok(matrix)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Element at `(row, column)`, or `None` when out of range.
    pub fn get(&self, row: usize, column: usize) -> Option<f32> {
        (row < self.rows && column < self.columns).then(|| self.data[row * self.columns + column])
    }

    /// Mutable element at `(row, column)`, or `None` when out of range.
    pub fn get_mut(&mut self, row: usize, column: usize) -> Option<&mut f32> {
        (row < self.rows && column < self.columns)
            .then(|| &mut self.data[row * self.columns + column])
    }

    /// Raw row-major storage. This is the layout uniform uploads read from.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Elementwise sum into a freshly allocated matrix.
    ///
    /// Fails with `ShapeMismatch` when the operands differ in shape.
    pub fn add(&self, other: &Matrix) -> Result<Matrix, MatrixError> {
        other.expect_shape(self.rows, self.columns)?;
        let mut sum = Matrix::new(self.rows, self.columns)?;
        for ((out, a), b) in sum.data.iter_mut().zip(&self.data).zip(&other.data) {
            *out = a + b;
        }
        Ok(sum)
    }

    /// Elementwise sum written into `destination` in place, no allocation.
    ///
    /// The destination's shape must already equal the operands' shape.
    pub fn add_into(&self, other: &Matrix, destination: &mut Matrix) -> Result<(), MatrixError> {
        other.expect_shape(self.rows, self.columns)?;
        destination.expect_shape(self.rows, self.columns)?;
        for ((out, a), b) in destination.data.iter_mut().zip(&self.data).zip(&other.data) {
            *out = a + b;
        }
        Ok(())
    }

    /// Multiply every element by `factor`, in place. Never fails.
    pub fn scale(&mut self, factor: f32) {
        for value in &mut self.data {
            *value *= factor;
        }
    }

    /// Standard matrix product into a freshly allocated matrix.
    ///
    /// Requires `self.columns == other.rows`; the result has shape
    /// `(self.rows, other.columns)`.
    pub fn multiply(&self, other: &Matrix) -> Result<Matrix, MatrixError> {
        self.expect_product_operand(other)?;
        let mut product = Matrix::new(self.rows, other.columns)?;
        self.multiply_unchecked(other, &mut product);
        Ok(product)
    }

    /// Matrix product written into `destination` in place, no allocation.
    ///
    /// The destination's shape must already be `(self.rows, other.columns)`.
    /// Aliasing between destination and operands cannot arise: the exclusive
    /// borrow on `destination` guarantees disjoint storage.
    pub fn multiply_into(
        &self,
        other: &Matrix,
        destination: &mut Matrix,
    ) -> Result<(), MatrixError> {
        self.expect_product_operand(other)?;
        destination.expect_shape(self.rows, other.columns)?;
        self.multiply_unchecked(other, destination);
        Ok(())
    }

    fn multiply_unchecked(&self, other: &Matrix, destination: &mut Matrix) {
        for i in 0..self.rows {
            for j in 0..other.columns {
                let mut sum = 0.0;
                for k in 0..self.columns {
                    sum += self.data[i * self.columns + k] * other.data[k * other.columns + j];
                }
                destination.data[i * destination.columns + j] = sum;
            }
        }
    }

    fn expect_shape(&self, rows: usize, columns: usize) -> Result<(), MatrixError> {
        if self.rows != rows || self.columns != columns {
            return Err(MatrixError::ShapeMismatch {
                expected_rows: rows,
                expected_columns: columns,
                actual_rows: self.rows,
                actual_columns: self.columns,
            });
        }
        Ok(())
    }

    fn expect_product_operand(&self, other: &Matrix) -> Result<(), MatrixError> {
        other.expect_shape(self.columns, other.columns)
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f32;

    fn index(&self, (row, column): (usize, usize)) -> &f32 {
        assert!(
            row < self.rows && column < self.columns,
            "index ({row}, {column}) out of bounds for {}x{} matrix",
            self.rows,
            self.columns
        );
        &self.data[row * self.columns + column]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, column): (usize, usize)) -> &mut f32 {
        assert!(
            row < self.rows && column < self.columns,
            "index ({row}, {column}) out of bounds for {}x{} matrix",
            self.rows,
            self.columns
        );
        &mut self.data[row * self.columns + column]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.data.chunks_exact(self.columns) {
            for (j, value) in row.iter().enumerate() {
                if j > 0 {
                    f.write_str("\t")?;
                }
                write!(f, "{value}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_zero_filled() {
        let m = Matrix::new(3, 5).unwrap();
        assert_eq!(m.rows(), 3);
        assert_eq!(m.columns(), 5);
        assert!(m.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn new_rejects_zero_dimensions() {
        assert!(matches!(
            Matrix::new(0, 4),
            Err(MatrixError::Allocation { rows: 0, columns: 4 })
        ));
        assert!(matches!(
            Matrix::new(4, 0),
            Err(MatrixError::Allocation { rows: 4, columns: 0 })
        ));
    }

    #[test]
    fn clone_is_independent() {
        let mut original = Matrix::new(2, 2).unwrap();
        original[(0, 1)] = 7.0;
        let mut copy = original.clone();
        assert_eq!(copy, original);

        copy[(0, 1)] = -1.0;
        assert_eq!(original[(0, 1)], 7.0);
    }

    #[test]
    fn get_checks_bounds() {
        let m = Matrix::new(2, 3).unwrap();
        assert_eq!(m.get(1, 2), Some(0.0));
        assert_eq!(m.get(2, 0), None);
        assert_eq!(m.get(0, 3), None);
    }

    #[test]
    fn add_matches_elementwise_sum() {
        let a = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let b = Matrix::from_rows(&[[10.0, 20.0], [30.0, 40.0]]).unwrap();

        let sum = a.add(&b).unwrap();
        assert_eq!(sum, Matrix::from_rows(&[[11.0, 22.0], [33.0, 44.0]]).unwrap());

        // Commutative
        assert_eq!(b.add(&a).unwrap(), sum);
    }

    #[test]
    fn add_rejects_shape_mismatch() {
        let a = Matrix::new(2, 3).unwrap();
        let b = Matrix::new(3, 2).unwrap();
        assert!(matches!(
            a.add(&b),
            Err(MatrixError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn add_into_writes_in_place() {
        let a = Matrix::from_rows(&[[1.0, 2.0]]).unwrap();
        let b = Matrix::from_rows(&[[3.0, 4.0]]).unwrap();
        let mut destination = Matrix::from_rows(&[[9.0, 9.0]]).unwrap();

        a.add_into(&b, &mut destination).unwrap();
        assert_eq!(destination, Matrix::from_rows(&[[4.0, 6.0]]).unwrap());
    }

    #[test]
    fn add_into_rejects_wrong_destination() {
        let a = Matrix::new(2, 2).unwrap();
        let b = Matrix::new(2, 2).unwrap();
        let mut destination = Matrix::new(2, 3).unwrap();
        assert!(matches!(
            a.add_into(&b, &mut destination),
            Err(MatrixError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn scale_by_one_is_noop() {
        let mut m = Matrix::from_rows(&[[1.5, -2.5], [0.0, 4.0]]).unwrap();
        let before = m.clone();
        m.scale(1.0);
        assert_eq!(m, before);
    }

    #[test]
    fn scale_by_zero_clears() {
        let mut m = Matrix::from_rows(&[[1.5, -2.5], [3.0, 4.0]]).unwrap();
        m.scale(0.0);
        assert!(m.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn multiply_concrete_scenario() {
        let a = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
        let b = Matrix::from_rows(&[[7.0, 8.0], [9.0, 10.0], [11.0, 12.0]]).unwrap();

        let product = a.multiply(&b).unwrap();
        assert_eq!(
            product,
            Matrix::from_rows(&[[58.0, 64.0], [139.0, 154.0]]).unwrap()
        );
    }

    #[test]
    fn multiply_rejects_inner_mismatch() {
        let a = Matrix::new(2, 3).unwrap();
        let b = Matrix::new(4, 2).unwrap();
        assert!(matches!(
            a.multiply(&b),
            Err(MatrixError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn multiply_into_writes_in_place() {
        let a = Matrix::from_rows(&[[2.0, 0.0], [0.0, 2.0]]).unwrap();
        let b = Matrix::from_rows(&[[1.0], [3.0]]).unwrap();
        let mut destination = Matrix::new(2, 1).unwrap();

        a.multiply_into(&b, &mut destination).unwrap();
        assert_eq!(destination, Matrix::from_rows(&[[2.0], [6.0]]).unwrap());
    }

    #[test]
    fn multiply_into_rejects_wrong_destination() {
        let a = Matrix::new(2, 3).unwrap();
        let b = Matrix::new(3, 2).unwrap();
        let mut destination = Matrix::new(3, 3).unwrap();
        assert!(matches!(
            a.multiply_into(&b, &mut destination),
            Err(MatrixError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn multiply_is_associative() {
        let a = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let b = Matrix::from_rows(&[[5.0, 6.0], [7.0, 8.0]]).unwrap();
        let c = Matrix::from_rows(&[[9.0, 10.0], [11.0, 12.0]]).unwrap();

        let left = a.multiply(&b).unwrap().multiply(&c).unwrap();
        let right = a.multiply(&b.multiply(&c).unwrap()).unwrap();
        assert_eq!(left, right);
    }

    #[test]
    fn identity_is_neutral_for_multiply() {
        let m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]).unwrap();
        let identity = Matrix::identity(2).unwrap();
        assert_eq!(m.multiply(&identity).unwrap(), m);
    }

    #[test]
    fn display_prints_rows_on_lines() {
        let m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        assert_eq!(m.to_string(), "1\t2\n3\t4\n");
    }
}
