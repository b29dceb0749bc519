use std::fmt;
use std::ops::Index;
use std::slice::ChunksExact;
use std::sync::OnceLock;

use ndarray::Array2;
use num_traits::AsPrimitive;

use crate::error::{Result, Shape, ShapeError};

/// A dense, row-major matrix of `f64` values.
///
/// Shape and elements are fixed once constructed; arithmetic returns new
/// matrices. The transpose is computed on first request and kept until
/// [`DenseMatrix::clear_cache`] is called.
#[derive(Clone)]
pub struct DenseMatrix {
    rows: usize,
    cols: usize,
    elements: Vec<f64>,
    transposed: OnceLock<Box<DenseMatrix>>,
}

fn element_count(rows: usize, cols: usize) -> Result<usize> {
    rows.checked_mul(cols)
        .ok_or_else(|| ShapeError::Overflow { rows, cols }.into())
}

impl DenseMatrix {
    /// Build from a flat row-major buffer.
    pub fn from_shape_vec(shape: Shape, elements: Vec<f64>) -> Result<Self> {
        let (rows, cols) = shape;
        if rows == 0 || cols == 0 {
            return Err(ShapeError::Empty.into());
        }
        if elements.len() != element_count(rows, cols)? {
            return Err(ShapeError::Buffer {
                rows,
                cols,
                len: elements.len(),
            }
            .into());
        }
        Ok(Self::from_parts(rows, cols, elements))
    }

    /// Build from a rectangular nested sequence, coercing every value to `f64`.
    pub fn from_rows<R, T>(rows: &[R]) -> Result<Self>
    where
        R: AsRef<[T]>,
        T: AsPrimitive<f64>,
    {
        let cols = match rows.first() {
            Some(first) => first.as_ref().len(),
            None => return Err(ShapeError::Empty.into()),
        };
        if cols == 0 {
            return Err(ShapeError::Empty.into());
        }

        let mut elements = Vec::with_capacity(rows.len() * cols);
        for (idx, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(ShapeError::Ragged {
                    row: idx,
                    expected: cols,
                    found: row.len(),
                }
                .into());
            }
            elements.extend(row.iter().map(|v| v.as_()));
        }

        Ok(Self::from_parts(rows.len(), cols, elements))
    }

    /// A one-dimensional sequence becomes a single row.
    pub fn from_row<T: AsPrimitive<f64>>(values: &[T]) -> Result<Self> {
        Self::from_shape_vec((1, values.len()), values.iter().map(|v| v.as_()).collect())
    }

    pub fn from_elem(rows: usize, cols: usize, value: f64) -> Result<Self> {
        let len = element_count(rows, cols)?;
        Self::from_shape_vec((rows, cols), vec![value; len])
    }

    pub fn identity(n: usize) -> Result<Self> {
        let mut eye = vec![0.0; element_count(n, n)?];
        for i in 0..n {
            eye[i * n + i] = 1.0;
        }
        Self::from_shape_vec((n, n), eye)
    }

    /// Callers guarantee `rows >= 1`, `cols >= 1` and `elements.len() == rows * cols`.
    pub(crate) fn from_parts(rows: usize, cols: usize, elements: Vec<f64>) -> Self {
        debug_assert!(rows > 0 && cols > 0);
        debug_assert_eq!(elements.len(), rows * cols);
        Self {
            rows,
            cols,
            elements,
            transposed: OnceLock::new(),
        }
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> Shape {
        (self.rows, self.cols)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.elements
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.elements
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.elements[self.offset(row, col)])
        } else {
            None
        }
    }

    pub fn row_slice(&self, row: usize) -> &[f64] {
        let start = self.offset(row, 0);
        &self.elements[start..start + self.cols]
    }

    pub fn rows(&self) -> ChunksExact<'_, f64> {
        self.elements.chunks_exact(self.cols)
    }

    pub fn mapv<F>(&self, f: F) -> DenseMatrix
    where
        F: Fn(f64) -> f64,
    {
        Self::from_parts(
            self.rows,
            self.cols,
            self.elements.iter().map(|&v| f(v)).collect(),
        )
    }

    /// The transpose, computed on the first call and cached afterwards.
    pub fn transpose(&self) -> &DenseMatrix {
        self.transposed
            .get_or_init(|| Box::new(self.compute_transpose()))
    }

    /// Drop the cached transpose, if any.
    pub fn clear_cache(&mut self) {
        self.transposed.take();
    }

    pub fn is_transpose_cached(&self) -> bool {
        self.transposed.get().is_some()
    }

    fn compute_transpose(&self) -> DenseMatrix {
        let mut elements = Vec::with_capacity(self.elements.len());
        for col in 0..self.cols {
            for row in 0..self.rows {
                elements.push(self.elements[self.offset(row, col)]);
            }
        }
        Self::from_parts(self.cols, self.rows, elements)
    }
}

impl Index<(usize, usize)> for DenseMatrix {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        assert!(
            index.0 < self.rows && index.1 < self.cols,
            "index ({}, {}) out of bounds for shape ({}, {})",
            index.0,
            index.1,
            self.rows,
            self.cols
        );
        &self.elements[self.offset(index.0, index.1)]
    }
}

/// Shape and elements only; the transpose cache never affects equality.
impl PartialEq for DenseMatrix {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows && self.cols == other.cols && self.elements == other.elements
    }
}

impl fmt::Debug for DenseMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DenseMatrix")
            .field("shape", &self.shape())
            .field("elements", &self.elements)
            .field("transpose_cached", &self.is_transpose_cached())
            .finish()
    }
}

/// Two decimals per value, space separated, one row per line.
impl fmt::Display for DenseMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, row) in self.rows().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            for (col, value) in row.iter().enumerate() {
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:.2}", value)?;
            }
        }
        Ok(())
    }
}

impl From<DenseMatrix> for Array2<f64> {
    fn from(matrix: DenseMatrix) -> Self {
        let shape = matrix.shape();
        Array2::from_shape_vec(shape, matrix.elements)
            .expect("DenseMatrix buffer always matches its shape")
    }
}

impl TryFrom<Array2<f64>> for DenseMatrix {
    type Error = crate::error::MatrixError;

    fn try_from(array: Array2<f64>) -> Result<Self> {
        let shape = array.dim();
        // iter() walks logical row-major order whatever the memory layout
        let elements = array.iter().copied().collect();
        DenseMatrix::from_shape_vec(shape, elements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compute_transpose_moves_elements() {
        let m = DenseMatrix::from_rows(&[[1, 2, 3], [4, 5, 6]]).unwrap();
        let t = m.compute_transpose();
        assert_eq!(t.shape(), (3, 2));
        assert_eq!(t.as_slice(), &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
        for i in 0..2 {
            for j in 0..3 {
                assert_eq!(t.as_slice()[j * 2 + i], m.as_slice()[i * 3 + j]);
            }
        }
    }

    #[test]
    fn equality_ignores_cache() {
        let a = DenseMatrix::from_rows(&[[1.0, 2.0]]).unwrap();
        let b = a.clone();
        let _ = a.transpose();
        assert!(a.is_transpose_cached());
        assert!(!b.is_transpose_cached());
        assert_eq!(a, b);
    }
}
