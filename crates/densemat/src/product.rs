//! Matrix product.
//!
//! Every block product goes through ndarray's dense kernel. Oversized left
//! operands are split into contiguous row blocks that are multiplied against
//! the full right operand on the rayon pool and concatenated in block order.
use ndarray::ArrayView2;
use rayon::prelude::*;

use crate::config::ProductConfig;
use crate::error::{Result, ShapeError};
use crate::matrix::DenseMatrix;

/// `block` holds `block.len() / inner` whole rows of the left operand.
fn block_product(block: &[f64], inner: usize, rhs: &DenseMatrix) -> Result<Vec<f64>> {
    let lhs = ArrayView2::from_shape((block.len() / inner, inner), block)?;
    let rhs = ArrayView2::from_shape(rhs.shape(), rhs.as_slice())?;
    let product = lhs.dot(&rhs);
    Ok(product.iter().copied().collect())
}

impl DenseMatrix {
    /// Matrix product `self @ rhs` with the default [`ProductConfig`].
    pub fn matmul(&self, rhs: &DenseMatrix) -> Result<DenseMatrix> {
        self.matmul_with(rhs, &ProductConfig::default())
    }

    /// Matrix product `self @ rhs`.
    ///
    /// Requires `self.ncols() == rhs.nrows()`; the result has shape
    /// `(self.nrows(), rhs.ncols())`.
    pub fn matmul_with(&self, rhs: &DenseMatrix, config: &ProductConfig) -> Result<DenseMatrix> {
        let (rows, inner) = self.shape();
        if inner != rhs.nrows() {
            return Err(ShapeError::Incompatible {
                op: "matmul",
                lhs: self.shape(),
                rhs: rhs.shape(),
            }
            .into());
        }

        let elements = if config.fans_out(self.as_slice().len()) {
            let block_rows = config.rows_per_block(rows);
            log::debug!(
                "matmul ({}, {}) @ ({}, {}): {} row blocks of {} rows",
                rows,
                inner,
                rhs.nrows(),
                rhs.ncols(),
                rows.div_ceil(block_rows),
                block_rows
            );

            // indexed collect keeps partition order regardless of which block finishes first
            let blocks = self
                .as_slice()
                .par_chunks(block_rows * inner)
                .map(|block| block_product(block, inner, rhs))
                .collect::<Result<Vec<Vec<f64>>>>()?;
            blocks.concat()
        } else {
            log::trace!(
                "matmul ({}, {}) @ ({}, {}) on the calling thread",
                rows,
                inner,
                rhs.nrows(),
                rhs.ncols()
            );
            block_product(self.as_slice(), inner, rhs)?
        };

        Ok(DenseMatrix::from_parts(rows, rhs.ncols(), elements))
    }
}
