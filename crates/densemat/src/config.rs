use serde::{Deserialize, Serialize};

/// Tuning for the matrix product.
///
/// Products whose left operand holds more than `parallel_threshold` elements
/// are split into row blocks and computed on the rayon pool. The result does
/// not depend on these settings beyond floating-point rounding.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ProductConfig {
    /// Number of left-operand elements above which the product fans out.
    pub parallel_threshold: usize,

    /// Rows per block. `None` spreads the rows evenly over the rayon threads.
    pub block_rows: Option<usize>,
}

impl ProductConfig {
    /// Element count of a 1024 x 1024 left operand.
    pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1 << 20;

    pub fn new(parallel_threshold: usize, block_rows: Option<usize>) -> Self {
        Self {
            parallel_threshold,
            block_rows,
        }
    }

    /// A configuration that never fans out.
    pub fn serial() -> Self {
        Self {
            parallel_threshold: usize::MAX,
            block_rows: None,
        }
    }

    /// Whether a left operand of `elements` values takes the blocked path.
    pub fn fans_out(&self, elements: usize) -> bool {
        elements > self.parallel_threshold
    }

    /// Rows per block for a left operand with `rows` rows, always in `1..=rows`.
    pub fn rows_per_block(&self, rows: usize) -> usize {
        let rows = rows.max(1);
        let per_block = self
            .block_rows
            .unwrap_or_else(|| rows.div_ceil(rayon::current_num_threads().max(1)));
        per_block.clamp(1, rows)
    }
}

impl Default for ProductConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: Self::DEFAULT_PARALLEL_THRESHOLD,
            block_rows: None,
        }
    }
}
