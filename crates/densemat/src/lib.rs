//! densemat: a small dense matrix value type over `f64`.
//!
//! `DenseMatrix` offers elementwise add / subtract / multiply with array-style
//! broadcasting, elementwise powers, a matrix product backed by ndarray that
//! fans out over rayon for oversized operands, and a transpose that is cached
//! until explicitly cleared. Matrices move in and out of text through
//! `FromStr` and `Display`.
//!
//! Every operation returns a new matrix; failures are reported through
//! [`MatrixError`] and never logged.
pub mod config;
pub mod error;
pub mod matrix;
pub mod ops;
pub mod parse;
pub mod product;

pub use config::ProductConfig;
pub use error::{DomainError, MatrixError, ParseError, Result, Shape, ShapeError};
pub use matrix::DenseMatrix;
pub use ops::Operand;
