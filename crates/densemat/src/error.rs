use std::error::Error;
use std::fmt;

/// Shape of a matrix as `(rows, cols)`.
pub type Shape = (usize, usize);

/// Dimension mismatch on construction, elementwise ops or the matrix product.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeError {
    /// A zero extent, or no data at all.
    Empty,
    /// Flat buffer whose length is not `rows * cols`.
    Buffer { rows: usize, cols: usize, len: usize },
    /// `rows * cols` does not fit in `usize`.
    Overflow { rows: usize, cols: usize },
    /// Nested input whose `row` has a different length than the first row.
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// Operand shapes that neither match nor broadcast.
    Incompatible {
        op: &'static str,
        lhs: Shape,
        rhs: Shape,
    },
    /// Failure reported by the ndarray kernel.
    Backend(String),
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeError::Empty => write!(f, "matrix must have at least one row and one column"),
            ShapeError::Buffer { rows, cols, len } => write!(
                f,
                "invalid shape ({}, {}) for buffer of length {}",
                rows, cols, len
            ),
            ShapeError::Overflow { rows, cols } => write!(
                f,
                "shape ({}, {}) has more elements than fit in memory",
                rows, cols
            ),
            ShapeError::Ragged {
                row,
                expected,
                found,
            } => write!(
                f,
                "ragged input: row {} has {} values, expected {}",
                row, found, expected
            ),
            ShapeError::Incompatible { op, lhs, rhs } => write!(
                f,
                "cannot {} shapes ({}, {}) and ({}, {})",
                op, lhs.0, lhs.1, rhs.0, rhs.1
            ),
            ShapeError::Backend(msg) => write!(f, "array backend rejected shape: {}", msg),
        }
    }
}

impl Error for ShapeError {}

impl From<ndarray::ShapeError> for ShapeError {
    fn from(err: ndarray::ShapeError) -> Self {
        ShapeError::Backend(err.to_string())
    }
}

/// Malformed textual matrix input. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    Empty,
    InvalidNumber { line: usize, token: String },
    Ragged {
        line: usize,
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "no matrix rows found in input"),
            ParseError::InvalidNumber { line, token } => {
                write!(f, "line {}: '{}' is not a number", line, token)
            }
            ParseError::Ragged {
                line,
                expected,
                found,
            } => write!(
                f,
                "line {}: expected {} values, found {}",
                line, expected, found
            ),
        }
    }
}

impl Error for ParseError {}

/// Exponent outside the supported power convention.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainError {
    pub exponent: f64,
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported exponent {} for elementwise power", self.exponent)
    }
}

impl Error for DomainError {}

/// Every failure a matrix operation can signal.
#[derive(Debug, Clone, PartialEq)]
pub enum MatrixError {
    Shape(ShapeError),
    Parse(ParseError),
    Domain(DomainError),
}

impl fmt::Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixError::Shape(err) => write!(f, "shape error: {}", err),
            MatrixError::Parse(err) => write!(f, "parse error: {}", err),
            MatrixError::Domain(err) => write!(f, "domain error: {}", err),
        }
    }
}

impl Error for MatrixError {}

impl From<ShapeError> for MatrixError {
    fn from(err: ShapeError) -> Self {
        MatrixError::Shape(err)
    }
}

impl From<ParseError> for MatrixError {
    fn from(err: ParseError) -> Self {
        MatrixError::Parse(err)
    }
}

impl From<DomainError> for MatrixError {
    fn from(err: DomainError) -> Self {
        MatrixError::Domain(err)
    }
}

impl From<ndarray::ShapeError> for MatrixError {
    fn from(err: ndarray::ShapeError) -> Self {
        MatrixError::Shape(err.into())
    }
}

pub type Result<T> = std::result::Result<T, MatrixError>;
