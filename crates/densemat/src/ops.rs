//! Elementwise arithmetic with broadcasting, elementwise powers and the
//! operator overloads that forward to them.
//!
//! Broadcasting follows the usual array rules in two dimensions: per axis the
//! extents must match or one of them must be 1, and the result takes the
//! larger extent. A scalar therefore combines with every element and a row
//! of length `cols` with every row.
use std::ops::{Add, Mul, Neg, Sub};

use crate::error::{DomainError, Result, Shape, ShapeError};
use crate::matrix::DenseMatrix;

/// Right-hand side of an elementwise operation.
#[derive(Debug, Clone, Copy)]
pub enum Operand<'a> {
    Matrix(&'a DenseMatrix),
    /// Treated as a `1 x len` matrix.
    Row(&'a [f64]),
    Scalar(f64),
}

impl<'a> From<&'a DenseMatrix> for Operand<'a> {
    fn from(value: &'a DenseMatrix) -> Self {
        Operand::Matrix(value)
    }
}

impl<'a> From<&'a [f64]> for Operand<'a> {
    fn from(value: &'a [f64]) -> Self {
        Operand::Row(value)
    }
}

impl<'a, const N: usize> From<&'a [f64; N]> for Operand<'a> {
    fn from(value: &'a [f64; N]) -> Self {
        Operand::Row(value.as_slice())
    }
}

impl From<f64> for Operand<'_> {
    fn from(value: f64) -> Self {
        Operand::Scalar(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BinaryOp {
    Add,
    Subtract,
    Multiply,
}

impl BinaryOp {
    fn name(self) -> &'static str {
        match self {
            BinaryOp::Add => "add",
            BinaryOp::Subtract => "subtract",
            BinaryOp::Multiply => "multiply",
        }
    }

    #[inline]
    fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            BinaryOp::Add => lhs + rhs,
            BinaryOp::Subtract => lhs - rhs,
            BinaryOp::Multiply => lhs * rhs,
        }
    }
}

/// Borrowed row-major data with a shape; the common form of every operand.
struct View<'a> {
    rows: usize,
    cols: usize,
    data: &'a [f64],
}

impl View<'_> {
    #[inline]
    fn at(&self, row: usize, col: usize) -> f64 {
        let row = if self.rows == 1 { 0 } else { row };
        let col = if self.cols == 1 { 0 } else { col };
        self.data[row * self.cols + col]
    }
}

fn broadcast_shape(op: BinaryOp, lhs: Shape, rhs: Shape) -> Result<Shape> {
    let axis = |a: usize, b: usize| {
        if a == b || b == 1 {
            Some(a)
        } else if a == 1 {
            Some(b)
        } else {
            None
        }
    };
    match (axis(lhs.0, rhs.0), axis(lhs.1, rhs.1)) {
        (Some(rows), Some(cols)) => Ok((rows, cols)),
        _ => Err(ShapeError::Incompatible {
            op: op.name(),
            lhs,
            rhs,
        }
        .into()),
    }
}

fn zip_broadcast(op: BinaryOp, lhs: View<'_>, rhs: View<'_>) -> Result<DenseMatrix> {
    let (rows, cols) = broadcast_shape(op, (lhs.rows, lhs.cols), (rhs.rows, rhs.cols))?;

    // same shape: straight zip
    if (lhs.rows, lhs.cols) == (rhs.rows, rhs.cols) {
        let elements = lhs
            .data
            .iter()
            .zip(rhs.data)
            .map(|(&a, &b)| op.apply(a, b))
            .collect();
        return Ok(DenseMatrix::from_parts(rows, cols, elements));
    }

    let mut elements = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            elements.push(op.apply(lhs.at(row, col), rhs.at(row, col)));
        }
    }
    Ok(DenseMatrix::from_parts(rows, cols, elements))
}

impl DenseMatrix {
    fn view(&self) -> View<'_> {
        View {
            rows: self.nrows(),
            cols: self.ncols(),
            data: self.as_slice(),
        }
    }

    fn elementwise(&self, op: BinaryOp, rhs: Operand<'_>) -> Result<DenseMatrix> {
        match rhs {
            Operand::Matrix(other) => zip_broadcast(op, self.view(), other.view()),
            Operand::Row(values) => {
                if values.is_empty() {
                    return Err(ShapeError::Empty.into());
                }
                let row = View {
                    rows: 1,
                    cols: values.len(),
                    data: values,
                };
                zip_broadcast(op, self.view(), row)
            }
            Operand::Scalar(value) => Ok(self.mapv(|v| op.apply(v, value))),
        }
    }

    /// Elementwise sum, broadcasting `rhs` when its shape allows.
    ///
    /// On an owned receiver with `std::ops::Add` in scope, `m.add(..)` picks
    /// the panicking operator; call `DenseMatrix::add(&m, ..)` or `(&m).add(..)`.
    pub fn add<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<DenseMatrix> {
        self.elementwise(BinaryOp::Add, rhs.into())
    }

    /// Elementwise difference `self - rhs`, broadcasting `rhs` when its shape allows.
    pub fn subtract<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<DenseMatrix> {
        self.elementwise(BinaryOp::Subtract, rhs.into())
    }

    /// Elementwise (Hadamard) product, broadcasting `rhs` when its shape allows.
    pub fn multiply_elementwise<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<DenseMatrix> {
        self.elementwise(BinaryOp::Multiply, rhs.into())
    }

    /// Raise every element to the integer power `exponent`.
    ///
    /// IEEE-754 semantics: `x^0 == 1` for every `x` including zero and NaN,
    /// and a negative exponent yields the reciprocal power (`0^-1 == inf`).
    pub fn pow_elementwise(&self, exponent: i32) -> DenseMatrix {
        self.mapv(|v| v.powi(exponent))
    }

    /// Raise every element to the real power `exponent`.
    ///
    /// Follows `f64::powf`, so a negative base with a fractional exponent
    /// gives NaN. A NaN exponent is rejected with a `DomainError`.
    pub fn powf_elementwise(&self, exponent: f64) -> Result<DenseMatrix> {
        if exponent.is_nan() {
            return Err(DomainError { exponent }.into());
        }
        Ok(self.mapv(|v| v.powf(exponent)))
    }
}

impl Neg for &DenseMatrix {
    type Output = DenseMatrix;

    fn neg(self) -> DenseMatrix {
        self.mapv(|v| -v)
    }
}

impl Neg for DenseMatrix {
    type Output = DenseMatrix;

    fn neg(self) -> DenseMatrix {
        -&self
    }
}

/// Operator forms panic on incompatible shapes; use the named methods to
/// handle the error. The owned `Add` impl shares its method name with the
/// inherent `add`, so `m.add(..)` on an owned matrix resolves to the operator
/// whenever `std::ops::Add` is imported.
macro_rules! impl_binary_operator {
    ($trait:ident, $method:ident, $op:expr) => {
        impl<'a, 'b> $trait<&'b DenseMatrix> for &'a DenseMatrix {
            type Output = DenseMatrix;

            fn $method(self, rhs: &'b DenseMatrix) -> DenseMatrix {
                self.elementwise($op, Operand::Matrix(rhs))
                    .unwrap_or_else(|err| panic!("{}", err))
            }
        }

        impl $trait<DenseMatrix> for DenseMatrix {
            type Output = DenseMatrix;

            fn $method(self, rhs: DenseMatrix) -> DenseMatrix {
                <&DenseMatrix as $trait<&DenseMatrix>>::$method(&self, &rhs)
            }
        }

        impl<'a> $trait<&'a DenseMatrix> for DenseMatrix {
            type Output = DenseMatrix;

            fn $method(self, rhs: &'a DenseMatrix) -> DenseMatrix {
                <&DenseMatrix as $trait<&DenseMatrix>>::$method(&self, rhs)
            }
        }

        impl<'a> $trait<f64> for &'a DenseMatrix {
            type Output = DenseMatrix;

            fn $method(self, rhs: f64) -> DenseMatrix {
                self.mapv(|v| $op.apply(v, rhs))
            }
        }

        impl $trait<f64> for DenseMatrix {
            type Output = DenseMatrix;

            fn $method(self, rhs: f64) -> DenseMatrix {
                <&DenseMatrix as $trait<f64>>::$method(&self, rhs)
            }
        }

        impl<'a> $trait<&'a DenseMatrix> for f64 {
            type Output = DenseMatrix;

            fn $method(self, rhs: &'a DenseMatrix) -> DenseMatrix {
                rhs.mapv(|v| $op.apply(self, v))
            }
        }

        impl $trait<DenseMatrix> for f64 {
            type Output = DenseMatrix;

            fn $method(self, rhs: DenseMatrix) -> DenseMatrix {
                <f64 as $trait<&DenseMatrix>>::$method(self, &rhs)
            }
        }
    };
}

impl_binary_operator!(Add, add, BinaryOp::Add);
impl_binary_operator!(Sub, sub, BinaryOp::Subtract);
impl_binary_operator!(Mul, mul, BinaryOp::Multiply);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn broadcast_shape_rules() {
        let op = BinaryOp::Add;
        assert_eq!(broadcast_shape(op, (3, 4), (3, 4)).unwrap(), (3, 4));
        assert_eq!(broadcast_shape(op, (3, 4), (1, 4)).unwrap(), (3, 4));
        assert_eq!(broadcast_shape(op, (1, 4), (3, 4)).unwrap(), (3, 4));
        assert_eq!(broadcast_shape(op, (3, 4), (3, 1)).unwrap(), (3, 4));
        assert_eq!(broadcast_shape(op, (3, 1), (1, 4)).unwrap(), (3, 4));
        assert_eq!(broadcast_shape(op, (3, 4), (1, 1)).unwrap(), (3, 4));
        assert!(broadcast_shape(op, (3, 4), (2, 4)).is_err());
        assert!(broadcast_shape(op, (3, 4), (1, 3)).is_err());
    }

    #[test]
    fn view_at_repeats_unit_axes() {
        let data = [1.0, 2.0, 3.0];
        let row = View {
            rows: 1,
            cols: 3,
            data: &data,
        };
        assert_eq!(row.at(5, 2), 3.0);

        let col = View {
            rows: 3,
            cols: 1,
            data: &data,
        };
        assert_eq!(col.at(1, 7), 2.0);
    }
}
