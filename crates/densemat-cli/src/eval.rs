//! Translate a command-line request into calls on `DenseMatrix`.
use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Result};
use densemat::{DenseMatrix, ProductConfig};

/// Operations exposed by `densemat eval`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Matmul,
    Pow,
    Transpose,
}

impl Operation {
    pub const NAMES: [&'static str; 6] = ["add", "sub", "mul", "matmul", "pow", "transpose"];
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(Operation::Add),
            "sub" => Ok(Operation::Subtract),
            "mul" => Ok(Operation::Multiply),
            "matmul" => Ok(Operation::Matmul),
            "pow" => Ok(Operation::Pow),
            "transpose" => Ok(Operation::Transpose),
            _ => Err(format!(
                "Unknown operation: {}. Expected one of: {}",
                s,
                Operation::NAMES.join(", ")
            )),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Add => "add",
            Operation::Subtract => "sub",
            Operation::Multiply => "mul",
            Operation::Matmul => "matmul",
            Operation::Pow => "pow",
            Operation::Transpose => "transpose",
        };
        f.write_str(name)
    }
}

/// Everything `densemat eval` needs to produce one matrix.
#[derive(Debug, Clone)]
pub struct EvalRequest {
    pub op: Operation,
    pub lhs: DenseMatrix,
    pub rhs: Option<DenseMatrix>,
    pub scalar: Option<f64>,
    pub exponent: Option<i32>,
    pub config: ProductConfig,
}

impl EvalRequest {
    pub fn new(op: Operation, lhs: DenseMatrix) -> Self {
        Self {
            op,
            lhs,
            rhs: None,
            scalar: None,
            exponent: None,
            config: ProductConfig::default(),
        }
    }
}

pub fn evaluate(request: &EvalRequest) -> Result<DenseMatrix> {
    reject_unused_operands(request)?;
    let lhs = &request.lhs;
    let result = match request.op {
        Operation::Add | Operation::Subtract | Operation::Multiply => {
            let rhs = match (&request.rhs, request.scalar) {
                (Some(_), Some(_)) => bail!(
                    "'{}' takes either a right operand or --scalar, not both",
                    request.op
                ),
                (Some(matrix), None) => densemat::Operand::Matrix(matrix),
                (None, Some(value)) => densemat::Operand::Scalar(value),
                (None, None) => bail!("'{}' needs a right operand or --scalar", request.op),
            };
            match request.op {
                Operation::Add => lhs.add(rhs)?,
                Operation::Subtract => lhs.subtract(rhs)?,
                _ => lhs.multiply_elementwise(rhs)?,
            }
        }
        Operation::Matmul => match &request.rhs {
            Some(rhs) => lhs.matmul_with(rhs, &request.config)?,
            None => bail!("'matmul' needs a right operand"),
        },
        Operation::Pow => match request.exponent {
            Some(exponent) => lhs.pow_elementwise(exponent),
            None => bail!("'pow' needs --exponent"),
        },
        Operation::Transpose => lhs.transpose().clone(),
    };
    Ok(result)
}

/// Fail on operands the chosen operation would otherwise ignore.
fn reject_unused_operands(request: &EvalRequest) -> Result<()> {
    let (takes_rhs, takes_scalar, takes_exponent) = match request.op {
        Operation::Add | Operation::Subtract | Operation::Multiply => (true, true, false),
        Operation::Matmul => (true, false, false),
        Operation::Pow => (false, false, true),
        Operation::Transpose => (false, false, false),
    };
    if request.rhs.is_some() && !takes_rhs {
        bail!("'{}' does not take a right operand", request.op);
    }
    if request.scalar.is_some() && !takes_scalar {
        bail!("'{}' does not take --scalar", request.op);
    }
    if request.exponent.is_some() && !takes_exponent {
        bail!("'{}' does not take --exponent", request.op);
    }
    Ok(())
}

/// Operands of the showcase expression `(A + B) @ (A - B)**2`.
pub fn demo_operands() -> Result<(DenseMatrix, DenseMatrix)> {
    let a = DenseMatrix::from_rows(&[[1, 2], [3, 4]])?;
    let b = DenseMatrix::from_row(&[5, 6])?;
    Ok((a, b))
}

/// `(A + B) @ (A - B)**2` with `B` broadcast over the rows of `A`.
pub fn demo_expression(a: &DenseMatrix, b: &DenseMatrix) -> Result<DenseMatrix> {
    let sum = a.add(b)?;
    let squared = a.subtract(b)?.pow_elementwise(2);
    Ok(sum.matmul(&squared)?)
}
