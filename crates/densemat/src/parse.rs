//! Plain-text matrix input.
//!
//! One row per line, values separated by whitespace, blank lines skipped.
//! The output side is the `Display` impl of [`DenseMatrix`].
use std::str::FromStr;

use crate::error::{MatrixError, ParseError};
use crate::matrix::DenseMatrix;

impl FromStr for DenseMatrix {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cols = None;
        let mut rows = 0;
        let mut elements = Vec::new();

        for (idx, line) in s.lines().enumerate() {
            let line_nr = idx + 1;
            if line.trim().is_empty() {
                continue;
            }

            let mut found = 0;
            for token in line.split_whitespace() {
                let value = token
                    .parse::<f64>()
                    .map_err(|_| ParseError::InvalidNumber {
                        line: line_nr,
                        token: token.to_string(),
                    })?;
                elements.push(value);
                found += 1;
            }

            match cols {
                None => cols = Some(found),
                Some(expected) if expected != found => {
                    return Err(ParseError::Ragged {
                        line: line_nr,
                        expected,
                        found,
                    }
                    .into())
                }
                Some(_) => {}
            }
            rows += 1;
        }

        match cols {
            Some(cols) => Ok(DenseMatrix::from_parts(rows, cols, elements)),
            None => Err(ParseError::Empty.into()),
        }
    }
}
