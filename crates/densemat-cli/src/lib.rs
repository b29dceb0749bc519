//! densemat-cli: command-line adapter over the `densemat` matrix type.
//!
//! Reads matrices in the plain-text format, applies a single operation and
//! prints the rendering. No arithmetic lives here.
pub mod eval;
pub mod input;
