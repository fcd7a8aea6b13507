//! Field-level errors.

use std::error::Error;
use std::fmt;

use crate::resolution::GridSize;

/// Errors from whole-field operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldError {
    /// A copy between fields of different dimensions.
    ShapeMismatch {
        /// Size of the destination field.
        expected: GridSize,
        /// Size of the source field.
        actual: GridSize,
    },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShapeMismatch { expected, actual } => {
                write!(f, "shape mismatch: expected {expected}, got {actual}")
            }
        }
    }
}

impl Error for FieldError {}
