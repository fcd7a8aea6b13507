//! Selector errors shared across the workspace.
//!
//! Raised when a caller names a buffer or boundary mode that does not
//! exist. These never abort a tick: the session logs them and treats the
//! request as a no-op.

use std::error::Error;
use std::fmt;

/// An identifier supplied by the caller did not match any known entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectorError {
    /// A raw buffer id outside the buffer table.
    UnknownBuffer {
        /// The rejected raw id.
        raw: u32,
    },
    /// A buffer name that matches no buffer.
    UnknownBufferName {
        /// The rejected name, as supplied.
        name: String,
    },
    /// A boundary-mode name that matches no mode.
    UnknownBoundary {
        /// The rejected name, as supplied.
        name: String,
    },
}

impl fmt::Display for SelectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownBuffer { raw } => write!(f, "unknown buffer id {raw}"),
            Self::UnknownBufferName { name } => write!(f, "unknown buffer '{name}'"),
            Self::UnknownBoundary { name } => write!(f, "unknown boundary mode '{name}'"),
        }
    }
}

impl Error for SelectorError {}
