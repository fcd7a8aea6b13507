//! Core types and identifiers for the Swirl fluid solver.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! vocabulary shared by every other crate in the workspace: buffer and
//! layer identifiers, boundary modes, pointer input, per-tick simulation
//! parameters, and selector errors.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod boundary;
pub mod error;
pub mod id;
pub mod input;
pub mod params;

pub use boundary::BoundaryMode;
pub use error::SelectorError;
pub use id::{BufferId, ColorLayer, TickId};
pub use input::{Gesture, PointerState};
pub use params::SimulationParams;
