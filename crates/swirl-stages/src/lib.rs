//! Solver stages for the Swirl fluid simulation.
//!
//! One tick of Stam's Stable Fluids is a fixed sequence of [`Stage`]s run
//! by a validated [`Pipeline`] over a session's [`FluidBuffers`]:
//!
//! | Order | Stage | Reads | Writes |
//! |-------|-------|-------|--------|
//! | 1 | [`VelocityAdvection`] | velocity | scratch |
//! | 2 | [`Diffusion`] | scratch | scratch (velocity holds the right-hand side) |
//! | 3 | [`Force`] | scratch | scratch |
//! | 4 | [`Projection`] | scratch | divergence, pressure, velocity |
//! | 5 | [`ColorAdvection`] | velocity, colour layers | colour layers |
//!
//! Every stage writes into a buffer distinct from the ones it reads in the
//! same pass. Jacobi relaxation ([`jacobi::iterate`], two
//! [`jacobi::relax`] passes per iteration) is shared by the diffusion and
//! pressure solves.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod advection;
pub mod buffers;
pub mod diagnostics;
pub mod diffusion;
pub mod force;
pub mod jacobi;
pub mod pipeline;
pub mod projection;
pub mod stage;

pub use advection::{advect, ColorAdvection, VelocityAdvection};
pub use buffers::FluidBuffers;
pub use diffusion::Diffusion;
pub use force::{force_vector, Force};
pub use pipeline::{Pipeline, PipelineError, StageTimings};
pub use projection::Projection;
pub use stage::{ForceInput, Stage, StageContext, StageKind};
