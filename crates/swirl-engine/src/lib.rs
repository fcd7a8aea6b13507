//! Step orchestration for Swirl fluid sessions.
//!
//! A [`FluidSession`] owns every field of one simulation and runs the
//! per-tick sequence: flow-cycle resets, pending clears and pinned
//! overrides, then the solver [`Pipeline`](swirl_stages::Pipeline).
//! Sessions share no state with each other and are [`Send`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod cycle;
pub mod metrics;
pub mod registry;
pub mod session;
pub mod view;

pub use config::{ConfigError, CycleConfig, FluidConfig};
pub use cycle::CycleClock;
pub use metrics::StepMetrics;
pub use registry::{BufferInfo, BufferKind, BufferTable};
pub use session::{FluidSession, StepResult};
pub use view::BufferView;
