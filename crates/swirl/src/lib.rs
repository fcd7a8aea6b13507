//! Swirl: a grid-based Stable Fluids solver for real-time applications.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Swirl sub-crates. For most users, adding `swirl` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use swirl::prelude::*;
//!
//! // A 64×64 box of fluid with a solid-colour dye layer.
//! let mut session = FluidSession::new(FluidConfig::square(64)).unwrap();
//! session.reset_color_field(ColorLayer::First, Image::solid(64, 64, [0.2, 0.4, 1.0, 1.0]));
//!
//! // One frame of a mouse drag to the right.
//! let pointer = PointerState::drag([0.0, 0.0], [0.05, 0.0]);
//! let result = session.step(1.0 / 60.0, &pointer, &SimulationParams::default());
//! assert_eq!(result.tick_id, TickId(1));
//!
//! // Hand the dye to a renderer.
//! let dye = session.view(BufferId::ColorBuffer1).as_flat();
//! assert_eq!(dye.len(), 64 * 64 * 4);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `swirl-core` | IDs, boundary modes, pointer input, parameters |
//! | [`grid`] | `swirl-grid` | Fields, grid sizing, sampling, images |
//! | [`stages`] | `swirl-stages` | Stage trait, pipeline, the solver stages |
//! | [`engine`] | `swirl-engine` | Sessions, configuration, buffer access |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and IDs (`swirl-core`).
///
/// Contains [`types::BufferId`], [`types::BoundaryMode`],
/// [`types::PointerState`] and [`types::SimulationParams`].
pub use swirl_core as types;

/// Field storage and sampling (`swirl-grid`).
///
/// [`grid::Field`] and its aliases, [`grid::GridSize`] sizing rules,
/// [`grid::PingPong`] double buffers and [`grid::Image`] resampling.
pub use swirl_grid as grid;

/// Solver stages and pipeline validation (`swirl-stages`).
///
/// The [`stages::Stage`] trait is the extension point for replacing a step
/// of the solver, e.g. a different pressure solve.
pub use swirl_stages as stages;

/// Session orchestration (`swirl-engine`).
///
/// [`engine::FluidSession`] owns one simulation and runs its ticks.
pub use swirl_engine as engine;

/// Common imports for typical Swirl usage.
///
/// ```rust
/// use swirl::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use swirl_core::{
        BoundaryMode, BufferId, ColorLayer, Gesture, PointerState, SimulationParams, TickId,
    };

    // Errors
    pub use swirl_core::SelectorError;
    pub use swirl_engine::ConfigError;

    // Fields
    pub use swirl_grid::{ColorField, GridSize, Image, ScalarField, VectorField};

    // Stages
    pub use swirl_stages::{FluidBuffers, Stage, StageContext, StageKind};

    // Engine
    pub use swirl_engine::{
        BufferView, CycleConfig, FluidConfig, FluidSession, StepMetrics, StepResult,
    };
}
