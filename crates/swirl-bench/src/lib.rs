//! Benchmark profiles and utilities for the Swirl fluid solver.
//!
//! Provides pre-built [`FluidConfig`] profiles for benchmarking and examples:
//!
//! - [`reference_profile`]: 128x128 grid (16K cells), 1080p viewport aspect
//!   squashed to square
//! - [`stress_profile`]: 512x512 grid (~262K cells), the default resolution
//! - [`orbit_pointer`]: a deterministic drag gesture for driving ticks

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::f32::consts::TAU;

use swirl_core::{BoundaryMode, Gesture, PointerState};
use swirl_engine::{CycleConfig, FluidConfig};

/// Build a reference benchmark profile: 128x128 grid (16K cells).
///
/// Solid walls, default parameters (20 + 20 Jacobi passes), flow cycle on.
pub fn reference_profile(seed: u64) -> FluidConfig {
    FluidConfig {
        seed,
        cycle: Some(CycleConfig::default()),
        ..FluidConfig::square(128)
    }
}

/// Build a stress benchmark profile: 512x512 grid (~262K cells).
///
/// Same pipeline as [`reference_profile`] with looped walls, so every
/// sample takes the wrapping path.
pub fn stress_profile(seed: u64) -> FluidConfig {
    FluidConfig {
        seed,
        boundary: BoundaryMode::LoopedWalls,
        cycle: Some(CycleConfig::default()),
        ..FluidConfig::square(512)
    }
}

/// Pointer state for tick `tick` of a drag orbiting the domain centre at
/// radius 0.2, one revolution every 120 ticks.
pub fn orbit_pointer(tick: u64) -> PointerState {
    let at = |t: u64| {
        let angle = TAU * (t % 120) as f32 / 120.0;
        [0.2 * angle.cos(), 0.2 * angle.sin()]
    };
    PointerState {
        position: at(tick),
        previous: at(tick + 119),
        gesture: Gesture::Drag,
    }
}
