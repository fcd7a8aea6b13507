//! Field storage for the Swirl fluid solver.
//!
//! Every quantity the solver evolves lives in a [`Field`]: a dense
//! `width × height` grid of `C`-component `f32` texels. This crate owns
//! the sizing rules ([`GridSize`]), boundary-resolved reads and bilinear
//! sampling ([`sample`]), the double buffers stages write through
//! ([`PingPong`]), and resampling of caller images into fields ([`Image`]).
//!
//! With the `parallel` feature, whole-grid fills distribute rows across
//! the rayon thread pool. Results are bit-identical to the sequential path.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod field;
pub mod image;
pub mod pingpong;
pub mod resolution;
pub mod sample;

mod parallel;

pub use error::FieldError;
pub use field::{ColorField, Field, ScalarField, VectorField};
pub use image::Image;
pub use pingpong::PingPong;
pub use resolution::{GridSize, MIN_RESOLUTION, TILE_SIZE};
pub use sample::resolve_axis;
