//! Test fixtures and assertion helpers for Swirl development.
//!
//! [`fixtures`] builds the canonical velocity fields and images the solver
//! tests start from; the free functions here inspect the results.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use swirl_grid::Field;

/// Cell with the largest Euclidean texel norm. Ties resolve to the first
/// cell in row-major order.
pub fn argmax_magnitude<const C: usize>(field: &Field<C>) -> (usize, usize) {
    let mut best = (0, 0);
    let mut best_norm = f32::NEG_INFINITY;
    for y in 0..field.height() {
        for x in 0..field.width() {
            let n: f32 = field.get(x, y).iter().map(|c| c * c).sum();
            if n > best_norm {
                best_norm = n;
                best = (x, y);
            }
        }
    }
    best
}

/// Whether every component of every texel is exactly zero.
pub fn is_all_zero<const C: usize>(field: &Field<C>) -> bool {
    field.as_flat().iter().all(|&v| v == 0.0)
}

/// Largest absolute component difference between two same-sized fields.
///
/// Panics if the sizes differ.
pub fn max_abs_diff<const C: usize>(a: &Field<C>, b: &Field<C>) -> f32 {
    assert_eq!(a.size(), b.size(), "fields differ in size");
    a.as_flat()
        .iter()
        .zip(b.as_flat())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f32::max)
}

/// Assert two fields agree component-wise within `tol`.
#[track_caller]
pub fn assert_fields_close<const C: usize>(a: &Field<C>, b: &Field<C>, tol: f32) {
    let diff = max_abs_diff(a, b);
    assert!(diff <= tol, "fields differ by {diff} (tolerance {tol})");
}
