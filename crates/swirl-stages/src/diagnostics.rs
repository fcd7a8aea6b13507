//! Cheap whole-field measurements used by metrics and tests.

use swirl_core::BoundaryMode;
use swirl_grid::VectorField;

use crate::projection::divergence_at;

/// Largest `|div u|` over cells at least `margin` cells from every edge.
///
/// A margin of 1 skips the border row that wall modes overwrite after
/// projection. Returns 0 when the margin leaves no cells.
pub fn max_divergence(velocity: &VectorField, mode: BoundaryMode, margin: usize) -> f32 {
    let (w, h) = (velocity.width(), velocity.height());
    if 2 * margin >= w || 2 * margin >= h {
        return 0.0;
    }
    let dx = velocity.size().dx();
    let mut max = 0.0f32;
    for y in margin..h - margin {
        for x in margin..w - margin {
            let d = divergence_at(velocity, x as isize, y as isize, dx, mode).abs();
            max = max.max(d);
        }
    }
    max
}

/// `½ Σ |u|² · dx²`: kinetic energy per unit density over the domain.
pub fn kinetic_energy(velocity: &VectorField) -> f64 {
    let dx = f64::from(velocity.size().dx());
    let sum: f64 = velocity
        .texels()
        .iter()
        .map(|[u, v]| f64::from(*u) * f64::from(*u) + f64::from(*v) * f64::from(*v))
        .sum();
    0.5 * sum * dx * dx
}
