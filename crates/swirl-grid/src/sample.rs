//! Boundary-resolved addressing and bilinear interpolation.

use swirl_core::BoundaryMode;

/// Resolve an axis coordinate that may lie outside `[0, len)`.
///
/// Solid and open walls clamp to the nearest edge cell; looped walls wrap
/// around. `len` must be non-zero.
#[inline]
pub fn resolve_axis(i: isize, len: usize, mode: BoundaryMode) -> usize {
    let n = len as isize;
    if (0..n).contains(&i) {
        return i as usize;
    }
    if mode.wraps() {
        i.rem_euclid(n) as usize
    } else {
        i.clamp(0, n - 1) as usize
    }
}

/// Split a texel-space coordinate into the lower corner index and the
/// fractional weight towards the next texel. Texel centres sit at `i + 0.5`.
///
/// NaN coordinates yield index 0 and a NaN weight, so NaN propagates into
/// the interpolated value.
#[inline]
pub(crate) fn corner(p: f32) -> (isize, f32) {
    let shifted = p - 0.5;
    let base = shifted.floor();
    (base as isize, shifted - base)
}

/// `a·(1−t) + b·t` per component. Exact for `t == 0`.
#[inline]
pub(crate) fn lerp<const C: usize>(a: [f32; C], b: [f32; C], t: f32) -> [f32; C] {
    let mut out = [0.0; C];
    for c in 0..C {
        out[c] = a[c] * (1.0 - t) + b[c] * t;
    }
    out
}
