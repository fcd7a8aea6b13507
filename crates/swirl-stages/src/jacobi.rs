//! Jacobi relaxation for the implicit diffusion and pressure solves.

use swirl_core::BoundaryMode;
use swirl_grid::{Field, PingPong};

/// One Jacobi pass over the whole grid:
///
/// `out = (x_l + x_r + x_d + x_u + α·b) / β`
///
/// with neighbours of `x` resolved under `mode`. `out` must not alias `x`
/// or `b`, which the signature enforces. All three fields share one size.
pub fn relax<const C: usize>(
    x: &Field<C>,
    b: &Field<C>,
    out: &mut Field<C>,
    alpha: f32,
    beta: f32,
    mode: BoundaryMode,
) {
    let inv_beta = beta.recip();
    out.fill_with(|cx, cy| {
        let (ix, iy) = (cx as isize, cy as isize);
        let l = x.fetch(ix - 1, iy, mode);
        let r = x.fetch(ix + 1, iy, mode);
        let d = x.fetch(ix, iy - 1, mode);
        let u = x.fetch(ix, iy + 1, mode);
        let rhs = b.get(cx, cy);
        let mut v = [0.0; C];
        for c in 0..C {
            v[c] = (l[c] + r[c] + d[c] + u[c] + alpha * rhs[c]) * inv_beta;
        }
        v
    });
}

/// Run `iterations` Jacobi iterations on `pair` against the fixed `b`.
///
/// Each iteration is two passes (front into back, then back into front),
/// so the solution ends in the slot it started in.
pub fn iterate<const C: usize>(
    pair: &mut PingPong<Field<C>>,
    b: &Field<C>,
    iterations: u32,
    alpha: f32,
    beta: f32,
    mode: BoundaryMode,
) {
    for _ in 0..iterations {
        for _ in 0..2 {
            let (x, out) = pair.split();
            relax(x, b, out, alpha, beta, mode);
            pair.flip();
        }
    }
}
