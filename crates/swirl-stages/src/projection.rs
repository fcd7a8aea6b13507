//! Pressure projection onto a (nearly) divergence-free velocity field.

use swirl_core::{BoundaryMode, SimulationParams};
use swirl_grid::{ScalarField, VectorField};

use crate::buffers::FluidBuffers;
use crate::jacobi::iterate;
use crate::stage::{Stage, StageContext, StageKind};

/// Central-difference divergence of `w` at a cell, neighbours resolved
/// under `mode`: `(w_r.x − w_l.x + w_u.y − w_d.y) / (2·dx)`.
#[inline]
pub fn divergence_at(w: &VectorField, x: isize, y: isize, dx: f32, mode: BoundaryMode) -> f32 {
    let l = w.fetch(x - 1, y, mode)[0];
    let r = w.fetch(x + 1, y, mode)[0];
    let d = w.fetch(x, y - 1, mode)[1];
    let u = w.fetch(x, y + 1, mode)[1];
    (r - l + u - d) * 0.5 / dx
}

/// Write the divergence of `w` into `out`.
pub fn divergence(w: &VectorField, out: &mut ScalarField, dx: f32, mode: BoundaryMode) {
    out.fill_with(|x, y| [divergence_at(w, x as isize, y as isize, dx, mode)]);
}

/// Pressure read for the gradient step. Solid walls never read the border
/// row of pressure; the other modes resolve like any other read.
#[inline]
fn pressure_at(p: &ScalarField, x: isize, y: isize, mode: BoundaryMode) -> f32 {
    match mode {
        BoundaryMode::SolidWalls => {
            let cx = x.clamp(1, p.width() as isize - 2) as usize;
            let cy = y.clamp(1, p.height() as isize - 2) as usize;
            p.get(cx, cy)[0]
        }
        BoundaryMode::OpenWalls | BoundaryMode::LoopedWalls => p.fetch(x, y, mode)[0],
    }
}

/// `out = w − ∇p` with central differences over `2·dx`, followed by the
/// border policy of `mode`.
///
/// Solid and open walls overwrite every border cell with the projected
/// velocity of its nearest interior cell, negated for solid walls. Looped
/// walls project border cells like any other.
pub fn subtract_gradient(
    w: &VectorField,
    p: &ScalarField,
    out: &mut VectorField,
    dx: f32,
    mode: BoundaryMode,
) {
    let (width, height) = (out.width(), out.height());
    let inv = 0.5 / dx;
    let project = |x: usize, y: usize| {
        let (ix, iy) = (x as isize, y as isize);
        let gx = (pressure_at(p, ix + 1, iy, mode) - pressure_at(p, ix - 1, iy, mode)) * inv;
        let gy = (pressure_at(p, ix, iy + 1, mode) - pressure_at(p, ix, iy - 1, mode)) * inv;
        let [u, v] = w.get(x, y);
        [u - gx, v - gy]
    };

    match mode.border_sign() {
        None => out.fill_with(project),
        Some(sign) => out.fill_with(|x, y| {
            let border = x == 0 || y == 0 || x + 1 == width || y + 1 == height;
            if !border {
                return project(x, y);
            }
            let [u, v] = project(x.clamp(1, width - 2), y.clamp(1, height - 2));
            [u * sign, v * sign]
        }),
    }
}

/// Stage 4: removes the divergent part of the scratch velocity.
///
/// 1. divergence of the scratch velocity; pressure front zeroed;
/// 2. `pressure_iterations` Jacobi iterations (two passes each) on
///    `∇²p = div` with `α = −dx²`, `β = 4`;
/// 3. primary velocity = scratch − ∇p, with the wall policy applied.
#[derive(Clone, Copy, Debug, Default)]
pub struct Projection;

impl Stage for Projection {
    fn name(&self) -> &'static str {
        "project"
    }

    fn kind(&self) -> StageKind {
        StageKind::Projection
    }

    fn run(&self, ctx: &StageContext, buffers: &mut FluidBuffers) {
        let mode = ctx.boundary;
        let dx = buffers.grid_size().dx();

        divergence(buffers.scratch.front(), &mut buffers.divergence, dx, mode);
        buffers.pressure.front_mut().zero();

        let (alpha, beta) = SimulationParams::pressure_weights(dx);
        iterate(
            &mut buffers.pressure,
            &buffers.divergence,
            ctx.params.pressure_iterations,
            alpha,
            beta,
            mode,
        );

        subtract_gradient(
            buffers.scratch.front(),
            buffers.pressure.front(),
            &mut buffers.velocity,
            dx,
            mode,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swirl_grid::GridSize;

    #[test]
    fn divergence_of_linear_outflow_is_constant() {
        // w = (x·dx, 0): ∂u/∂x = 1 everywhere away from clamped edges.
        let size = GridSize::new(8, 8);
        let dx = size.dx();
        let w = VectorField::from_fn(size, |x, _| [x as f32 * dx, 0.0]);
        let mut out = ScalarField::allocate(size);
        divergence(&w, &mut out, dx, BoundaryMode::OpenWalls);
        assert!((out.get(3, 3)[0] - 1.0).abs() < 1e-5);
        // One-sided at the clamped edge: half the slope.
        assert!((out.get(0, 3)[0] - 0.5).abs() < 1e-5);
    }

    #[test]
    fn solid_walls_ignore_border_pressure() {
        let size = GridSize::new(8, 8);
        let mut p = ScalarField::allocate(size);
        p.set(0, 4, [100.0]);
        assert_eq!(pressure_at(&p, 0, 4, BoundaryMode::SolidWalls), 0.0);
        assert_eq!(pressure_at(&p, 0, 4, BoundaryMode::OpenWalls), 100.0);
        assert_eq!(pressure_at(&p, -1, 4, BoundaryMode::OpenWalls), 100.0);
    }

    #[test]
    fn zero_pressure_passes_velocity_through() {
        let size = GridSize::new(8, 8);
        let w = VectorField::from_fn(size, |x, y| [x as f32, y as f32]);
        let p = ScalarField::allocate(size);
        let mut out = VectorField::allocate(size);
        subtract_gradient(&w, &p, &mut out, size.dx(), BoundaryMode::LoopedWalls);
        assert_eq!(out, w);
    }

    #[test]
    fn walls_copy_interior_with_sign() {
        let size = GridSize::new(8, 8);
        let w = VectorField::from_fn(size, |x, y| [x as f32 + 1.0, y as f32 + 1.0]);
        let p = ScalarField::allocate(size);
        let mut out = VectorField::allocate(size);

        subtract_gradient(&w, &p, &mut out, size.dx(), BoundaryMode::SolidWalls);
        assert_eq!(out.get(0, 3), [-2.0, -4.0]);
        assert_eq!(out.get(7, 7), [-7.0, -7.0]);
        assert_eq!(out.get(3, 3), [4.0, 4.0]);

        subtract_gradient(&w, &p, &mut out, size.dx(), BoundaryMode::OpenWalls);
        assert_eq!(out.get(0, 3), [2.0, 4.0]);
        assert_eq!(out.get(4, 0), [5.0, 2.0]);
    }
}
