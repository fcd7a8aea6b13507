//! Semi-Lagrangian advection.
//!
//! Each output cell traces backward along the velocity for one timestep
//! and takes the bilinearly interpolated source value found there.
//! Unconditionally stable for any `dt`; never creates new extrema.

use swirl_core::{BoundaryMode, ColorLayer};
use swirl_grid::{Field, VectorField};

use crate::buffers::FluidBuffers;
use crate::stage::{Stage, StageContext, StageKind};

/// Advect `src` by `velocity` over `dt` into `dst`.
///
/// `dst` must have the size of `src`; the velocity grid may differ and is
/// sampled at each output cell's normalised position. The backtrace
/// displacement in normalised coordinates is
/// `Δuv = (u.x · dt · H/W, u.y · dt)` for a `W × H` velocity grid, so
/// velocity is measured in domain heights per second on both axes.
/// Out-of-grid reads follow `mode`.
pub fn advect<const C: usize>(
    src: &Field<C>,
    velocity: &VectorField,
    dst: &mut Field<C>,
    dt: f32,
    mode: BoundaryMode,
) {
    let (ow, oh) = (dst.width() as f32, dst.height() as f32);
    let (vw, vh) = (velocity.width() as f32, velocity.height() as f32);
    // Output texel -> velocity texel.
    let (to_vx, to_vy) = (vw / ow, vh / oh);
    // Velocity -> backtrace length in output texels.
    let (kx, ky) = (dt * vh * (ow / vw), dt * oh);

    dst.fill_with(|x, y| {
        let px = x as f32 + 0.5;
        let py = y as f32 + 0.5;
        let [u, v] = velocity.sample(px * to_vx, py * to_vy, mode);
        src.sample(px - u * kx, py - v * ky, mode)
    });
}

/// Stage 1: velocity transports itself into the scratch pair.
#[derive(Clone, Copy, Debug, Default)]
pub struct VelocityAdvection;

impl Stage for VelocityAdvection {
    fn name(&self) -> &'static str {
        "advect_velocity"
    }

    fn kind(&self) -> StageKind {
        StageKind::VelocityAdvection
    }

    fn run(&self, ctx: &StageContext, buffers: &mut FluidBuffers) {
        advect(
            &buffers.velocity,
            &buffers.velocity,
            buffers.scratch.back_mut(),
            ctx.dt,
            ctx.boundary,
        );
        buffers.scratch.flip();
    }
}

/// Stage 5: both colour layers are carried by the projected velocity, then
/// each layer's double buffer flips.
#[derive(Clone, Copy, Debug, Default)]
pub struct ColorAdvection;

impl Stage for ColorAdvection {
    fn name(&self) -> &'static str {
        "advect_color"
    }

    fn kind(&self) -> StageKind {
        StageKind::ColorAdvection
    }

    fn run(&self, ctx: &StageContext, buffers: &mut FluidBuffers) {
        for layer in ColorLayer::ALL {
            let pair = &mut buffers.colors[layer.index()];
            let (src, dst) = pair.split();
            advect(src, &buffers.velocity, dst, ctx.dt, ctx.boundary);
            pair.flip();
        }
    }
}
