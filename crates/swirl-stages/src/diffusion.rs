//! Implicit viscous diffusion.

use crate::buffers::FluidBuffers;
use crate::jacobi::iterate;
use crate::stage::{Stage, StageContext, StageKind};

/// Stage 2: solves `(I − ν·dt·∇²) u_new = u_old` on the scratch velocity.
///
/// The advected velocity is first copied into the primary velocity buffer,
/// which serves as the fixed right-hand side `b` while the scratch pair
/// ping-pongs through `diffusion_iterations` Jacobi iterations (two passes
/// each) with `α = dx²/(ν·dt)` and `β = 4 + α`. Zero iterations leave the
/// scratch velocity untouched.
///
/// `ν·dt ≤ 0` is logged but not guarded; the solve then yields
/// non-finite values.
#[derive(Clone, Copy, Debug, Default)]
pub struct Diffusion;

impl Stage for Diffusion {
    fn name(&self) -> &'static str {
        "diffuse"
    }

    fn kind(&self) -> StageKind {
        StageKind::Diffusion
    }

    fn run(&self, ctx: &StageContext, buffers: &mut FluidBuffers) {
        let iterations = ctx.params.diffusion_iterations;
        if iterations == 0 {
            return;
        }
        let nu_dt = ctx.params.viscosity * ctx.dt;
        if nu_dt <= 0.0 || nu_dt.is_nan() {
            log::warn!("viscosity * dt = {nu_dt} is not positive; velocity will become non-finite");
        }

        let dx = buffers.grid_size().dx();
        let (alpha, beta) = ctx.params.diffusion_weights(dx, ctx.dt);

        if let Err(e) = buffers.velocity.copy_from(buffers.scratch.front()) {
            log::error!("diffusion skipped: {e}");
            return;
        }
        iterate(
            &mut buffers.scratch,
            &buffers.velocity,
            iterations,
            alpha,
            beta,
            ctx.boundary,
        );
    }
}
