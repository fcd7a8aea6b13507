//! External force injection from pointer input.

use std::f32::consts::TAU;

use rand::Rng;
use swirl_core::{Gesture, PointerState, SimulationParams};

use crate::buffers::FluidBuffers;
use crate::stage::{ForceInput, Stage, StageContext, StageKind};

/// The force vector for a pointer gesture.
///
/// - no gesture: zero;
/// - drag: pointer displacement since the previous tick times `magnitude`;
/// - impulse: a uniform random point in the unit disc times
///   `magnitude · 0.025`, drawn from `rng`.
pub fn force_vector<R: Rng + ?Sized>(
    pointer: &PointerState,
    magnitude: f32,
    rng: &mut R,
) -> [f32; 2] {
    match pointer.gesture {
        Gesture::None => [0.0, 0.0],
        Gesture::Drag => {
            let [dx, dy] = pointer.delta();
            [dx * magnitude, dy * magnitude]
        }
        Gesture::Impulse => {
            let [x, y] = inside_unit_disc(rng);
            let scale = magnitude * SimulationParams::IMPULSE_SCALE;
            [x * scale, y * scale]
        }
    }
}

fn inside_unit_disc<R: Rng + ?Sized>(rng: &mut R) -> [f32; 2] {
    let r = rng.random::<f32>().sqrt();
    let theta = rng.random::<f32>() * TAU;
    [r * theta.cos(), r * theta.sin()]
}

impl ForceInput {
    /// Resolve this tick's force from the pointer, centred on its current
    /// position.
    pub fn from_pointer<R: Rng + ?Sized>(
        pointer: &PointerState,
        params: &SimulationParams,
        rng: &mut R,
    ) -> Self {
        Self {
            origin: pointer.position,
            vector: force_vector(pointer, params.force_magnitude, rng),
        }
    }
}

/// Stage 3: adds `F · exp(−|p − origin|² · force_exponent)` to the scratch
/// velocity, where `p` is the cell centre in normalised space
/// (`((x + 0.5) − W/2, (y + 0.5) − H/2) / H`).
///
/// Skipped entirely when the force vector is zero.
#[derive(Clone, Copy, Debug, Default)]
pub struct Force;

impl Stage for Force {
    fn name(&self) -> &'static str {
        "force"
    }

    fn kind(&self) -> StageKind {
        StageKind::Force
    }

    fn run(&self, ctx: &StageContext, buffers: &mut FluidBuffers) {
        if !ctx.force.is_active() {
            return;
        }
        let size = buffers.grid_size();
        let (half_w, half_h) = (size.width as f32 * 0.5, size.height as f32 * 0.5);
        let inv_h = size.dx();
        let [ox, oy] = ctx.force.origin;
        let [fx, fy] = ctx.force.vector;
        let exponent = ctx.params.force_exponent;

        let (src, dst) = buffers.scratch.split();
        dst.fill_with(|x, y| {
            let px = (x as f32 + 0.5 - half_w) * inv_h - ox;
            let py = (y as f32 + 0.5 - half_h) * inv_h - oy;
            let falloff = (-(px * px + py * py) * exponent).exp();
            let [u, v] = src.get(x, y);
            [u + fx * falloff, v + fy * falloff]
        });
        buffers.scratch.flip();
    }
}
