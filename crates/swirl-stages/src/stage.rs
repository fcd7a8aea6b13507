//! The [`Stage`] trait and the per-tick context handed to every stage.

use std::fmt;

use swirl_core::{BoundaryMode, SimulationParams};

use crate::buffers::FluidBuffers;

/// The role a stage fills in the tick sequence.
///
/// Declaration order is execution order; a [`Pipeline`](crate::Pipeline)
/// holds exactly one stage of each kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StageKind {
    /// Self-advection of the velocity field.
    VelocityAdvection,
    /// Implicit viscous diffusion.
    Diffusion,
    /// External force injection.
    Force,
    /// Pressure projection onto a divergence-free field.
    Projection,
    /// Transport of the colour layers by the projected velocity.
    ColorAdvection,
}

impl StageKind {
    /// Every kind, in execution order.
    pub const ORDER: [StageKind; 5] = [
        StageKind::VelocityAdvection,
        StageKind::Diffusion,
        StageKind::Force,
        StageKind::Projection,
        StageKind::ColorAdvection,
    ];
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::VelocityAdvection => "velocity advection",
            Self::Diffusion => "diffusion",
            Self::Force => "force",
            Self::Projection => "projection",
            Self::ColorAdvection => "color advection",
        };
        f.write_str(name)
    }
}

/// The force injected this tick: a vector applied with Gaussian falloff
/// around an origin in normalised grid space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ForceInput {
    /// Centre of the falloff.
    pub origin: [f32; 2],
    /// Force vector at the centre.
    pub vector: [f32; 2],
}

impl ForceInput {
    /// No force this tick.
    pub fn none() -> Self {
        Self::default()
    }

    /// Whether this input injects anything.
    pub fn is_active(&self) -> bool {
        self.vector != [0.0, 0.0]
    }
}

/// Read-only inputs for one tick, shared by every stage.
#[derive(Clone, Copy, Debug)]
pub struct StageContext {
    /// Simulation timestep in seconds.
    pub dt: f32,
    /// Wall policy for sampling and the post-projection border fix-up.
    pub boundary: BoundaryMode,
    /// Viscosity, force shaping and iteration counts.
    pub params: SimulationParams,
    /// Force resolved from the pointer for this tick.
    pub force: ForceInput,
}

impl StageContext {
    /// A context with no force input.
    pub fn new(dt: f32, boundary: BoundaryMode, params: SimulationParams) -> Self {
        Self {
            dt,
            boundary,
            params,
            force: ForceInput::none(),
        }
    }

    /// Replace the force input.
    pub fn with_force(mut self, force: ForceInput) -> Self {
        self.force = force;
        self
    }
}

/// One step of the per-tick solver sequence.
///
/// # Contract
///
/// - `run()` is deterministic: the same context and buffers produce
///   identical output.
/// - `&self`: stages hold no per-tick state; everything they evolve lives
///   in [`FluidBuffers`].
/// - `run()` never fails. Degenerate inputs (non-positive `ν·dt`, NaN
///   pointers) propagate into the fields as non-finite values.
///
/// # Examples
///
/// A stage that damps the scratch velocity:
///
/// ```
/// use swirl_stages::{FluidBuffers, Stage, StageContext, StageKind};
///
/// struct Damp(f32);
///
/// impl Stage for Damp {
///     fn name(&self) -> &'static str { "damp" }
///     fn kind(&self) -> StageKind { StageKind::Force }
///     fn run(&self, _ctx: &StageContext, buffers: &mut FluidBuffers) {
///         let (src, dst) = buffers.scratch.split();
///         let k = self.0;
///         dst.fill_with(|x, y| {
///             let [u, v] = src.get(x, y);
///             [u * k, v * k]
///         });
///         buffers.scratch.flip();
///     }
/// }
///
/// assert_eq!(Damp(0.5).name(), "damp");
/// ```
pub trait Stage: Send + 'static {
    /// Short name used in logs and per-stage timings.
    fn name(&self) -> &'static str;

    /// The slot this stage fills in the tick sequence.
    fn kind(&self) -> StageKind;

    /// Execute the stage for one tick.
    fn run(&self, ctx: &StageContext, buffers: &mut FluidBuffers);
}
