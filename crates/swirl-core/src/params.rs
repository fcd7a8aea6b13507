//! Per-tick simulation parameters.

/// Parameters read by the pipeline each tick.
///
/// Supplied by the caller on every step and never mutated by the solver.
/// Viscosity and `dt` must be strictly positive: the diffusion solve
/// divides by their product, and violations surface as non-finite field
/// values rather than as errors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationParams {
    /// Kinematic viscosity `ν`. Default: `1e-6`.
    pub viscosity: f32,
    /// Scale applied to the pointer force. Default: `300`.
    pub force_magnitude: f32,
    /// Sharpness of the Gaussian force falloff. Default: `200`.
    pub force_exponent: f32,
    /// Jacobi iterations for the viscous diffusion solve, two ping-pong
    /// passes each. Default: `20`.
    pub diffusion_iterations: u32,
    /// Jacobi iterations for the pressure Poisson solve, two ping-pong
    /// passes each. Default: `20`.
    pub pressure_iterations: u32,
}

impl SimulationParams {
    /// Scale of the random impulse relative to `force_magnitude`.
    pub const IMPULSE_SCALE: f32 = 0.025;

    /// Diffusion Jacobi weights `(α, β)` for grid spacing `dx` and step `dt`.
    ///
    /// `α = dx² / (ν·dt)`, `β = 4 + α`.
    pub fn diffusion_weights(&self, dx: f32, dt: f32) -> (f32, f32) {
        let alpha = dx * dx / (self.viscosity * dt);
        (alpha, 4.0 + alpha)
    }

    /// Pressure Jacobi weights `(α, β)` for grid spacing `dx`.
    ///
    /// `α = -dx²`, `β = 4`.
    pub fn pressure_weights(dx: f32) -> (f32, f32) {
        (-dx * dx, 4.0)
    }
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            viscosity: 1e-6,
            force_magnitude: 300.0,
            force_exponent: 200.0,
            diffusion_iterations: 20,
            pressure_iterations: 20,
        }
    }
}
