//! Session configuration, validation, and error types.
//!
//! [`FluidConfig`] is the input for constructing a [`FluidSession`](crate::FluidSession).
//! [`validate()`](FluidConfig::validate) checks structural invariants once
//! at startup; per-tick inputs are never validated.

use std::error::Error;
use std::fmt;

use swirl_core::{BoundaryMode, SimulationParams};
use swirl_grid::GridSize;
use swirl_stages::PipelineError;

// ── CycleConfig ────────────────────────────────────────────────────

/// Flow-cycle settings for periodic colour-layer resets.
#[derive(Clone, Debug, PartialEq)]
pub struct CycleConfig {
    /// Phase advance per second of simulated time. Default: 1.
    pub flow_speed: f32,
    /// Phase at which a layer resets. Default: 1.
    pub cycle_length: f32,
    /// Whether phases advance at all. Default: true.
    pub animate: bool,
    /// Whether reaching `cycle_length` re-seeds the layer. Default: true.
    pub reset_at_cycle_end: bool,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            flow_speed: 1.0,
            cycle_length: 1.0,
            animate: true,
            reset_at_cycle_end: true,
        }
    }
}

impl CycleConfig {
    fn check(&self) -> Result<(), ConfigError> {
        if !self.cycle_length.is_finite() || self.cycle_length <= 0.0 {
            return Err(ConfigError::InvalidCycle {
                reason: format!(
                    "cycle_length must be finite and positive, got {}",
                    self.cycle_length
                ),
            });
        }
        if !self.flow_speed.is_finite() || self.flow_speed < 0.0 {
            return Err(ConfigError::InvalidCycle {
                reason: format!(
                    "flow_speed must be finite and non-negative, got {}",
                    self.flow_speed
                ),
            });
        }
        Ok(())
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while validating a [`FluidConfig`] or building a session.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// The viewport has a zero dimension.
    InvalidViewport {
        /// Viewport width in pixels.
        width: u32,
        /// Viewport height in pixels.
        height: u32,
    },
    /// A default iteration count is zero.
    ZeroIterations {
        /// Which solve: `"diffusion"` or `"pressure"`.
        solver: &'static str,
    },
    /// Flow-cycle settings are unusable.
    InvalidCycle {
        /// Which invariant was violated.
        reason: String,
    },
    /// A custom stage list failed validation.
    Pipeline(PipelineError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidViewport { width, height } => {
                write!(f, "viewport {width}x{height} has a zero dimension")
            }
            Self::ZeroIterations { solver } => {
                write!(f, "{solver} solve needs at least one Jacobi iteration")
            }
            Self::InvalidCycle { reason } => write!(f, "invalid flow cycle: {reason}"),
            Self::Pipeline(e) => write!(f, "pipeline: {e}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Pipeline(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PipelineError> for ConfigError {
    fn from(e: PipelineError) -> Self {
        Self::Pipeline(e)
    }
}

// ── FluidConfig ────────────────────────────────────────────────────

/// Complete configuration for constructing a fluid session.
#[derive(Clone, Debug)]
pub struct FluidConfig {
    /// Horizontal simulation resolution before tile rounding. Default: 512.
    pub resolution: u32,
    /// Viewport `(width, height)` in pixels; sets the grid aspect ratio.
    /// Default: `(1, 1)`.
    pub viewport: (u32, u32),
    /// Colour-layer size. `None` means `resolution × resolution`.
    pub color_size: Option<(u32, u32)>,
    /// Default per-tick parameters, used by
    /// [`step_default`](crate::FluidSession::step_default).
    pub params: SimulationParams,
    /// Initial wall mode. Default: solid.
    pub boundary: BoundaryMode,
    /// Seed for the impulse RNG. Default: 0.
    pub seed: u64,
    /// Flow cycle for periodic colour resets. Default: none.
    pub cycle: Option<CycleConfig>,
    /// Compute divergence and energy diagnostics every tick. Default: off.
    pub diagnostics: bool,
}

impl Default for FluidConfig {
    fn default() -> Self {
        Self {
            resolution: 512,
            viewport: (1, 1),
            color_size: None,
            params: SimulationParams::default(),
            boundary: BoundaryMode::default(),
            seed: 0,
            cycle: None,
            diagnostics: false,
        }
    }
}

impl FluidConfig {
    /// A square configuration at `resolution`, otherwise default.
    pub fn square(resolution: u32) -> Self {
        Self {
            resolution,
            ..Self::default()
        }
    }

    /// Check structural invariants.
    ///
    /// A resolution below the minimum is not an error; it is clamped with
    /// a warning when the grid is sized.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = self.viewport;
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidViewport { width, height });
        }
        if self.params.diffusion_iterations == 0 {
            return Err(ConfigError::ZeroIterations {
                solver: "diffusion",
            });
        }
        if self.params.pressure_iterations == 0 {
            return Err(ConfigError::ZeroIterations { solver: "pressure" });
        }
        if let Some(cycle) = &self.cycle {
            cycle.check()?;
        }
        Ok(())
    }

    /// Velocity and pressure grid size.
    pub fn grid_size(&self) -> GridSize {
        GridSize::for_viewport(self.resolution, self.viewport.0, self.viewport.1)
    }

    /// Colour-layer grid size.
    pub fn color_grid_size(&self) -> GridSize {
        let (w, h) = self
            .color_size
            .unwrap_or((self.resolution, self.resolution));
        GridSize::at_least_min(w, h)
    }
}
