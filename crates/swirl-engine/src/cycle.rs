//! Flow-cycle clock driving periodic colour-layer resets.
//!
//! Two phases run half a cycle apart. When a phase reaches the cycle
//! length it wraps to zero and its colour layer is re-seeded from the
//! layer's source image, so one layer is always mid-flow while the other
//! restarts. The renderer cross-fades the layers with [`CycleClock::blend_weight`].

use smallvec::SmallVec;
use swirl_core::ColorLayer;

use crate::config::CycleConfig;

/// Phase state for both colour layers.
#[derive(Clone, Debug, PartialEq)]
pub struct CycleClock {
    config: CycleConfig,
    phases: [f32; 2],
}

impl CycleClock {
    /// A clock at its initial phases: `0` for the first layer and half a
    /// cycle for the second.
    pub fn new(config: CycleConfig) -> Self {
        Self {
            phases: [0.0, config.cycle_length * 0.5],
            config,
        }
    }

    /// Return to the initial phases.
    pub fn reset(&mut self) {
        self.phases = [0.0, self.config.cycle_length * 0.5];
    }

    /// Advance by `dt` and report which layers completed a cycle.
    pub fn advance(&mut self, dt: f32) -> SmallVec<[ColorLayer; 2]> {
        let mut resets = SmallVec::new();
        if self.config.animate {
            let step = self.config.flow_speed * dt;
            for phase in &mut self.phases {
                *phase += step;
            }
        }
        if self.config.reset_at_cycle_end {
            for layer in ColorLayer::ALL {
                let phase = &mut self.phases[layer.index()];
                if *phase >= self.config.cycle_length {
                    *phase = 0.0;
                    resets.push(layer);
                }
            }
        }
        resets
    }

    /// Current phase of a layer.
    pub fn phase(&self, layer: ColorLayer) -> f32 {
        self.phases[layer.index()]
    }

    /// Cross-fade weight towards the second layer:
    /// `|L/2 − phase₁| / (L/2)` for cycle length `L`.
    pub fn blend_weight(&self) -> f32 {
        let half = self.config.cycle_length * 0.5;
        (half - self.phases[0]).abs() / half
    }

    /// The configuration this clock runs on.
    pub fn config(&self) -> &CycleConfig {
        &self.config
    }
}
