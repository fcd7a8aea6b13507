//! Per-tick timing and flow diagnostics.
//!
//! [`StepMetrics`] is produced by every [`FluidSession::step`](crate::FluidSession::step)
//! and kept as the session's most recent metrics.

use swirl_stages::StageTimings;

/// Timing and diagnostic data collected during a single tick.
///
/// Durations are in microseconds. The diagnostic fields are populated only
/// when the session was configured with `diagnostics` enabled.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepMetrics {
    /// Wall-clock time for the whole tick, including resets and overrides.
    pub total_us: u64,
    /// Per-stage execution times: `(stage name, microseconds)`.
    pub stage_us: StageTimings,
    /// Largest interior `|div u|` of the projected velocity.
    pub max_divergence: Option<f32>,
    /// Kinetic energy of the projected velocity.
    pub kinetic_energy: Option<f64>,
}

impl StepMetrics {
    /// Time spent in the named stage, if it ran.
    pub fn stage(&self, name: &str) -> Option<u64> {
        self.stage_us
            .iter()
            .find(|(n, _)| *n == name)
            .map(|&(_, us)| us)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_empty() {
        let m = StepMetrics::default();
        assert_eq!(m.total_us, 0);
        assert!(m.stage_us.is_empty());
        assert_eq!(m.max_divergence, None);
        assert_eq!(m.kinetic_energy, None);
    }

    #[test]
    fn stage_lookup_by_name() {
        let mut m = StepMetrics::default();
        m.stage_us.push(("diffuse", 50));
        m.stage_us.push(("project", 30));
        assert_eq!(m.stage("project"), Some(30));
        assert_eq!(m.stage("force"), None);
    }
}
