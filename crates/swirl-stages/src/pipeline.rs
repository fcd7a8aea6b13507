//! The ordered, validated stage sequence run once per tick.
//!
//! [`Pipeline::from_stages`] checks once, at construction, that the stage
//! list covers every [`StageKind`] exactly once and in execution order. The
//! per-tick [`Pipeline::run`] is then a straight loop with per-stage timing.

use std::error::Error;
use std::fmt;
use std::time::Instant;

use smallvec::SmallVec;

use crate::advection::{ColorAdvection, VelocityAdvection};
use crate::buffers::FluidBuffers;
use crate::diffusion::Diffusion;
use crate::force::Force;
use crate::projection::Projection;
use crate::stage::{Stage, StageContext, StageKind};

/// Per-stage wall-clock durations for one tick: `(stage name, microseconds)`.
pub type StageTimings = SmallVec<[(&'static str, u64); 8]>;

// ── Errors ─────────────────────────────────────────────────────────

/// Structural errors in a stage list (construction-time, not per-tick).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PipelineError {
    /// No stage fills this slot.
    MissingStage {
        /// The unfilled slot.
        kind: StageKind,
    },
    /// Two stages claim the same slot.
    DuplicateStage {
        /// The contested slot.
        kind: StageKind,
        /// Name of the second stage claiming it.
        name: &'static str,
    },
    /// A stage appears after one that must run later.
    OutOfOrder {
        /// The misplaced stage's slot.
        kind: StageKind,
        /// The slot it was placed after.
        after: StageKind,
    },
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingStage { kind } => write!(f, "pipeline has no {kind} stage"),
            Self::DuplicateStage { kind, name } => {
                write!(f, "stage '{name}' duplicates the {kind} slot")
            }
            Self::OutOfOrder { kind, after } => {
                write!(f, "{kind} stage must run before {after}")
            }
        }
    }
}

impl Error for PipelineError {}

// ── Pipeline ───────────────────────────────────────────────────────

/// One stage per [`StageKind`], in execution order.
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    /// The Stable Fluids sequence: advect, diffuse, force, project, then
    /// advect colour.
    pub fn standard() -> Self {
        Self {
            stages: vec![
                Box::new(VelocityAdvection),
                Box::new(Diffusion),
                Box::new(Force),
                Box::new(Projection),
                Box::new(ColorAdvection),
            ],
        }
    }

    /// Build a pipeline from caller-supplied stages, e.g. to swap in a
    /// different pressure solver.
    pub fn from_stages(stages: Vec<Box<dyn Stage>>) -> Result<Self, PipelineError> {
        let mut seen = [false; StageKind::ORDER.len()];
        let mut last: Option<StageKind> = None;

        for stage in &stages {
            let kind = stage.kind();
            let slot = kind as usize;
            if seen[slot] {
                return Err(PipelineError::DuplicateStage {
                    kind,
                    name: stage.name(),
                });
            }
            if let Some(after) = last.filter(|&prev| prev > kind) {
                return Err(PipelineError::OutOfOrder { kind, after });
            }
            seen[slot] = true;
            last = Some(kind);
        }

        if let Some(kind) = StageKind::ORDER.into_iter().find(|k| !seen[*k as usize]) {
            return Err(PipelineError::MissingStage { kind });
        }
        Ok(Self { stages })
    }

    /// Number of stages (always one per [`StageKind`]).
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether the pipeline has no stages. Never true for a built pipeline.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Stage names in execution order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.stages.iter().map(|s| s.name())
    }

    /// Run every stage once, in order.
    pub fn run(&self, ctx: &StageContext, buffers: &mut FluidBuffers) -> StageTimings {
        let mut timings = StageTimings::new();
        for stage in &self.stages {
            let start = Instant::now();
            stage.run(ctx, buffers);
            let us = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);
            log::trace!("stage {} took {us}us", stage.name());
            timings.push((stage.name(), us));
        }
        timings
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swirl_core::BoundaryMode;
    use swirl_grid::GridSize;

    fn boxed(stages: Vec<Box<dyn Stage>>) -> Result<Pipeline, PipelineError> {
        Pipeline::from_stages(stages)
    }

    #[test]
    fn standard_order_validates() {
        let p = boxed(vec![
            Box::new(VelocityAdvection),
            Box::new(Diffusion),
            Box::new(Force),
            Box::new(Projection),
            Box::new(ColorAdvection),
        ])
        .unwrap();
        assert_eq!(
            p.names().collect::<Vec<_>>(),
            Pipeline::standard().names().collect::<Vec<_>>()
        );
    }

    #[test]
    fn missing_stage_is_rejected() {
        let err = boxed(vec![
            Box::new(VelocityAdvection),
            Box::new(Diffusion),
            Box::new(Force),
            Box::new(ColorAdvection),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            PipelineError::MissingStage {
                kind: StageKind::Projection
            }
        );
    }

    #[test]
    fn empty_pipeline_reports_first_slot() {
        assert_eq!(
            boxed(Vec::new()).unwrap_err(),
            PipelineError::MissingStage {
                kind: StageKind::VelocityAdvection
            }
        );
    }

    #[test]
    fn duplicate_stage_is_rejected() {
        let err = boxed(vec![
            Box::new(VelocityAdvection),
            Box::new(Diffusion),
            Box::new(Diffusion),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::DuplicateStage {
                kind: StageKind::Diffusion,
                name: "diffuse"
            }
        ));
    }

    #[test]
    fn force_after_projection_is_rejected() {
        let err = boxed(vec![
            Box::new(VelocityAdvection),
            Box::new(Diffusion),
            Box::new(Projection),
            Box::new(Force),
            Box::new(ColorAdvection),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            PipelineError::OutOfOrder {
                kind: StageKind::Force,
                after: StageKind::Projection
            }
        );
        assert_eq!(err.to_string(), "force stage must run before projection");
    }

    #[test]
    fn run_times_every_stage() {
        let size = GridSize::new(8, 8);
        let mut buffers = FluidBuffers::new(size, size);
        let ctx = StageContext::new(1.0 / 60.0, BoundaryMode::SolidWalls, Default::default());
        let timings = Pipeline::standard().run(&ctx, &mut buffers);
        let names: Vec<_> = timings.iter().map(|(n, _)| *n).collect();
        assert_eq!(
            names,
            ["advect_velocity", "diffuse", "force", "project", "advect_color"]
        );
    }
}
