//! Integration test: session controls between ticks.
//!
//! Covers buffer selection, manual and pinned overrides, deferred clears,
//! flow-cycle resets, restarts, and custom stage lists.

use swirl_core::{
    BoundaryMode, BufferId, ColorLayer, Gesture, PointerState, SelectorError,
};
use swirl_engine::{BufferKind, ConfigError, CycleConfig, FluidConfig, FluidSession};
use swirl_grid::GridSize;
use swirl_stages::{
    ColorAdvection, Diffusion, FluidBuffers, Force, PipelineError, Stage, StageContext,
    StageKind, VelocityAdvection,
};
use swirl_test_utils::fixtures::constant_image;
use swirl_test_utils::is_all_zero;

const DT: f32 = 1.0 / 60.0;

fn still() -> PointerState {
    PointerState::default()
}

fn impulse_at(position: [f32; 2]) -> PointerState {
    PointerState {
        position,
        previous: position,
        gesture: Gesture::Impulse,
    }
}

// ── Buffer selection ─────────────────────────────────────────────────

#[test]
fn views_report_kind_and_size() {
    let config = FluidConfig {
        color_size: Some((24, 16)),
        ..FluidConfig::square(32)
    };
    let s = FluidSession::new(config).unwrap();

    let color = s.view(BufferId::ColorBuffer2);
    assert_eq!(color.kind(), BufferKind::Color);
    assert_eq!(color.size(), GridSize::new(24, 16));
    assert_eq!(color.as_flat().len(), 24 * 16 * 4);

    let velocity = s.view_raw(2).unwrap();
    assert_eq!(velocity.kind(), BufferKind::Vector);
    assert_eq!(velocity.as_flat().len(), 32 * 32 * 2);

    let pressure = s.view_named("Pressure").unwrap();
    assert!(pressure.as_scalar().is_some());
    assert!(pressure.as_vector().is_none());
}

#[test]
fn unknown_selectors_are_rejected() {
    let mut s = FluidSession::new(FluidConfig::square(16)).unwrap();
    assert_eq!(
        s.view_raw(4).err(),
        Some(SelectorError::UnknownBuffer { raw: 4 })
    );
    assert_eq!(
        s.view_named("vorticity").err(),
        Some(SelectorError::UnknownBufferName {
            name: "vorticity".into()
        })
    );

    let image = constant_image(4, 4, [1.0; 4]);
    assert!(s.override_raw(17, &image).is_err());
    assert!(s.override_named("ink", &image).is_err());
    assert!(is_all_zero(s.velocity()));
    assert!(is_all_zero(s.color(ColorLayer::First)));

    assert!(s.set_boundary_named("sticky").is_err());
    assert_eq!(s.boundary_mode(), BoundaryMode::SolidWalls);
    s.set_boundary_named("looped").unwrap();
    assert_eq!(s.boundary_mode(), BoundaryMode::LoopedWalls);
}

// ── Overrides and clears ─────────────────────────────────────────────

#[test]
fn override_writes_the_front_buffer() {
    let mut s = FluidSession::new(FluidConfig::square(16)).unwrap();
    let red = constant_image(8, 8, [1.0, 0.0, 0.0, 1.0]);
    s.override_named("color1", &red).unwrap();
    for texel in s.color(ColorLayer::First).texels() {
        assert!((texel[0] - 1.0).abs() < 1e-6);
    }
    assert!(is_all_zero(s.color(ColorLayer::Second)));

    s.override_raw(3, &constant_image(2, 2, [0.5, 9.0, 9.0, 9.0]))
        .unwrap();
    for texel in s.pressure().texels() {
        assert!((texel[0] - 0.5).abs() < 1e-6);
    }
}

#[test]
fn pinned_override_is_reapplied_every_tick() {
    let config = FluidConfig {
        boundary: BoundaryMode::OpenWalls,
        ..FluidConfig::square(16)
    };
    let mut s = FluidSession::new(config).unwrap();
    s.pin_override(BufferId::Velocity, constant_image(4, 4, [0.5, 0.0, 0.0, 0.0]));
    assert_eq!(s.pinned_override(), Some(BufferId::Velocity));

    for _ in 0..3 {
        s.step_default(DT, &still());
        for &[u, v] in s.velocity().texels() {
            assert!((u - 0.5).abs() < 1e-4, "u = {u}");
            assert!(v.abs() < 1e-4, "v = {v}");
        }
    }

    // The pin is applied after a pending clear.
    s.request_clear();
    s.step_default(DT, &still());
    assert!((s.velocity().get(8, 8)[0] - 0.5).abs() < 1e-4);

    let (id, _) = s.unpin_override().unwrap();
    assert_eq!(id, BufferId::Velocity);
    s.clear_all();
    s.step_default(DT, &still());
    assert!(is_all_zero(s.velocity()));
}

#[test]
fn clear_request_is_deferred_to_the_next_tick() {
    let mut s = FluidSession::new(FluidConfig::square(16)).unwrap();
    s.override_field(BufferId::Velocity, &constant_image(4, 4, [0.3, -0.2, 0.0, 0.0]));
    s.reset_color_field(ColorLayer::First, constant_image(16, 16, [1.0; 4]));

    s.request_clear();
    assert!(!is_all_zero(s.velocity()));

    s.step_default(DT, &still());
    assert!(is_all_zero(s.velocity()));
    assert!(is_all_zero(s.pressure()));
    assert!(is_all_zero(s.color(ColorLayer::First)));
    // Sources survive a clear.
    assert!(s.color_source(ColorLayer::First).is_some());
}

// ── Flow cycle ───────────────────────────────────────────────────────

#[test]
fn cycle_reseeds_layers_half_a_cycle_apart() {
    let config = FluidConfig {
        color_size: Some((16, 16)),
        cycle: Some(CycleConfig::default()),
        ..FluidConfig::square(16)
    };
    let mut s = FluidSession::new(config).unwrap();
    let red = [1.0, 0.0, 0.0, 1.0];
    let green = [0.0, 1.0, 0.0, 1.0];
    let blue = [0.0, 0.0, 1.0, 1.0];
    s.reset_color_field(ColorLayer::First, constant_image(16, 16, green));
    s.reset_color_field(ColorLayer::Second, constant_image(16, 16, red));
    s.override_field(BufferId::ColorBuffer1, &constant_image(16, 16, blue));
    s.override_field(BufferId::ColorBuffer2, &constant_image(16, 16, blue));
    assert_eq!(s.blend_weight(), Some(1.0));

    // Second layer starts at phase 0.5 and wraps on the second tick.
    s.step_default(0.25, &still());
    assert_eq!(s.color(ColorLayer::Second).get(0, 0), blue);
    s.step_default(0.25, &still());
    assert_eq!(s.color(ColorLayer::Second).get(5, 7), red);
    assert_eq!(s.color(ColorLayer::First).get(5, 7), blue);
    assert_eq!(s.blend_weight(), Some(0.0));

    // First layer wraps two ticks later.
    s.step_default(0.25, &still());
    s.step_default(0.25, &still());
    assert_eq!(s.color(ColorLayer::First).get(5, 7), green);
    let cycle = s.cycle().unwrap();
    assert_eq!(cycle.phase(ColorLayer::First), 0.0);
    assert_eq!(cycle.phase(ColorLayer::Second), 0.5);
}

#[test]
fn reset_without_source_is_a_no_op() {
    let mut s = FluidSession::new(FluidConfig::square(16)).unwrap();
    s.override_field(BufferId::ColorBuffer1, &constant_image(4, 4, [0.7; 4]));
    s.reset_color(ColorLayer::First);
    assert!((s.color(ColorLayer::First).get(3, 3)[0] - 0.7).abs() < 1e-6);

    s.set_color_source(ColorLayer::First, constant_image(4, 4, [0.0; 4]));
    assert!((s.color(ColorLayer::First).get(3, 3)[0] - 0.7).abs() < 1e-6);
    s.reset_color(ColorLayer::First);
    assert!(is_all_zero(s.color(ColorLayer::First)));
}

// ── Determinism and restart ──────────────────────────────────────────

fn run_impulses(seed: u64) -> FluidSession {
    let config = FluidConfig {
        seed,
        ..FluidConfig::square(32)
    };
    let mut s = FluidSession::new(config).unwrap();
    for i in 0..3 {
        s.step_default(DT, &impulse_at([0.1 * i as f32, -0.1]));
    }
    s
}

#[test]
fn impulses_are_reproducible_per_seed() {
    let a = run_impulses(7);
    let b = run_impulses(7);
    let c = run_impulses(8);
    assert!(a.velocity().max_magnitude() > 0.0);
    assert_eq!(a.velocity(), b.velocity());
    assert_ne!(a.velocity(), c.velocity());
}

#[test]
fn restart_replays_the_same_run() {
    let reference = run_impulses(7);

    let mut s = run_impulses(3);
    s.reset_color_field(ColorLayer::Second, constant_image(32, 32, [0.4; 4]));
    s.override_field(BufferId::ColorBuffer2, &constant_image(32, 32, [0.9; 4]));
    s.restart(7);
    assert_eq!(s.current_tick().0, 0);
    assert_eq!(s.seed(), 7);
    assert!(is_all_zero(s.velocity()));
    assert!((s.color(ColorLayer::Second).get(1, 1)[0] - 0.4).abs() < 1e-6);

    for i in 0..3 {
        s.step_default(DT, &impulse_at([0.1 * i as f32, -0.1]));
    }
    assert_eq!(s.velocity(), reference.velocity());
}

// ── Custom stages ────────────────────────────────────────────────────

/// Replaces the pressure solve: copies the forced velocity through
/// unchanged.
struct Passthrough;

impl Stage for Passthrough {
    fn name(&self) -> &'static str {
        "passthrough"
    }

    fn kind(&self) -> StageKind {
        StageKind::Projection
    }

    fn run(&self, _ctx: &StageContext, buffers: &mut FluidBuffers) {
        let FluidBuffers {
            velocity, scratch, ..
        } = buffers;
        velocity.texels_mut().copy_from_slice(scratch.front().texels());
    }
}

fn stages_with(projection: Box<dyn Stage>) -> Vec<Box<dyn Stage>> {
    vec![
        Box::new(VelocityAdvection),
        Box::new(Diffusion),
        Box::new(Force),
        projection,
        Box::new(ColorAdvection),
    ]
}

#[test]
fn custom_stage_replaces_projection() {
    let mut s = FluidSession::with_stages(
        FluidConfig::square(32),
        stages_with(Box::new(Passthrough)),
    )
    .unwrap();
    assert!(s.pipeline().names().any(|n| n == "passthrough"));

    s.step_default(DT, &PointerState::drag([0.0, 0.0], [0.05, 0.0]));
    let result = s.step_default(DT, &still());
    assert!(result.metrics.stage("passthrough").is_some());
    assert!(s.velocity().max_magnitude() > 0.0);
    assert!(is_all_zero(s.pressure()));
}

#[test]
fn incomplete_stage_list_is_rejected() {
    let stages: Vec<Box<dyn Stage>> = vec![
        Box::new(VelocityAdvection),
        Box::new(Diffusion),
        Box::new(Force),
        Box::new(ColorAdvection),
    ];
    let err = FluidSession::with_stages(FluidConfig::square(16), stages).unwrap_err();
    assert_eq!(
        err,
        ConfigError::Pipeline(PipelineError::MissingStage {
            kind: StageKind::Projection
        })
    );
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn invalid_config_is_rejected() {
    let config = FluidConfig {
        viewport: (800, 0),
        ..FluidConfig::default()
    };
    assert_eq!(
        FluidSession::new(config).unwrap_err(),
        ConfigError::InvalidViewport {
            width: 800,
            height: 0
        }
    );
}

#[test]
fn viewport_sets_grid_aspect() {
    let config = FluidConfig {
        resolution: 100,
        viewport: (1920, 1080),
        ..FluidConfig::default()
    };
    let s = FluidSession::new(config).unwrap();
    assert_eq!(s.grid_size(), GridSize::new(104, 56));
    assert_eq!(s.color_size(), GridSize::new(100, 100));
}
