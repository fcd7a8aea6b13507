//! Projection convergence across wall modes.

use swirl_core::{BoundaryMode, SimulationParams};
use swirl_grid::{GridSize, ScalarField, VectorField};
use swirl_stages::diagnostics::max_divergence;
use swirl_stages::jacobi::relax;
use swirl_stages::projection::divergence;
use swirl_stages::{FluidBuffers, Projection, Stage, StageContext};
use swirl_test_utils::fixtures::{periodic_source, radial_source};

fn project(w: &VectorField, mode: BoundaryMode, iterations: u32) -> FluidBuffers {
    let size = w.size();
    let mut buffers = FluidBuffers::new(size, size);
    buffers.scratch.front_mut().copy_from(w).unwrap();
    let params = SimulationParams {
        pressure_iterations: iterations,
        ..SimulationParams::default()
    };
    let ctx = StageContext::new(1.0 / 60.0, mode, params);
    Projection.run(&ctx, &mut buffers);
    buffers
}

#[test]
fn looped_divergence_falls_with_more_iterations() {
    let mode = BoundaryMode::LoopedWalls;
    let w = periodic_source(GridSize::new(32, 32), 2);
    let initial = max_divergence(&w, mode, 0);
    assert!(initial > 1.0);

    // Iterations are pass pairs: 5, 20 and 80 iterations run 10, 40 and 160
    // passes.
    let d10 = max_divergence(&project(&w, mode, 5).velocity, mode, 0);
    let d40 = max_divergence(&project(&w, mode, 20).velocity, mode, 0);
    let d160 = max_divergence(&project(&w, mode, 80).velocity, mode, 0);

    assert!(d10 < initial, "10 passes: {d10} vs {initial}");
    assert!(d40 < d10, "40 passes: {d40} vs {d10}");
    assert!(d160 < d40, "160 passes: {d160} vs {d40}");
    assert!(d160 < 0.5 * initial, "160 passes: {d160} vs {initial}");
}

#[test]
fn solid_walls_reduce_interior_divergence() {
    let mode = BoundaryMode::SolidWalls;
    let w = radial_source(GridSize::new(32, 32), 3.0, 1.0);
    let initial = max_divergence(&w, mode, 2);

    let d10 = max_divergence(&project(&w, mode, 5).velocity, mode, 2);
    let d40 = max_divergence(&project(&w, mode, 20).velocity, mode, 2);

    assert!(d40 < d10);
    assert!(d40 < 0.6 * initial, "{d40} vs {initial}");
}

#[test]
fn open_walls_reduce_interior_divergence() {
    let mode = BoundaryMode::OpenWalls;
    let w = radial_source(GridSize::new(32, 32), 3.0, 1.0);
    let initial = max_divergence(&w, mode, 2);
    let after = max_divergence(&project(&w, mode, 20).velocity, mode, 2);
    assert!(after < initial);
}

#[test]
fn wall_borders_mirror_or_extend_the_interior() {
    let w = radial_source(GridSize::new(16, 16), 3.0, 1.0);

    let solid = project(&w, BoundaryMode::SolidWalls, 20).velocity;
    let open = project(&w, BoundaryMode::OpenWalls, 20).velocity;
    for y in 1..15 {
        let [si, sj] = solid.get(1, y);
        assert_eq!(solid.get(0, y), [-si, -sj]);
        assert_eq!(open.get(15, y), open.get(14, y));
    }
    assert_eq!(open.get(0, 0), open.get(1, 1));
}

#[test]
fn divergence_free_input_is_nearly_unchanged() {
    // A uniform flow has zero divergence, so pressure stays zero.
    let size = GridSize::new(16, 16);
    let w = VectorField::filled(size, [0.4, -0.1]);
    let out = project(&w, BoundaryMode::LoopedWalls, 20).velocity;
    assert_eq!(out, w);
}

#[test]
fn each_pressure_iteration_runs_two_passes() {
    let mode = BoundaryMode::SolidWalls;
    let size = GridSize::new(16, 16);
    let w = radial_source(size, 2.0, 1.0);
    let buffers = project(&w, mode, 1);

    let dx = size.dx();
    let (alpha, beta) = SimulationParams::pressure_weights(dx);
    let mut div = ScalarField::allocate(size);
    divergence(&w, &mut div, dx, mode);
    let zero = ScalarField::allocate(size);
    let mut first = ScalarField::allocate(size);
    let mut second = ScalarField::allocate(size);
    relax(&zero, &div, &mut first, alpha, beta, mode);
    relax(&first, &div, &mut second, alpha, beta, mode);

    assert_ne!(first, second);
    assert_eq!(buffers.pressure(), &second);
}
