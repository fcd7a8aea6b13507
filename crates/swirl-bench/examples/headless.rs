//! Headless fluid loop example.
//!
//! Demonstrates: build config → FluidSession → seed dye → drag → read
//! metrics → restart → repeat with impulses.

use swirl_bench::{orbit_pointer, reference_profile};
use swirl_core::{BufferId, ColorLayer, Gesture, PointerState};
use swirl_engine::FluidSession;
use swirl_grid::Image;

fn main() {
    println!("=== Swirl Headless Example ===\n");

    let config = swirl_engine::FluidConfig {
        diagnostics: true,
        ..reference_profile(42)
    };
    let dye = config.color_grid_size();
    let mut session = FluidSession::new(config).unwrap();
    session.reset_color_field(
        ColorLayer::First,
        Image::from_fn(dye.w(), dye.h(), |x, _| {
            let t = x as f32 / dye.w() as f32;
            [t, 0.3, 1.0 - t, 1.0]
        }),
    );

    // --- Run 1: orbiting drag ---
    println!("Run 1: 120 ticks of orbiting drag");
    for tick in 0..120u64 {
        let result = session.step_default(1.0 / 60.0, &orbit_pointer(tick));
        if tick % 30 == 0 || tick == 119 {
            let m = &result.metrics;
            println!(
                "  tick {:>3}: {:>6}us  max|div| {:.4}  energy {:.6}  blend {:.2}",
                result.tick_id,
                m.total_us,
                m.max_divergence.unwrap_or(f32::NAN),
                m.kinetic_energy.unwrap_or(f64::NAN),
                session.blend_weight().unwrap_or(0.0),
            );
        }
    }

    let velocity = session.view(BufferId::Velocity);
    println!(
        "  velocity buffer: {} floats, peak speed {:.3}\n",
        velocity.as_flat().len(),
        session.velocity().max_magnitude()
    );

    // --- Run 2: restart, then random impulses at the centre ---
    println!("Run 2: restart with seed 7, 60 ticks of impulses");
    session.restart(7);
    let impulse = PointerState {
        gesture: Gesture::Impulse,
        ..PointerState::idle([0.0, 0.0])
    };
    for _ in 0..60 {
        session.step_default(1.0 / 60.0, &impulse);
    }
    println!(
        "  tick {}: peak speed {:.3}",
        session.current_tick(),
        session.velocity().max_magnitude()
    );
}
