//! The complete set of grids a session evolves.

use swirl_core::ColorLayer;
use swirl_grid::{ColorField, GridSize, PingPong, ScalarField, VectorField};

/// Every field owned by one simulation session.
///
/// Velocity, scratch, pressure and divergence share the simulation grid
/// size; both colour layers share the (independent) colour grid size.
#[derive(Clone, Debug)]
pub struct FluidBuffers {
    /// Primary velocity. Divergence-free after projection; this is what
    /// colour advection and presentation read.
    pub velocity: VectorField,
    /// Intermediate velocity pair used by advection, diffusion and force.
    pub scratch: PingPong<VectorField>,
    /// Pressure pair ping-ponged by the pressure solve.
    pub pressure: PingPong<ScalarField>,
    /// Divergence of the pre-projection velocity.
    pub divergence: ScalarField,
    /// The two colour layers, each double-buffered.
    pub colors: [PingPong<ColorField>; 2],
}

impl FluidBuffers {
    /// Zero-initialised buffers for a simulation grid and a colour grid.
    pub fn new(grid: GridSize, color: GridSize) -> Self {
        Self {
            velocity: VectorField::allocate(grid),
            scratch: PingPong::from_fn(|| VectorField::allocate(grid)),
            pressure: PingPong::from_fn(|| ScalarField::allocate(grid)),
            divergence: ScalarField::allocate(grid),
            colors: [
                PingPong::from_fn(|| ColorField::allocate(color)),
                PingPong::from_fn(|| ColorField::allocate(color)),
            ],
        }
    }

    /// Simulation grid size.
    pub fn grid_size(&self) -> GridSize {
        self.velocity.size()
    }

    /// Colour grid size.
    pub fn color_size(&self) -> GridSize {
        self.colors[0].front().size()
    }

    /// The double buffer behind a colour layer.
    pub fn color(&self, layer: ColorLayer) -> &PingPong<ColorField> {
        &self.colors[layer.index()]
    }

    /// Mutable access to a colour layer's double buffer.
    pub fn color_mut(&mut self, layer: ColorLayer) -> &mut PingPong<ColorField> {
        &mut self.colors[layer.index()]
    }

    /// The pressure solved by the most recent projection.
    pub fn pressure(&self) -> &ScalarField {
        self.pressure.front()
    }

    /// Zero every field.
    pub fn clear(&mut self) {
        self.clear_flow();
        for layer in &mut self.colors {
            layer.for_each_mut(|f| f.zero());
        }
    }

    /// Zero the velocity-side fields, leaving colour layers intact.
    pub fn clear_flow(&mut self) {
        self.velocity.zero();
        self.scratch.for_each_mut(|f| f.zero());
        self.pressure.for_each_mut(|f| f.zero());
        self.divergence.zero();
    }
}
