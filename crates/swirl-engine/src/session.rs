//! The fluid session: sole owner of a simulation's fields.
//!
//! [`FluidSession`] is the primary user-facing API. Each call to
//! [`step()`](FluidSession::step) runs one complete tick:
//! flow-cycle resets → pending clear → pinned override → solver pipeline.
//!
//! # Ownership model
//!
//! `FluidSession` is [`Send`] (it can be moved to a simulation thread) and
//! every mutating method takes `&mut self`, so a tick is atomic with
//! respect to presentation reads. Views returned by
//! [`view()`](FluidSession::view) borrow from the session, which prevents
//! stepping while a view is held.

use std::fmt;
use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use swirl_core::{
    BoundaryMode, BufferId, ColorLayer, PointerState, SelectorError, SimulationParams, TickId,
};
use swirl_grid::{ColorField, GridSize, Image, ScalarField, VectorField};
use swirl_stages::{diagnostics, FluidBuffers, ForceInput, Pipeline, Stage, StageContext};

use crate::config::{ConfigError, FluidConfig};
use crate::cycle::CycleClock;
use crate::metrics::StepMetrics;
use crate::registry::BufferTable;
use crate::view::BufferView;

// Compile-time assertion: FluidSession is Send.
// Fails to compile if any field (including boxed stages) is !Send.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<FluidSession>();
    }
};

// ── StepResult ──────────────────────────────────────────────────

/// Result of one [`FluidSession::step()`] call.
#[derive(Clone, Debug)]
pub struct StepResult {
    /// Tick counter after this step.
    pub tick_id: TickId,
    /// Timing and diagnostics for this step.
    pub metrics: StepMetrics,
}

// ── FluidSession ────────────────────────────────────────────────

/// One independent fluid simulation.
///
/// # Example
///
/// ```
/// use swirl_core::{PointerState, SimulationParams};
/// use swirl_engine::{FluidConfig, FluidSession};
///
/// let mut session = FluidSession::new(FluidConfig::square(32)).unwrap();
/// let drag = PointerState::drag([0.0, 0.0], [0.05, 0.0]);
/// let result = session.step(1.0 / 60.0, &drag, &SimulationParams::default());
/// assert_eq!(result.tick_id.0, 1);
/// assert!(session.velocity().max_magnitude() > 0.0);
/// ```
pub struct FluidSession {
    buffers: FluidBuffers,
    pipeline: Pipeline,
    table: BufferTable,
    boundary: BoundaryMode,
    defaults: SimulationParams,
    sources: [Option<Image>; 2],
    pinned: Option<(BufferId, Image)>,
    clear_pending: bool,
    cycle: Option<CycleClock>,
    rng: ChaCha8Rng,
    seed: u64,
    tick: TickId,
    diagnostics: bool,
    last_metrics: StepMetrics,
}

impl FluidSession {
    /// Create a session running the standard Stable Fluids pipeline.
    ///
    /// Validates the configuration and allocates every field,
    /// zero-initialised.
    pub fn new(config: FluidConfig) -> Result<Self, ConfigError> {
        Self::with_pipeline(config, Pipeline::standard())
    }

    /// Create a session running caller-supplied stages.
    ///
    /// The stages must cover every slot of the tick sequence exactly once,
    /// in order; otherwise [`ConfigError::Pipeline`] is returned.
    pub fn with_stages(
        config: FluidConfig,
        stages: Vec<Box<dyn Stage>>,
    ) -> Result<Self, ConfigError> {
        let pipeline = Pipeline::from_stages(stages)?;
        Self::with_pipeline(config, pipeline)
    }

    fn with_pipeline(config: FluidConfig, pipeline: Pipeline) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = config.grid_size();
        let color = config.color_grid_size();
        log::debug!(
            "new fluid session: grid {grid}, colour {color}, {} walls, seed {}",
            config.boundary,
            config.seed
        );
        Ok(Self {
            buffers: FluidBuffers::new(grid, color),
            pipeline,
            table: BufferTable::new(grid, color),
            boundary: config.boundary,
            defaults: config.params,
            sources: [None, None],
            pinned: None,
            clear_pending: false,
            cycle: config.cycle.map(CycleClock::new),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            seed: config.seed,
            tick: TickId::default(),
            diagnostics: config.diagnostics,
            last_metrics: StepMetrics::default(),
        })
    }

    // ── Ticking ─────────────────────────────────────────────────

    /// Execute one tick.
    ///
    /// `dt` and `params.viscosity` must be positive; violations are not
    /// rejected and surface as non-finite field values. Pointer input is
    /// used as given, NaN included.
    pub fn step(
        &mut self,
        dt: f32,
        pointer: &PointerState,
        params: &SimulationParams,
    ) -> StepResult {
        let start = Instant::now();

        self.advance_cycle(dt);
        if std::mem::take(&mut self.clear_pending) {
            self.buffers.clear();
            log::debug!("cleared all fields before tick {}", self.tick.0 + 1);
        }
        if let Some((id, image)) = &self.pinned {
            blit_override(&mut self.buffers, *id, image);
        }

        let ctx = StageContext {
            dt,
            boundary: self.boundary,
            params: *params,
            force: ForceInput::from_pointer(pointer, params, &mut self.rng),
        };
        let stage_us = self.pipeline.run(&ctx, &mut self.buffers);

        let (max_divergence, kinetic_energy) = if self.diagnostics {
            let velocity = &self.buffers.velocity;
            let margin = if self.boundary.wraps() { 0 } else { 1 };
            (
                Some(diagnostics::max_divergence(velocity, self.boundary, margin)),
                Some(diagnostics::kinetic_energy(velocity)),
            )
        } else {
            (None, None)
        };

        self.tick = TickId(self.tick.0 + 1);
        let metrics = StepMetrics {
            total_us: u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX),
            stage_us,
            max_divergence,
            kinetic_energy,
        };
        log::trace!("tick {} took {}us", self.tick, metrics.total_us);
        self.last_metrics = metrics.clone();

        StepResult {
            tick_id: self.tick,
            metrics,
        }
    }

    /// Execute one tick with the session's default parameters.
    pub fn step_default(&mut self, dt: f32, pointer: &PointerState) -> StepResult {
        let params = self.defaults;
        self.step(dt, pointer, &params)
    }

    fn advance_cycle(&mut self, dt: f32) {
        let Some(clock) = self.cycle.as_mut() else {
            return;
        };
        for layer in clock.advance(dt) {
            self.reset_color(layer);
        }
    }

    // ── Colour layers ───────────────────────────────────────────

    /// Re-seed both buffers of a colour layer from its source image.
    ///
    /// A no-op (logged at debug level) when the layer has no source.
    pub fn reset_color(&mut self, layer: ColorLayer) {
        match &self.sources[layer.index()] {
            Some(image) => {
                self.buffers
                    .color_mut(layer)
                    .for_each_mut(|f| image.blit_into(f));
                log::debug!("{layer} reset from its source");
            }
            None => log::debug!("{layer} has no source image; reset skipped"),
        }
    }

    /// Make `image` the layer's source and copy it into both buffers.
    pub fn reset_color_field(&mut self, layer: ColorLayer, image: Image) {
        self.sources[layer.index()] = Some(image);
        self.reset_color(layer);
    }

    /// Make `image` the layer's source without touching its buffers. It
    /// takes effect on the next reset.
    pub fn set_color_source(&mut self, layer: ColorLayer, image: Image) {
        self.sources[layer.index()] = Some(image);
    }

    /// The layer's source image, if any.
    pub fn color_source(&self, layer: ColorLayer) -> Option<&Image> {
        self.sources[layer.index()].as_ref()
    }

    // ── Boundary ────────────────────────────────────────────────

    /// Switch the wall mode; applies from the next tick.
    pub fn set_boundary_mode(&mut self, mode: BoundaryMode) {
        if mode != self.boundary {
            log::debug!("boundary mode {} -> {mode}", self.boundary);
        }
        self.boundary = mode;
    }

    /// Switch the wall mode by name. An unknown name is logged and leaves
    /// the mode unchanged.
    pub fn set_boundary_named(&mut self, name: &str) -> Result<(), SelectorError> {
        let mode = name
            .parse::<BoundaryMode>()
            .inspect_err(|e| log::error!("set_boundary: {e}"))?;
        self.set_boundary_mode(mode);
        Ok(())
    }

    /// The current wall mode.
    pub fn boundary_mode(&self) -> BoundaryMode {
        self.boundary
    }

    // ── Buffer access ───────────────────────────────────────────

    /// Borrow a buffer for presentation. Colour buffers are the front
    /// (most recently written) slot.
    pub fn view(&self, id: BufferId) -> BufferView<'_> {
        match id {
            BufferId::ColorBuffer1 => BufferView::Color(self.color(ColorLayer::First)),
            BufferId::ColorBuffer2 => BufferView::Color(self.color(ColorLayer::Second)),
            BufferId::Velocity => BufferView::Vector(self.velocity()),
            BufferId::Pressure => BufferView::Scalar(self.pressure()),
        }
    }

    /// Borrow a buffer by raw id. Unknown ids are logged and returned as
    /// errors.
    pub fn view_raw(&self, raw: u32) -> Result<BufferView<'_>, SelectorError> {
        let info = self
            .table
            .resolve_raw(raw)
            .inspect_err(|e| log::error!("view: {e}"))?;
        Ok(self.view(info.id))
    }

    /// Borrow a buffer by name. Unknown names are logged and returned as
    /// errors.
    pub fn view_named(&self, name: &str) -> Result<BufferView<'_>, SelectorError> {
        let info = self
            .table
            .resolve_name(name)
            .inspect_err(|e| log::error!("view: {e}"))?;
        Ok(self.view(info.id))
    }

    /// The divergence-free velocity field.
    pub fn velocity(&self) -> &VectorField {
        &self.buffers.velocity
    }

    /// The pressure from the most recent projection.
    pub fn pressure(&self) -> &ScalarField {
        self.buffers.pressure()
    }

    /// The divergence measured before the most recent projection.
    pub fn divergence(&self) -> &ScalarField {
        &self.buffers.divergence
    }

    /// The front buffer of a colour layer.
    pub fn color(&self, layer: ColorLayer) -> &ColorField {
        self.buffers.color(layer).front()
    }

    /// The buffer lookup table.
    pub fn buffer_table(&self) -> &BufferTable {
        &self.table
    }

    // ── Overrides and clears ────────────────────────────────────

    /// Overwrite a buffer with `image`, resampled to the buffer's size.
    pub fn override_field(&mut self, id: BufferId, image: &Image) {
        blit_override(&mut self.buffers, id, image);
        log::debug!(
            "{id} overridden from {}x{} image",
            image.width(),
            image.height()
        );
    }

    /// [`override_field`](Self::override_field) by raw id. Unknown ids are
    /// logged and leave every buffer untouched.
    pub fn override_raw(&mut self, raw: u32, image: &Image) -> Result<(), SelectorError> {
        let id = self
            .table
            .resolve_raw(raw)
            .inspect_err(|e| log::error!("override: {e}"))?
            .id;
        self.override_field(id, image);
        Ok(())
    }

    /// [`override_field`](Self::override_field) by name. Unknown names are
    /// logged and leave every buffer untouched.
    pub fn override_named(&mut self, name: &str, image: &Image) -> Result<(), SelectorError> {
        let id = self
            .table
            .resolve_name(name)
            .inspect_err(|e| log::error!("override: {e}"))?
            .id;
        self.override_field(id, image);
        Ok(())
    }

    /// Re-apply `image` to buffer `id` at the start of every tick until
    /// unpinned. Replaces any previous pin.
    pub fn pin_override(&mut self, id: BufferId, image: Image) {
        log::debug!("{id} pinned to a {}x{} image", image.width(), image.height());
        self.pinned = Some((id, image));
    }

    /// Stop re-applying the pinned override, returning it.
    pub fn unpin_override(&mut self) -> Option<(BufferId, Image)> {
        self.pinned.take()
    }

    /// The buffer currently pinned, if any.
    pub fn pinned_override(&self) -> Option<BufferId> {
        self.pinned.as_ref().map(|(id, _)| *id)
    }

    /// Zero every field at the start of the next tick.
    pub fn request_clear(&mut self) {
        self.clear_pending = true;
    }

    /// Zero every field now.
    pub fn clear_all(&mut self) {
        self.buffers.clear();
        self.clear_pending = false;
        log::debug!("cleared all fields");
    }

    /// Return to the initial state with a new impulse seed: fields zeroed,
    /// colour layers re-seeded from their sources, tick counter and flow
    /// cycle reset. Sources, pins, parameters and the wall mode are kept.
    pub fn restart(&mut self, seed: u64) {
        self.buffers.clear();
        self.clear_pending = false;
        self.tick = TickId::default();
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self.seed = seed;
        if let Some(clock) = &mut self.cycle {
            clock.reset();
        }
        for layer in ColorLayer::ALL {
            if self.sources[layer.index()].is_some() {
                self.reset_color(layer);
            }
        }
        self.last_metrics = StepMetrics::default();
        log::debug!("session restarted with seed {seed}");
    }

    // ── Introspection ───────────────────────────────────────────

    /// Number of completed ticks since creation or the last restart.
    pub fn current_tick(&self) -> TickId {
        self.tick
    }

    /// Velocity and pressure grid size.
    pub fn grid_size(&self) -> GridSize {
        self.buffers.grid_size()
    }

    /// Colour grid size.
    pub fn color_size(&self) -> GridSize {
        self.buffers.color_size()
    }

    /// Cross-fade weight between the colour layers, when a flow cycle is
    /// configured.
    pub fn blend_weight(&self) -> Option<f32> {
        self.cycle.as_ref().map(CycleClock::blend_weight)
    }

    /// The flow-cycle clock, when configured.
    pub fn cycle(&self) -> Option<&CycleClock> {
        self.cycle.as_ref()
    }

    /// Metrics from the most recent tick.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    /// The current impulse seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Default parameters used by [`step_default`](Self::step_default).
    pub fn params(&self) -> &SimulationParams {
        &self.defaults
    }

    /// Replace the default parameters.
    pub fn set_params(&mut self, params: SimulationParams) {
        self.defaults = params;
    }

    /// Turn per-tick diagnostics on or off.
    pub fn set_diagnostics(&mut self, enabled: bool) {
        self.diagnostics = enabled;
    }

    /// The stage sequence this session runs.
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }
}

impl fmt::Debug for FluidSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FluidSession")
            .field("grid", &self.grid_size())
            .field("color", &self.color_size())
            .field("boundary", &self.boundary)
            .field("tick", &self.tick)
            .field("seed", &self.seed)
            .field("pipeline", &self.pipeline)
            .field("pinned", &self.pinned_override())
            .finish_non_exhaustive()
    }
}

fn blit_override(buffers: &mut FluidBuffers, id: BufferId, image: &Image) {
    match id {
        BufferId::ColorBuffer1 => image.blit_into(buffers.color_mut(ColorLayer::First).front_mut()),
        BufferId::ColorBuffer2 => image.blit_into(buffers.color_mut(ColorLayer::Second).front_mut()),
        BufferId::Velocity => image.blit_into(&mut buffers.velocity),
        BufferId::Pressure => image.blit_into(buffers.pressure.front_mut()),
    }
}
