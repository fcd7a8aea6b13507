//! Grid sizing rules.
//!
//! Velocity and pressure grids are rounded up to whole tiles of
//! [`TILE_SIZE`] cells per axis. Colour grids keep their requested size and
//! are only clamped to [`MIN_RESOLUTION`].

use std::fmt;

/// Cells per tile edge. Velocity and pressure dimensions are multiples of this.
pub const TILE_SIZE: u32 = 8;

/// Smallest accepted grid dimension on either axis.
pub const MIN_RESOLUTION: u32 = 8;

/// Dimensions of a 2D grid, in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridSize {
    /// Number of columns.
    pub width: u32,
    /// Number of rows.
    pub height: u32,
}

impl GridSize {
    /// A grid of exactly `width × height` cells.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Simulation grid for a viewport.
    ///
    /// The horizontal resolution is `resolution` rounded up to a whole tile;
    /// the vertical resolution follows the viewport aspect ratio
    /// (`resolution · viewport_h / viewport_w`) and is rounded up likewise.
    /// A resolution below [`MIN_RESOLUTION`] is clamped with a warning.
    ///
    /// ```
    /// use swirl_grid::GridSize;
    ///
    /// let size = GridSize::for_viewport(100, 1920, 1080);
    /// assert_eq!(size, GridSize::new(104, 56));
    /// ```
    pub fn for_viewport(resolution: u32, viewport_w: u32, viewport_h: u32) -> Self {
        let res = clamp_axis("resolution", resolution);
        let vw = u64::from(viewport_w.max(1));
        let vh = u64::from(viewport_h.max(1));
        let scaled = u64::from(res) * vh / vw;
        let height = u32::try_from(scaled).unwrap_or(u32::MAX);
        Self {
            width: round_to_tile(res),
            height: round_to_tile(height.max(MIN_RESOLUTION)),
        }
    }

    /// A grid of `width × height`, each axis clamped to at least
    /// [`MIN_RESOLUTION`] but otherwise not rounded.
    pub fn at_least_min(width: u32, height: u32) -> Self {
        Self {
            width: clamp_axis("width", width),
            height: clamp_axis("height", height),
        }
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Width as `usize`.
    pub fn w(&self) -> usize {
        self.width as usize
    }

    /// Height as `usize`.
    pub fn h(&self) -> usize {
        self.height as usize
    }

    /// Grid spacing in normalised units, where the domain height is 1.
    pub fn dx(&self) -> f32 {
        1.0 / self.height as f32
    }

    /// Width over height.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Row-major index of cell `(x, y)`.
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width as usize + x
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

fn round_to_tile(n: u32) -> u32 {
    n.div_ceil(TILE_SIZE).saturating_mul(TILE_SIZE)
}

fn clamp_axis(what: &str, n: u32) -> u32 {
    if n < MIN_RESOLUTION {
        log::warn!("{what} {n} below minimum, clamping to {MIN_RESOLUTION}");
        MIN_RESOLUTION
    } else {
        n
    }
}
