//! Dense 2D grids of fixed-width `f32` texels.

use swirl_core::BoundaryMode;

use crate::error::FieldError;
use crate::parallel::fill_rows;
use crate::resolution::GridSize;
use crate::sample::{corner, lerp, resolve_axis};

/// A `width × height` grid of `C`-component texels.
///
/// Storage is row-major with row 0 at the bottom of the domain. Values are
/// never clamped or filtered: NaN and infinities written into a field stay
/// there until overwritten.
#[derive(Clone, Debug, PartialEq)]
pub struct Field<const C: usize> {
    size: GridSize,
    texels: Vec<[f32; C]>,
}

/// Two-component field (velocity).
pub type VectorField = Field<2>;
/// Single-component field (pressure, divergence).
pub type ScalarField = Field<1>;
/// Four-component RGBA field.
pub type ColorField = Field<4>;

impl<const C: usize> Field<C> {
    /// A zero-initialised field.
    pub fn allocate(size: GridSize) -> Self {
        Self::filled(size, [0.0; C])
    }

    /// A field with every texel set to `value`.
    pub fn filled(size: GridSize, value: [f32; C]) -> Self {
        Self {
            size,
            texels: vec![value; size.cell_count()],
        }
    }

    /// A field whose texel at `(x, y)` is `f(x, y)`.
    pub fn from_fn<F>(size: GridSize, f: F) -> Self
    where
        F: Fn(usize, usize) -> [f32; C] + Sync,
    {
        let mut field = Self::allocate(size);
        field.fill_with(f);
        field
    }

    /// Grid dimensions.
    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.size.w()
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.size.h()
    }

    /// All texels in row-major order.
    pub fn texels(&self) -> &[[f32; C]] {
        &self.texels
    }

    /// Mutable access to all texels in row-major order.
    pub fn texels_mut(&mut self) -> &mut [[f32; C]] {
        &mut self.texels
    }

    /// Texel components flattened into one slice, for upload or export.
    pub fn as_flat(&self) -> &[f32] {
        self.texels.as_flattened()
    }

    /// The texel at an in-range cell. Panics when `(x, y)` is outside the grid.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> [f32; C] {
        self.texels[self.size.index(x, y)]
    }

    /// Overwrite the texel at an in-range cell. Panics when out of range.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: [f32; C]) {
        let i = self.size.index(x, y);
        self.texels[i] = value;
    }

    /// Read a texel at a possibly out-of-grid cell, resolving the
    /// coordinates under `mode` (clamp for walls, wrap for looped).
    #[inline]
    pub fn fetch(&self, x: isize, y: isize, mode: BoundaryMode) -> [f32; C] {
        let rx = resolve_axis(x, self.width(), mode);
        let ry = resolve_axis(y, self.height(), mode);
        self.get(rx, ry)
    }

    /// Bilinear sample at texel-space position `(px, py)`.
    ///
    /// Texel centres sit at `i + 0.5`, so sampling at a centre returns that
    /// texel exactly. Neighbours outside the grid resolve under `mode`.
    pub fn sample(&self, px: f32, py: f32, mode: BoundaryMode) -> [f32; C] {
        let (x0, tx) = corner(px);
        let (y0, ty) = corner(py);
        let x1 = x0.saturating_add(1);
        let y1 = y0.saturating_add(1);
        let bottom = lerp(self.fetch(x0, y0, mode), self.fetch(x1, y0, mode), tx);
        let top = lerp(self.fetch(x0, y1, mode), self.fetch(x1, y1, mode), tx);
        lerp(bottom, top, ty)
    }

    /// Bilinear sample at normalised position `(u, v)` in `[0, 1]²`.
    pub fn sample_uv(&self, u: f32, v: f32, mode: BoundaryMode) -> [f32; C] {
        self.sample(u * self.width() as f32, v * self.height() as f32, mode)
    }

    /// Copy every texel of `src` into this field.
    pub fn copy_from(&mut self, src: &Self) -> Result<(), FieldError> {
        if self.size != src.size {
            return Err(FieldError::ShapeMismatch {
                expected: self.size,
                actual: src.size,
            });
        }
        self.texels.copy_from_slice(&src.texels);
        Ok(())
    }

    /// Set every texel to `value`.
    pub fn clear(&mut self, value: [f32; C]) {
        self.texels.fill(value);
    }

    /// Set every texel to zero.
    pub fn zero(&mut self) {
        self.clear([0.0; C]);
    }

    /// Overwrite every texel with `f(x, y)`.
    ///
    /// Rows are filled in parallel when the `parallel` feature is enabled.
    pub fn fill_with<F>(&mut self, f: F)
    where
        F: Fn(usize, usize) -> [f32; C] + Sync,
    {
        let width = self.width();
        fill_rows(&mut self.texels, width, f);
    }

    /// Largest Euclidean texel norm. NaN texels are ignored.
    pub fn max_magnitude(&self) -> f32 {
        self.texels
            .iter()
            .map(|t| t.iter().map(|c| c * c).sum::<f32>().sqrt())
            .fold(0.0, f32::max)
    }

    /// Whether every component of every texel is finite.
    pub fn is_finite(&self) -> bool {
        self.as_flat().iter().all(|v| v.is_finite())
    }
}
