//! Canonical starting fields and images.

use std::f32::consts::TAU;

use swirl_grid::{GridSize, Image, VectorField};

/// A solid-colour image.
pub fn constant_image(width: usize, height: usize, rgba: [f32; 4]) -> Image {
    Image::solid(width, height, rgba)
}

/// A black-and-white checkerboard with `cell`-pixel squares.
pub fn checker_image(width: usize, height: usize, cell: usize) -> Image {
    let cell = cell.max(1);
    Image::from_fn(width, height, |x, y| {
        let on = ((x / cell) + (y / cell)) % 2 == 0;
        let v = if on { 1.0 } else { 0.0 };
        [v, v, v, 1.0]
    })
}

/// A horizontal red ramp from 0 at the left edge to 1 at the right.
pub fn ramp_image(width: usize, height: usize) -> Image {
    let span = (width.max(2) - 1) as f32;
    Image::from_fn(width, height, |x, _| [x as f32 / span, 0.0, 0.0, 1.0])
}

/// A uniform flow.
pub fn uniform_flow(size: GridSize, velocity: [f32; 2]) -> VectorField {
    VectorField::filled(size, velocity)
}

/// `vector · exp(−r² / (2σ²))` around a cell-space centre, with `σ` in cells.
pub fn gaussian_push(
    size: GridSize,
    centre: [f32; 2],
    sigma_cells: f32,
    vector: [f32; 2],
) -> VectorField {
    let inv = 1.0 / (2.0 * sigma_cells * sigma_cells);
    VectorField::from_fn(size, |x, y| {
        let dx = x as f32 + 0.5 - centre[0];
        let dy = y as f32 + 0.5 - centre[1];
        let g = (-(dx * dx + dy * dy) * inv).exp();
        [vector[0] * g, vector[1] * g]
    })
}

/// A radially outward flow `r̂ · |r| · exp(−r² / (2σ²))` around the grid
/// centre: a smooth, strongly divergent source.
pub fn radial_source(size: GridSize, sigma_cells: f32, strength: f32) -> VectorField {
    let (cx, cy) = (size.width as f32 * 0.5, size.height as f32 * 0.5);
    let inv = 1.0 / (2.0 * sigma_cells * sigma_cells);
    VectorField::from_fn(size, |x, y| {
        let dx = x as f32 + 0.5 - cx;
        let dy = y as f32 + 0.5 - cy;
        let g = strength * (-(dx * dx + dy * dy) * inv).exp() / sigma_cells;
        [dx * g, dy * g]
    })
}

/// `(sin(2πk·x/W), sin(2πk·y/H))`: periodic on the grid, with divergence
/// concentrated in wavenumber `k` on each axis.
pub fn periodic_source(size: GridSize, k: u32) -> VectorField {
    let (w, h) = (size.width as f32, size.height as f32);
    let k = k as f32;
    VectorField::from_fn(size, |x, y| {
        [
            (TAU * k * x as f32 / w).sin(),
            (TAU * k * y as f32 / h).sin(),
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gaussian_peaks_at_centre() {
        let f = gaussian_push(GridSize::new(16, 16), [8.5, 8.5], 2.0, [1.0, 0.0]);
        assert_eq!(f.get(8, 8), [1.0, 0.0]);
        assert!(f.get(0, 0)[0] < 1e-4);
    }

    #[test]
    fn checker_alternates() {
        let img = checker_image(4, 4, 1);
        assert_eq!(img.pixels()[0][0], 1.0);
        assert_eq!(img.pixels()[1][0], 0.0);
        assert_eq!(img.pixels()[4][0], 0.0);
    }
}
