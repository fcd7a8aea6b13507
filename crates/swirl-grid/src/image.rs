//! Caller-provided RGBA images and their bilinear resampling into fields.
//!
//! Images are the only way external data enters the solver: colour-layer
//! sources, pinned debug flow maps and one-shot overrides. Decoding from
//! files is the caller's job.

use crate::field::Field;
use crate::resolution::GridSize;

/// An RGBA `f32` image of arbitrary size, row-major, row 0 at the bottom.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    width: usize,
    height: usize,
    pixels: Vec<[f32; 4]>,
}

impl Image {
    /// An image of one solid colour. Zero dimensions are raised to 1.
    pub fn solid(width: usize, height: usize, rgba: [f32; 4]) -> Self {
        let (width, height) = (width.max(1), height.max(1));
        Self {
            width,
            height,
            pixels: vec![rgba; width * height],
        }
    }

    /// An image whose pixel at `(x, y)` is `f(x, y)`. Zero dimensions are
    /// raised to 1.
    pub fn from_fn(width: usize, height: usize, f: impl Fn(usize, usize) -> [f32; 4]) -> Self {
        let (width, height) = (width.max(1), height.max(1));
        let pixels = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Wrap existing pixels. Returns `None` unless `pixels.len()` equals
    /// `width × height` and both dimensions are non-zero.
    pub fn from_rgba(width: usize, height: usize, pixels: Vec<[f32; 4]>) -> Option<Self> {
        if width == 0 || height == 0 || pixels.len() != width * height {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    /// Image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixels in row-major order.
    pub fn pixels(&self) -> &[[f32; 4]] {
        &self.pixels
    }

    fn pixel(&self, x: usize, y: usize) -> [f32; 4] {
        self.pixels[y * self.width + x]
    }

    /// Resample into `dst`, keeping the first `C` channels.
    ///
    /// The mapping is corner-aligned: output cell `x` reads input position
    /// `x · (w_in − 1) / (w_out − 1)`, so the four image corners land exactly
    /// on the four field corners. Same-sized images copy through unchanged.
    pub fn blit_into<const C: usize>(&self, dst: &mut Field<C>) {
        let sx = axis_scale(self.width, dst.width());
        let sy = axis_scale(self.height, dst.height());
        dst.fill_with(|x, y| {
            let rgba = self.bilinear(x as f32 * sx, y as f32 * sy);
            let mut out = [0.0; C];
            let n = C.min(4);
            out[..n].copy_from_slice(&rgba[..n]);
            out
        });
    }

    /// Resample into a freshly allocated field of `size`.
    pub fn to_field<const C: usize>(&self, size: GridSize) -> Field<C> {
        let mut field = Field::allocate(size);
        self.blit_into(&mut field);
        field
    }

    fn bilinear(&self, fx: f32, fy: f32) -> [f32; 4] {
        let x0 = (fx.floor() as usize).min(self.width - 1);
        let y0 = (fy.floor() as usize).min(self.height - 1);
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);
        let tx = fx - x0 as f32;
        let ty = fy - y0 as f32;

        let mut out = [0.0; 4];
        let (a, b) = (self.pixel(x0, y0), self.pixel(x1, y0));
        let (c, d) = (self.pixel(x0, y1), self.pixel(x1, y1));
        for i in 0..4 {
            let bottom = a[i] * (1.0 - tx) + b[i] * tx;
            let top = c[i] * (1.0 - tx) + d[i] * tx;
            out[i] = bottom * (1.0 - ty) + top * ty;
        }
        out
    }
}

fn axis_scale(len_in: usize, len_out: usize) -> f32 {
    if len_out <= 1 {
        0.0
    } else {
        (len_in - 1) as f32 / (len_out - 1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{ColorField, ScalarField, VectorField};

    #[test]
    fn from_rgba_checks_length() {
        assert!(Image::from_rgba(2, 2, vec![[0.0; 4]; 3]).is_none());
        assert!(Image::from_rgba(0, 2, Vec::new()).is_none());
        assert!(Image::from_rgba(2, 2, vec![[0.0; 4]; 4]).is_some());
    }

    #[test]
    fn same_size_blit_is_a_copy() {
        let img = Image::from_fn(8, 8, |x, y| [x as f32, y as f32, 0.5, 1.0]);
        let field: ColorField = img.to_field(GridSize::new(8, 8));
        assert_eq!(field.get(3, 5), [3.0, 5.0, 0.5, 1.0]);
        assert_eq!(field.get(7, 7), [7.0, 7.0, 0.5, 1.0]);
    }

    #[test]
    fn upscale_hits_corners_and_interpolates() {
        let img = Image::from_fn(2, 2, |x, _| [x as f32, 0.0, 0.0, 1.0]);
        let field: ScalarField = img.to_field(GridSize::new(9, 8));
        assert_eq!(field.get(0, 0), [0.0]);
        assert!((field.get(8, 7)[0] - 1.0).abs() < 1e-6);
        assert!((field.get(4, 3)[0] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn vector_blit_keeps_red_and_green() {
        let img = Image::solid(3, 5, [0.25, -0.5, 9.0, 9.0]);
        let field: VectorField = img.to_field(GridSize::new(16, 8));
        assert!(field
            .texels()
            .iter()
            .all(|t| (t[0] - 0.25).abs() < 1e-6 && (t[1] + 0.5).abs() < 1e-6));
    }
}
