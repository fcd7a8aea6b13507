//! Row-wise grid fills, optionally distributed across the rayon pool.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Overwrite every element of a row-major grid with `f(x, y)`.
///
/// Each cell is written exactly once and `f` only sees its coordinates,
/// so the parallel and sequential paths produce identical output.
pub(crate) fn fill_rows<T, F>(cells: &mut [T], width: usize, f: F)
where
    T: Send,
    F: Fn(usize, usize) -> T + Sync,
{
    if width == 0 {
        return;
    }

    #[cfg(feature = "parallel")]
    {
        cells
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| fill_row(row, y, &f));
    }
    #[cfg(not(feature = "parallel"))]
    {
        cells
            .chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| fill_row(row, y, &f));
    }
}

#[inline]
fn fill_row<T, F>(row: &mut [T], y: usize, f: &F)
where
    F: Fn(usize, usize) -> T,
{
    for (x, cell) in row.iter_mut().enumerate() {
        *cell = f(x, y);
    }
}
