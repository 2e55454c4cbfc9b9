//! Separable 2D windowed reduction.
//!
//! A reduction is applied along every row, the intermediate is transposed,
//! the same reduction is applied along every (former) column and the result
//! transposed back. Lines are independent, so both passes run row-parallel
//! with rayon and produce the same bits as a sequential run.
//!
//! Complexity: two transposes plus two 1D passes; the 1D cost is up to the
//! reduction (`O(n)` for the mean, `O(n·window)` for the min).
use super::border::BorderMode;
use super::reduction::{Sample, WindowReduction};
use rayon::prelude::*;

/// Extent of a 1D window around its anchor sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    pub before: usize,
    pub after: usize,
}

impl Window {
    /// Window of `size` samples anchored at `size / 2`, the anchor a
    /// rectangular structuring element of that size uses. Odd sizes are
    /// symmetric; even sizes reach one sample further back than forward.
    pub fn centered(size: usize) -> Self {
        let size = size.max(1);
        let before = size / 2;
        Self {
            before,
            after: size - 1 - before,
        }
    }

    /// In-range bounds `[lo, hi]` of the window anchored at `i` on a line of
    /// `len > 0` samples. Saturates, so any window size is safe.
    #[inline]
    pub fn span(&self, i: usize, len: usize) -> (usize, usize) {
        (
            i.saturating_sub(self.before),
            i.saturating_add(self.after).min(len - 1),
        )
    }

    /// Symmetric `2 * radius + 1` window.
    pub fn radius(radius: usize) -> Self {
        Self {
            before: radius,
            after: radius,
        }
    }
}

/// Reduce every `window_x × window_y` neighbourhood of a `w × h` row-major
/// grid.
pub fn reduce_window<T, R>(
    src: &[T],
    w: usize,
    h: usize,
    window_x: Window,
    window_y: Window,
    border: BorderMode,
    reduction: &R,
) -> Vec<T>
where
    T: Sample,
    R: WindowReduction,
{
    debug_assert_eq!(src.len(), w * h);
    if w == 0 || h == 0 {
        return Vec::new();
    }

    let mut horiz = vec![T::from_f64(0.0); w * h];
    horiz
        .par_chunks_mut(w)
        .zip(src.par_chunks(w))
        .for_each(|(dst, row)| reduction.reduce_line(row, window_x, border, dst));

    let columns = transpose(&horiz, w, h);
    let mut vert = vec![T::from_f64(0.0); w * h];
    vert.par_chunks_mut(h)
        .zip(columns.par_chunks(h))
        .for_each(|(dst, col)| reduction.reduce_line(col, window_y, border, dst));

    transpose(&vert, h, w)
}

/// Transpose a `w × h` row-major grid into an `h × w` one.
fn transpose<T: Sample>(src: &[T], w: usize, h: usize) -> Vec<T> {
    let mut out = vec![T::from_f64(0.0); w * h];
    out.par_chunks_mut(h).enumerate().for_each(|(x, col)| {
        for (y, dst) in col.iter_mut().enumerate() {
            *dst = src[y * w + x];
        }
    });
    out
}
