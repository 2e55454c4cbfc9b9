//! 1D window reductions plugged into the separable driver in
//! [`super::window::reduce_window`].
use super::border::BorderMode;
use super::window::Window;

/// Scalar sample type a reduction can operate on.
pub trait Sample: Copy + Send + Sync + PartialOrd + 'static {
    fn to_f64(self) -> f64;
    fn from_f64(v: f64) -> Self;
}

impl Sample for f32 {
    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }
    #[inline]
    fn from_f64(v: f64) -> Self {
        v as f32
    }
}

impl Sample for f64 {
    #[inline]
    fn to_f64(self) -> f64 {
        self
    }
    #[inline]
    fn from_f64(v: f64) -> Self {
        v
    }
}

/// Reduction of every window along one line of samples.
///
/// `dst[i]` receives the reduction of the window `[i - before, i + after]`
/// of `src` under the given border mode. `src` and `dst` have equal length.
pub trait WindowReduction: Sync {
    fn reduce_line<T: Sample>(
        &self,
        src: &[T],
        window: Window,
        border: BorderMode,
        dst: &mut [T],
    );
}

/// Window minimum (grayscale erosion with a rectangular element).
#[derive(Clone, Copy, Debug, Default)]
pub struct MinReduction;

impl WindowReduction for MinReduction {
    fn reduce_line<T: Sample>(
        &self,
        src: &[T],
        window: Window,
        _border: BorderMode,
        dst: &mut [T],
    ) {
        let n = src.len();
        if n == 0 {
            return;
        }
        for (i, out) in dst.iter_mut().enumerate() {
            let (lo, hi) = window.span(i, n);
            let mut acc = src[lo];
            for &v in &src[lo + 1..=hi] {
                if v < acc {
                    acc = v;
                }
            }
            *out = acc;
        }
    }
}

/// Window average. Runs on an `f64` prefix sum, so the cost per sample does
/// not depend on the window size.
#[derive(Clone, Copy, Debug, Default)]
pub struct MeanReduction;

impl WindowReduction for MeanReduction {
    fn reduce_line<T: Sample>(
        &self,
        src: &[T],
        window: Window,
        border: BorderMode,
        dst: &mut [T],
    ) {
        let n = src.len();
        if n == 0 {
            return;
        }
        let mut prefix = Vec::with_capacity(n + 1);
        let mut acc = 0.0f64;
        prefix.push(acc);
        for &v in src {
            acc += v.to_f64();
            prefix.push(acc);
        }

        let first = src[0].to_f64();
        let last = src[n - 1].to_f64();
        let full = window.before as f64 + window.after as f64 + 1.0;
        for (i, out) in dst.iter_mut().enumerate() {
            let (lo, hi) = window.span(i, n);
            let inner = prefix[hi + 1] - prefix[lo];
            let mean = match border {
                BorderMode::Truncate => inner / (hi - lo + 1) as f64,
                BorderMode::Replicate => {
                    let left = window.before.saturating_sub(i) as f64;
                    let right = i.saturating_add(window.after).saturating_sub(n - 1) as f64;
                    (inner + left * first + right * last) / full
                }
            };
            *out = T::from_f64(mean);
        }
    }
}
