//! Border-aware windowed reductions over 2D grids.
//!
//! The min-filter used by the dark channel and the box (mean) filter used
//! by the guided filter are the same operation with a different 1D
//! reduction: [`reduce_window`] drives any [`WindowReduction`] separably
//! over rows and columns under a [`BorderMode`].

pub mod border;
pub mod reduction;
pub mod window;

pub use border::BorderMode;
pub use reduction::{MeanReduction, MinReduction, Sample, WindowReduction};
pub use window::{reduce_window, Window};

use crate::image::ImageF32;

/// Minimum over a `window × window` neighbourhood of every pixel.
pub fn min_filter(image: &ImageF32, window: Window, border: BorderMode) -> ImageF32 {
    ImageF32 {
        w: image.w,
        h: image.h,
        data: reduce_window(
            &image.data,
            image.w,
            image.h,
            window,
            window,
            border,
            &MinReduction,
        ),
    }
}

/// Mean over a `window × window` neighbourhood of every pixel.
pub fn box_filter(image: &ImageF32, window: Window, border: BorderMode) -> ImageF32 {
    ImageF32 {
        w: image.w,
        h: image.h,
        data: reduce_window(
            &image.data,
            image.w,
            image.h,
            window,
            window,
            border,
            &MeanReduction,
        ),
    }
}
