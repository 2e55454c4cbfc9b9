//! Dark channel of a three-channel image.
//!
//! The per-pixel minimum over the colour channels is eroded with a
//! `patch × patch` rectangular element. In haze-free outdoor regions at
//! least one channel is close to zero, so the dark channel approximates the
//! haze contribution.
//!
//! - Output never exceeds the per-pixel channel minimum.
//! - A patch at least as large as both image dimensions collapses the
//!   output to the global minimum.
use crate::error::{DehazeError, Result};
use crate::filters::{min_filter, BorderMode, Window};
use crate::image::{ImageF32, RgbImageF32};

/// Patch size used when none is configured.
pub const DEFAULT_PATCH: usize = 15;

/// Per-pixel minimum over the three channels.
pub fn channel_min(image: &RgbImageF32) -> ImageF32 {
    ImageF32 {
        w: image.w,
        h: image.h,
        data: image
            .pixels()
            .map(|px| px[0].min(px[1]).min(px[2]))
            .collect(),
    }
}

/// Dark channel with replicated borders.
pub fn dark_channel(image: &RgbImageF32, patch: usize) -> Result<ImageF32> {
    dark_channel_with_border(image, patch, BorderMode::Replicate)
}

pub fn dark_channel_with_border(
    image: &RgbImageF32,
    patch: usize,
    border: BorderMode,
) -> Result<ImageF32> {
    if patch == 0 {
        return Err(DehazeError::invalid("patch", patch, "must be at least 1"));
    }
    Ok(min_filter(&channel_min(image), Window::centered(patch), border))
}
