//! Atmospheric light estimation.
//!
//! The haziest pixels are those with the brightest dark channel. The
//! estimate is the mean colour of the image at the top `ratio` fraction of
//! them, so it is a convex combination of image samples and stays inside the
//! per-channel sample range.
//!
//! Selection is a partition (`select_nth_unstable_by`), not a sort. Pixels
//! whose dark-channel value ties with the cut-off are picked in unspecified
//! order, so callers must not depend on which tied pixels contribute.
use crate::error::{DehazeError, Result};
use crate::image::{ensure_same_shape, ImageF32, RgbImageF32};
use crate::types::AtmosphericLight;
use log::debug;
use std::cmp::Ordering;

/// Default fraction of pixels used for the estimate.
pub const DEFAULT_RATIO: f32 = 0.0005;

/// Number of candidate pixels for an image of `pixels` pixels:
/// `max(round(pixels · ratio), 1)`, capped at `pixels`.
pub fn candidate_count(pixels: usize, ratio: f32) -> usize {
    let n = (pixels as f64 * ratio as f64).round() as usize;
    n.clamp(1, pixels.max(1))
}

pub fn estimate_atmospheric_light(
    image: &RgbImageF32,
    dark: &ImageF32,
    ratio: f32,
) -> Result<AtmosphericLight> {
    image.ensure_non_empty()?;
    ensure_same_shape(image, dark)?;
    if !(ratio > 0.0 && ratio <= 1.0) {
        return Err(DehazeError::invalid("ratio", ratio, "must lie in (0, 1]"));
    }

    let num = candidate_count(dark.data.len(), ratio);
    let mut order: Vec<usize> = (0..dark.data.len()).collect();
    if num < order.len() {
        order.select_nth_unstable_by(num - 1, |&a, &b| brighter_first(dark.data[a], dark.data[b]));
    }

    let mut sum = [0.0f64; 3];
    for &idx in &order[..num] {
        let px = image.pixel(idx % image.w, idx / image.w);
        for (s, v) in sum.iter_mut().zip(px) {
            *s += v as f64;
        }
    }
    let light = AtmosphericLight(sum.map(|s| (s / num as f64) as f32));
    debug!(
        "atmospheric light from {} of {} pixels: {:?}",
        num,
        dark.data.len(),
        light.0
    );
    Ok(light)
}

/// Descending order; NaN ranks below every number.
fn brighter_first(a: f32, b: f32) -> Ordering {
    b.partial_cmp(&a).unwrap_or_else(|| a.is_nan().cmp(&b.is_nan()))
}
