//! Coarse transmission estimate `t = 1 − ω · dark_channel(I / A)`.
//!
//! Each channel is normalised by its atmospheric-light component before the
//! dark channel is taken. Components below [`MIN_ATMOSPHERIC_LIGHT`] are
//! raised to it, so a black atmospheric estimate produces a finite (if
//! aggressive) map instead of NaN/∞.
use crate::dark_channel::dark_channel_with_border;
use crate::error::{DehazeError, Result};
use crate::filters::BorderMode;
use crate::image::{ImageF32, RgbImageF32};
use crate::types::AtmosphericLight;
use log::{debug, warn};

/// Default haze-removal strength.
pub const DEFAULT_OMEGA: f32 = 0.95;

/// Floor applied to atmospheric-light components before dividing by them.
pub const MIN_ATMOSPHERIC_LIGHT: f32 = 1e-3;

pub fn estimate_transmission(
    image: &RgbImageF32,
    light: AtmosphericLight,
    omega: f32,
    patch: usize,
) -> Result<ImageF32> {
    estimate_transmission_with_border(image, light, omega, patch, BorderMode::Replicate)
}

pub fn estimate_transmission_with_border(
    image: &RgbImageF32,
    light: AtmosphericLight,
    omega: f32,
    patch: usize,
    border: BorderMode,
) -> Result<ImageF32> {
    if !(omega > 0.0 && omega <= 1.0) {
        return Err(DehazeError::invalid("omega", omega, "must lie in (0, 1]"));
    }
    if !light.is_finite() {
        return Err(DehazeError::invalid(
            "atmospheric_light",
            format!("{:?}", light.0),
            "components must be finite",
        ));
    }

    let divisor = light.0.map(|a| a.max(MIN_ATMOSPHERIC_LIGHT));
    if divisor != light.0 {
        warn!(
            "atmospheric light {:?} below {}, clamped to {:?}",
            light.0, MIN_ATMOSPHERIC_LIGHT, divisor
        );
    }

    let mut normalized = image.clone();
    for px in normalized.data.chunks_exact_mut(3) {
        for (v, a) in px.iter_mut().zip(divisor) {
            *v /= a;
        }
    }

    let dark = dark_channel_with_border(&normalized, patch, border)?;
    let t = dark.map(|d| 1.0 - omega * d);
    if let Some((lo, hi)) = t.min_max() {
        debug!("coarse transmission range [{lo:.4}, {hi:.4}] omega={omega}");
    }
    Ok(t)
}
