//! Scene radiance recovery: inverts `I = J·t + A·(1 − t)`.
//!
//! `J = (I − A) / max(t, t0) + A`, with `t` also capped at 1, then clamped to
//! the display range `[0, 255]`. The floor `t0` bounds noise amplification
//! in dense haze; lowering it strengthens the recovery.
use crate::error::{DehazeError, Result};
use crate::image::rgb::CHANNELS;
use crate::image::{ensure_same_shape, ImageF32, RgbImageF32, RgbImageU8};
use crate::types::AtmosphericLight;

/// Default transmission floor.
pub const DEFAULT_T0: f32 = 0.1;

/// Upper end of the display range for recovered samples.
pub const DISPLAY_MAX: f32 = 255.0;

/// Recover the haze-free image as 8-bit samples.
pub fn recover_scene_radiance(
    image: &RgbImageF32,
    transmission: &ImageF32,
    light: AtmosphericLight,
    t0: f32,
) -> Result<RgbImageU8> {
    Ok(recover_scene_radiance_f32(image, transmission, light, t0)?.to_u8())
}

/// Recover the haze-free image, clamped to `[0, 255]` but kept in f32.
pub fn recover_scene_radiance_f32(
    image: &RgbImageF32,
    transmission: &ImageF32,
    light: AtmosphericLight,
    t0: f32,
) -> Result<RgbImageF32> {
    if !(t0 > 0.0 && t0 <= 1.0) {
        return Err(DehazeError::invalid("t0", t0, "must lie in (0, 1]"));
    }
    ensure_same_shape(image, transmission)?;

    let mut data = Vec::with_capacity(image.data.len());
    for (px, &t) in image.data.chunks_exact(CHANNELS).zip(&transmission.data) {
        let t = clamp_transmission(t, t0);
        for (c, &v) in px.iter().enumerate() {
            let a = light.channel(c);
            data.push(((v - a) / t + a).clamp(0.0, DISPLAY_MAX));
        }
    }
    RgbImageF32::from_raw(image.w, image.h, image.order, data)
}

/// Clamp a transmission value into `[t0, 1]`.
#[inline]
pub fn clamp_transmission(t: f32, t0: f32) -> f32 {
    t.clamp(t0, 1.0)
}
