use crate::image::RgbImageU8;
use serde::{Deserialize, Serialize};

/// Per-channel intensity of the ambient haze, in the image's channel order
/// and sample scale.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AtmosphericLight(pub [f32; 3]);

impl AtmosphericLight {
    #[inline]
    pub fn channel(&self, c: usize) -> f32 {
        self.0[c]
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }
}

/// Output of a pipeline run without diagnostics.
#[derive(Clone, Debug)]
pub struct DehazeResult {
    pub image: RgbImageU8,
    pub atmospheric_light: AtmosphericLight,
    pub latency_ms: f64,
}
