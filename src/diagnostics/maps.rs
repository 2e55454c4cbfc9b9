use crate::image::ImageF32;
use serde::{Deserialize, Serialize};

/// Summary statistics of a single-channel map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapStats {
    pub min: f32,
    pub max: f32,
    pub mean: f32,
}

impl MapStats {
    /// Statistics of `map`; all zero for an empty map.
    pub fn from_map(map: &ImageF32) -> Self {
        match (map.min_max(), map.mean()) {
            (Some((min, max)), Some(mean)) => Self { min, max, mean },
            _ => Self::default(),
        }
    }
}

/// Fraction of transmission samples at or below the floor `t0`.
pub fn floored_fraction(transmission: &ImageF32, t0: f32) -> f32 {
    if transmission.data.is_empty() {
        return 0.0;
    }
    let floored = transmission.data.iter().filter(|&&t| t <= t0).count();
    floored as f32 / transmission.data.len() as f32
}
