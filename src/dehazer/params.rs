//! Parameter types configuring the dehazing stages.
//!
//! Every knob has the default used by the classic dark-channel-prior setup.
//! `DehazeParams` deserializes with `#[serde(default)]`, so a JSON file only
//! needs to name the values it changes.

use crate::atmosphere::DEFAULT_RATIO;
use crate::dark_channel::DEFAULT_PATCH;
use crate::error::{DehazeError, Result};
use crate::filters::BorderMode;
use crate::guided_filter::{DEFAULT_EPS, DEFAULT_RADIUS};
use crate::recover::DEFAULT_T0;
use crate::transmission::DEFAULT_OMEGA;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Pipeline-wide parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DehazeParams {
    /// Dark-channel patch size. Larger gives a smoother, coarser dark channel.
    pub patch: usize,
    /// Fraction of haziest pixels averaged into the atmospheric light.
    /// Smaller draws the estimate from fewer, brighter pixels.
    pub ratio: f32,
    /// Haze removal strength in `(0, 1]`. Closer to 1 removes more haze and
    /// risks over-darkening.
    pub omega: f32,
    /// Guided-filter window radius. Larger smooths more.
    pub radius: usize,
    /// Guided-filter regularisation, strictly positive. Smaller follows
    /// guide edges more closely.
    pub eps: f32,
    /// Transmission floor in `(0, 1]`. Lower recovers more and amplifies
    /// noise.
    pub t0: f32,
    /// Border policy of the min and box filters.
    pub border: BorderMode,
}

impl Default for DehazeParams {
    fn default() -> Self {
        Self {
            patch: DEFAULT_PATCH,
            ratio: DEFAULT_RATIO,
            omega: DEFAULT_OMEGA,
            radius: DEFAULT_RADIUS,
            eps: DEFAULT_EPS,
            t0: DEFAULT_T0,
            border: BorderMode::default(),
        }
    }
}

impl DehazeParams {
    /// Check every value against its domain before any stage runs.
    pub fn validate(&self) -> Result<()> {
        if self.patch == 0 {
            return Err(DehazeError::invalid("patch", self.patch, "must be at least 1"));
        }
        if !(self.ratio > 0.0 && self.ratio <= 1.0) {
            return Err(DehazeError::invalid("ratio", self.ratio, "must lie in (0, 1]"));
        }
        if !(self.omega > 0.0 && self.omega <= 1.0) {
            return Err(DehazeError::invalid("omega", self.omega, "must lie in (0, 1]"));
        }
        if self.radius > isize::MAX as usize / 4 {
            return Err(DehazeError::invalid("radius", self.radius, "window too large"));
        }
        if !(self.eps > 0.0 && self.eps.is_finite()) {
            return Err(DehazeError::invalid(
                "eps",
                self.eps,
                "must be finite and strictly positive",
            ));
        }
        if !(self.t0 > 0.0 && self.t0 <= 1.0) {
            return Err(DehazeError::invalid("t0", self.t0, "must lie in (0, 1]"));
        }
        Ok(())
    }

    /// Load parameters from a JSON file; missing fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(|e| DehazeError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&data).map_err(|e| DehazeError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    pub fn with_patch(mut self, patch: usize) -> Self {
        self.patch = patch;
        self
    }

    pub fn with_ratio(mut self, ratio: f32) -> Self {
        self.ratio = ratio;
        self
    }

    pub fn with_omega(mut self, omega: f32) -> Self {
        self.omega = omega;
        self
    }

    pub fn with_guided_filter(mut self, radius: usize, eps: f32) -> Self {
        self.radius = radius;
        self.eps = eps;
        self
    }

    pub fn with_t0(mut self, t0: f32) -> Self {
        self.t0 = t0;
        self
    }

    pub fn with_border(mut self, border: BorderMode) -> Self {
        self.border = border;
        self
    }
}
