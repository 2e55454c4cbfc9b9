#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod dehazer;
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod types;

// Individual stages. Public so tools can run or inspect one stage at a time.
pub mod atmosphere;
pub mod dark_channel;
pub mod filters;
pub mod guided_filter;
pub mod recover;
pub mod transmission;

// --- High-level re-exports -------------------------------------------------

// Main entry points: dehazer + results.
pub use crate::dehazer::{dehaze, DehazeParams, Dehazer};
pub use crate::error::{DehazeError, Result};
pub use crate::types::{AtmosphericLight, DehazeResult};

// High-level diagnostics returned by the dehazer.
pub use crate::diagnostics::{DehazeReport, PipelineTrace};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use dcp_dehaze::prelude::*;
///
/// # fn main() -> dcp_dehaze::Result<()> {
/// let (w, h) = (64usize, 48usize);
/// let bytes = vec![180u8; w * h * 3];
/// let img = RgbImageF32::from_bytes(w, h, ChannelOrder::Rgb, &bytes)?;
///
/// let dehazer = Dehazer::new(DehazeParams {
///     radius: 8,
///     ..Default::default()
/// });
///
/// let res = dehazer.process(&img)?;
/// println!("A={:?} latency_ms={:.3}", res.atmospheric_light, res.latency_ms);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{ChannelOrder, ImageF32, RgbImageF32, RgbImageU8};
    pub use crate::{DehazeParams, DehazeResult, Dehazer};
}

// --- Stage-level API (for tools & advanced users) --------------------------

pub mod stages {
    // Stage functions in pipeline order.
    pub use crate::atmosphere::estimate_atmospheric_light;
    pub use crate::dark_channel::{channel_min, dark_channel, dark_channel_with_border};
    pub use crate::guided_filter::{guided_filter, guided_filter_with_border, luminance_guide};
    pub use crate::recover::{recover_scene_radiance, recover_scene_radiance_f32};
    pub use crate::transmission::{estimate_transmission, estimate_transmission_with_border};

    // Structured diagnostics types.
    pub use crate::diagnostics::{
        InputDescriptor, MapStats, StageMaps, StageTiming, TimingBreakdown,
    };
}
