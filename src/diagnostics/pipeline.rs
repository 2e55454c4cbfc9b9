use super::maps::MapStats;
use super::timing::TimingBreakdown;
use crate::dehazer::DehazeParams;
use crate::image::{ChannelOrder, ImageF32, RgbImageU8};
use crate::types::AtmosphericLight;
use serde::Serialize;

/// Result produced by [`Dehazer::process_with_diagnostics`](crate::Dehazer).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DehazeReport {
    #[serde(skip)]
    pub image: RgbImageU8,
    #[serde(skip)]
    pub maps: StageMaps,
    pub trace: PipelineTrace,
}

/// Intermediate grids of one run, kept for inspection and dumps.
#[derive(Clone, Debug)]
pub struct StageMaps {
    pub guide: ImageF32,
    pub dark_channel: ImageF32,
    pub coarse_transmission: ImageF32,
    pub refined_transmission: ImageF32,
}

/// End-to-end trace of one pipeline run.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineTrace {
    pub input: InputDescriptor,
    pub params: DehazeParams,
    pub timings: TimingBreakdown,
    pub atmospheric_light: AtmosphericLight,
    pub dark_channel: MapStats,
    pub coarse_transmission: MapStats,
    pub refined_transmission: MapStats,
    /// Share of pixels whose refined transmission hit the `t0` floor.
    pub floored_fraction: f32,
    pub guide_supplied: bool,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    pub channel_order: ChannelOrder,
}
