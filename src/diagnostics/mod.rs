//! Diagnostics data model returned next to the recovered image.
//!
//! `DehazeReport` bundles the 8-bit output, the intermediate maps and a
//! serializable `PipelineTrace` with per-stage timings and map statistics.

pub mod maps;
pub mod pipeline;
pub mod timing;

pub use maps::{floored_fraction, MapStats};
pub use pipeline::{DehazeReport, InputDescriptor, PipelineTrace, StageMaps};
pub use timing::{StageTiming, TimingBreakdown};
