//! Pipeline driving dehazing end-to-end.
//!
//! Typical usage:
//! ```no_run
//! use dcp_dehaze::image::io::load_rgb_image;
//! use dcp_dehaze::{DehazeParams, Dehazer};
//! use std::path::Path;
//!
//! # fn example() -> dcp_dehaze::Result<()> {
//! let hazy = load_rgb_image(Path::new("hazy.png"))?;
//! let dehazer = Dehazer::new(DehazeParams::default());
//! let report = dehazer.process_with_diagnostics(&hazy)?;
//! println!("A = {:?}", report.trace.atmospheric_light);
//! # Ok(())
//! # }
//! ```
use super::params::DehazeParams;
use crate::atmosphere::estimate_atmospheric_light;
use crate::dark_channel::dark_channel_with_border;
use crate::diagnostics::{
    floored_fraction, timing::elapsed_ms, DehazeReport, InputDescriptor, MapStats,
    PipelineTrace, StageMaps, TimingBreakdown,
};
use crate::error::Result;
use crate::guided_filter::{guided_filter_with_border, luminance_guide};
use crate::image::{ensure_same_shape, ImageF32, RgbImageF32, RgbImageU8};
use crate::recover::recover_scene_radiance;
use crate::transmission::estimate_transmission_with_border;
use crate::types::DehazeResult;
use log::debug;
use std::time::Instant;

/// Dark-channel-prior dehazer. Holds only parameters; every call is
/// independent of the previous ones.
#[derive(Clone, Debug, Default)]
pub struct Dehazer {
    params: DehazeParams,
}

impl Dehazer {
    pub fn new(params: DehazeParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &DehazeParams {
        &self.params
    }

    /// Dehaze with a luminance guide derived from the input.
    pub fn process(&self, image: &RgbImageF32) -> Result<DehazeResult> {
        let report = self.run(image, None)?;
        Ok(report.into_result())
    }

    /// Dehaze using a caller-supplied grayscale guide of the same size.
    pub fn process_with_guide(
        &self,
        image: &RgbImageF32,
        guide: &ImageF32,
    ) -> Result<DehazeResult> {
        let report = self.run(image, Some(guide))?;
        Ok(report.into_result())
    }

    /// Run the pipeline and return the image, intermediate maps and trace.
    pub fn process_with_diagnostics(&self, image: &RgbImageF32) -> Result<DehazeReport> {
        self.run(image, None)
    }

    pub fn process_with_diagnostics_and_guide(
        &self,
        image: &RgbImageF32,
        guide: &ImageF32,
    ) -> Result<DehazeReport> {
        self.run(image, Some(guide))
    }

    fn run(&self, image: &RgbImageF32, guide: Option<&ImageF32>) -> Result<DehazeReport> {
        let p = &self.params;
        p.validate()?;
        image.ensure_non_empty()?;
        if let Some(guide) = guide {
            ensure_same_shape(image, guide)?;
        }
        debug!(
            "Dehazer::process start w={} h={} patch={} ratio={} omega={} r={} eps={:e} t0={}",
            image.w, image.h, p.patch, p.ratio, p.omega, p.radius, p.eps, p.t0
        );
        let total_start = Instant::now();
        let mut timings = TimingBreakdown::default();

        let guide_supplied = guide.is_some();
        let guide = match guide {
            Some(g) => g.clone(),
            None => timings.time("guide", || luminance_guide(image)),
        };
        let dark = timings.time("darkChannel", || {
            dark_channel_with_border(image, p.patch, p.border)
        })?;
        let light = timings.time("atmosphericLight", || {
            estimate_atmospheric_light(image, &dark, p.ratio)
        })?;
        let coarse = timings.time("transmission", || {
            estimate_transmission_with_border(image, light, p.omega, p.patch, p.border)
        })?;
        let refined = timings.time("guidedFilter", || {
            guided_filter_with_border(&coarse, &guide, p.radius, p.eps, p.border)
        })?;
        let recovered = timings.time("recover", || {
            recover_scene_radiance(image, &refined, light, p.t0)
        })?;
        timings.total_ms = elapsed_ms(total_start);

        for stage in &timings.stages {
            debug!("  {:<18} {:>8.2} ms", stage.label, stage.elapsed_ms);
        }
        debug!(
            "Dehazer::process done A={:?} total={:.2} ms",
            light.0, timings.total_ms
        );

        let trace = PipelineTrace {
            input: InputDescriptor {
                width: image.w,
                height: image.h,
                channel_order: image.order,
            },
            params: p.clone(),
            timings,
            atmospheric_light: light,
            dark_channel: MapStats::from_map(&dark),
            coarse_transmission: MapStats::from_map(&coarse),
            refined_transmission: MapStats::from_map(&refined),
            floored_fraction: floored_fraction(&refined, p.t0),
            guide_supplied,
        };
        Ok(DehazeReport {
            image: recovered,
            maps: StageMaps {
                guide,
                dark_channel: dark,
                coarse_transmission: coarse,
                refined_transmission: refined,
            },
            trace,
        })
    }
}

impl DehazeReport {
    fn into_result(self) -> DehazeResult {
        DehazeResult {
            image: self.image,
            atmospheric_light: self.trace.atmospheric_light,
            latency_ms: self.trace.timings.total_ms,
        }
    }
}

/// Dehaze `image` with `params` and a luminance guide.
pub fn dehaze(image: &RgbImageF32, params: &DehazeParams) -> Result<RgbImageU8> {
    Ok(Dehazer::new(params.clone()).process(image)?.image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DehazeError;
    use crate::image::ChannelOrder;

    fn hazy_scene(w: usize, h: usize) -> RgbImageF32 {
        let mut img = RgbImageF32::new(w, h, ChannelOrder::Rgb);
        for y in 0..h {
            for x in 0..w {
                let haze = 120.0 + 100.0 * y as f32 / h as f32;
                let texture = if (x / 4 + y / 4) % 2 == 0 { 30.0 } else { 0.0 };
                img.set_pixel(x, y, [haze - texture, haze - texture * 0.5, haze]);
            }
        }
        img
    }

    fn small_params() -> DehazeParams {
        DehazeParams::default()
            .with_patch(5)
            .with_ratio(0.01)
            .with_guided_filter(4, 1e-3)
    }

    #[test]
    fn report_covers_every_stage() {
        let img = hazy_scene(32, 24);
        let report = Dehazer::new(small_params())
            .process_with_diagnostics(&img)
            .unwrap();
        let labels: Vec<&str> = report
            .trace
            .timings
            .stages
            .iter()
            .map(|s| s.label.as_str())
            .collect();
        assert_eq!(
            labels,
            [
                "guide",
                "darkChannel",
                "atmosphericLight",
                "transmission",
                "guidedFilter",
                "recover"
            ]
        );
        assert_eq!(report.image.w, 32);
        assert_eq!(report.image.h, 24);
        assert_eq!(report.maps.refined_transmission.w, 32);
        assert!(!report.trace.guide_supplied);
        assert!(report.trace.coarse_transmission.max <= 1.0 + 1e-6);
        assert!((0.0..=1.0).contains(&report.trace.floored_fraction));
    }

    #[test]
    fn process_matches_diagnostics_run() {
        let img = hazy_scene(20, 20);
        let dehazer = Dehazer::new(small_params());
        let plain = dehazer.process(&img).unwrap();
        let report = dehazer.process_with_diagnostics(&img).unwrap();
        assert_eq!(plain.image, report.image);
        assert_eq!(plain.atmospheric_light, report.trace.atmospheric_light);
        assert_eq!(dehaze(&img, dehazer.params()).unwrap(), plain.image);
    }

    #[test]
    fn explicit_luminance_guide_matches_derived_one() {
        let img = hazy_scene(16, 12);
        let dehazer = Dehazer::new(small_params());
        let derived = dehazer.process(&img).unwrap();
        let guided = dehazer
            .process_with_guide(&img, &luminance_guide(&img))
            .unwrap();
        assert_eq!(derived.image, guided.image);
    }

    #[test]
    fn rejects_invalid_params_before_running() {
        let img = hazy_scene(8, 8);
        let err = Dehazer::new(small_params().with_t0(0.0))
            .process(&img)
            .unwrap_err();
        assert!(matches!(err, DehazeError::InvalidParameter { name: "t0", .. }));
        let err = Dehazer::new(small_params())
            .process(&RgbImageF32::new(0, 3, ChannelOrder::Rgb))
            .unwrap_err();
        assert!(matches!(err, DehazeError::EmptyImage { .. }));
    }

    #[test]
    fn mismatched_guide_is_rejected() {
        let img = hazy_scene(8, 8);
        let err = Dehazer::new(small_params())
            .process_with_guide(&img, &ImageF32::filled(8, 7, 100.0))
            .unwrap_err();
        assert!(matches!(err, DehazeError::ShapeMismatch { .. }));
    }
}
