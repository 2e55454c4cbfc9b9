mod common;

use approx::assert_abs_diff_eq;
use common::synthetic_image::{add_haze, checkerboard_scene, luma_stats, uniform_gray};
use dcp_dehaze::image::{ChannelOrder, ImageF32, RgbImageF32};
use dcp_dehaze::stages::{dark_channel, estimate_transmission};
use dcp_dehaze::{dehaze, AtmosphericLight, DehazeError, DehazeParams, Dehazer};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn uniform_gray_passes_through_unchanged() {
    init_logger();
    let image = uniform_gray(4, 4, 100.0);
    let params = DehazeParams::default()
        .with_patch(3)
        .with_ratio(1.0)
        .with_omega(0.95)
        .with_t0(0.1);
    let report = Dehazer::new(params).process_with_diagnostics(&image).unwrap();

    assert!(report.maps.dark_channel.data.iter().all(|&d| d == 100.0));
    assert_eq!(report.trace.atmospheric_light, AtmosphericLight([100.0; 3]));
    for &t in &report.maps.coarse_transmission.data {
        assert_abs_diff_eq!(t, 0.05, epsilon = 1e-6);
    }
    for &t in &report.maps.refined_transmission.data {
        assert_abs_diff_eq!(t, 0.05, epsilon = 1e-5);
    }
    assert_eq!(report.trace.floored_fraction, 1.0);
    assert!(report.image.data.iter().all(|&v| v == 100));
}

#[test]
fn haze_removal_restores_contrast() {
    init_logger();
    let (w, h, sky) = (64usize, 64usize, 12usize);
    let airlight = [220.0, 225.0, 230.0];
    let hazy = add_haze(&checkerboard_scene(w, h, 8), airlight, 0.5, sky);

    let params = DehazeParams::default().with_guided_filter(8, 1e-3);
    let res = Dehazer::new(params).process(&hazy).unwrap();

    // the sky is the haziest region, so the estimate lands on the airlight
    for c in 0..3 {
        assert_abs_diff_eq!(res.atmospheric_light.channel(c), airlight[c], epsilon = 1.0);
    }

    let ground = sky + 16..h;
    let (hazy_mean, hazy_std) = luma_stats(w, ground.clone(), |x, y| hazy.pixel(x, y));
    let (out_mean, out_std) = luma_stats(w, ground, |x, y| res.image.pixel(x, y).map(f32::from));
    assert!(out_mean < hazy_mean, "{out_mean} !< {hazy_mean}");
    assert!(out_std > 1.3 * hazy_std, "{out_std} vs {hazy_std}");
}

#[test]
fn bgr_input_keeps_its_channel_order() {
    let clear = checkerboard_scene(24, 24, 6);
    let hazy = add_haze(&clear, [200.0; 3], 0.6, 4);
    let mut bgr_data = Vec::with_capacity(hazy.data.len());
    for px in hazy.data.chunks_exact(3) {
        bgr_data.extend_from_slice(&[px[2], px[1], px[0]]);
    }
    let bgr = RgbImageF32::from_raw(24, 24, ChannelOrder::Bgr, bgr_data).unwrap();

    let params = DehazeParams::default().with_patch(5).with_guided_filter(4, 1e-3);
    let rgb_out = dehaze(&hazy, &params).unwrap();
    let bgr_out = dehaze(&bgr, &params).unwrap();
    assert_eq!(bgr_out.order, ChannelOrder::Bgr);
    assert_eq!(rgb_out.to_rgb_bytes(), bgr_out.to_rgb_bytes());
}

#[test]
fn oversized_patch_degenerates_to_global_minimum() {
    let data = (0..5 * 4 * 3).map(|i| 40.0 + ((i * 37) % 150) as f32).collect();
    let image = RgbImageF32::from_raw(5, 4, ChannelOrder::Rgb, data).unwrap();
    let global_min = image.data.iter().cloned().fold(f32::INFINITY, f32::min);

    let dark = dark_channel(&image, 31).unwrap();
    assert!(dark.data.iter().all(|&d| d == global_min));

    let params = DehazeParams::default().with_patch(31);
    assert!(Dehazer::new(params).process(&image).is_ok());
}

#[test]
fn unbounded_patch_runs_the_whole_pipeline() {
    let image = checkerboard_scene(4, 3, 1);
    let global_min = image.data.iter().cloned().fold(f32::INFINITY, f32::min);
    let params = DehazeParams::default().with_patch(usize::MAX);

    let report = Dehazer::new(params).process_with_diagnostics(&image).unwrap();
    assert!(report.maps.dark_channel.data.iter().all(|&d| d == global_min));
    assert!(report.maps.refined_transmission.data.iter().all(|t| t.is_finite()));
}

#[test]
fn black_image_stays_finite() {
    init_logger();
    let image = uniform_gray(6, 6, 0.0);
    let t = estimate_transmission(&image, AtmosphericLight([0.0; 3]), 0.95, 3).unwrap();
    assert!(t.data.iter().all(|v| v.is_finite()));

    let report = Dehazer::new(DehazeParams::default().with_patch(3))
        .process_with_diagnostics(&image)
        .unwrap();
    assert!(report.maps.refined_transmission.data.iter().all(|v| v.is_finite()));
    assert!(report.image.data.iter().all(|&v| v == 0));
}

#[test]
fn out_of_domain_parameters_are_rejected() {
    let image = uniform_gray(4, 4, 80.0);
    let cases = [
        ("eps", DehazeParams::default().with_guided_filter(4, 0.0)),
        ("patch", DehazeParams::default().with_patch(0)),
        ("omega", DehazeParams::default().with_omega(0.0)),
        ("t0", DehazeParams::default().with_t0(0.0)),
        ("ratio", DehazeParams::default().with_ratio(0.0)),
    ];
    for (expected, params) in cases {
        match dehaze(&image, &params) {
            Err(DehazeError::InvalidParameter { name, .. }) => assert_eq!(name, expected),
            other => panic!("{expected}: unexpected {other:?}"),
        }
    }
}

#[test]
fn guide_must_match_image_shape() {
    let image = uniform_gray(8, 6, 120.0);
    let err = Dehazer::default()
        .process_with_guide(&image, &ImageF32::filled(6, 8, 120.0))
        .unwrap_err();
    assert!(matches!(err, DehazeError::ShapeMismatch { .. }));

    let ok = Dehazer::new(DehazeParams::default().with_patch(3))
        .process_with_guide(&image, &ImageF32::filled(8, 6, 120.0))
        .unwrap();
    assert_eq!((ok.image.w, ok.image.h), (8, 6));
}

#[test]
fn params_load_from_partial_json() {
    let dir = std::env::temp_dir().join(format!("dcp_dehaze_e2e_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("params.json");
    std::fs::write(&path, r#"{ "patch": 7, "border": "truncate" }"#).unwrap();

    let params = DehazeParams::from_json_file(&path).unwrap();
    assert_eq!(params.patch, 7);
    assert_eq!(params.radius, DehazeParams::default().radius);
    assert!(params.validate().is_ok());

    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(
        DehazeParams::from_json_file(&path),
        Err(DehazeError::Config { .. })
    ));
}
