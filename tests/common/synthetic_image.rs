use dcp_dehaze::image::{ChannelOrder, RgbImageF32};

/// Uniform image with every sample set to `value`.
pub fn uniform_gray(width: usize, height: usize, value: f32) -> RgbImageF32 {
    RgbImageF32::filled(width, height, ChannelOrder::Rgb, [value; 3])
}

/// Clear-scene checkerboard of two saturated-ish colours.
pub fn checkerboard_scene(width: usize, height: usize, cell: usize) -> RgbImageF32 {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(cell > 0, "cell size must be positive");

    let mut img = RgbImageF32::new(width, height, ChannelOrder::Rgb);
    for y in 0..height {
        for x in 0..width {
            let px = if (x / cell + y / cell) & 1 == 0 {
                [30.0, 50.0, 40.0]
            } else {
                [150.0, 90.0, 60.0]
            };
            img.set_pixel(x, y, px);
        }
    }
    img
}

/// Applies the haze model `I = J·t + A·(1 − t)` with uniform `t`. The top
/// `sky_rows` rows are replaced by the airlight itself.
pub fn add_haze(clear: &RgbImageF32, airlight: [f32; 3], t: f32, sky_rows: usize) -> RgbImageF32 {
    let mut hazy = clear.clone();
    for y in 0..clear.h {
        for x in 0..clear.w {
            let px = if y < sky_rows {
                airlight
            } else {
                let j = clear.pixel(x, y);
                [0, 1, 2].map(|c| j[c] * t + airlight[c] * (1.0 - t))
            };
            hazy.set_pixel(x, y, px);
        }
    }
    hazy
}

/// Mean and standard deviation of BT.601 luma over rows `y0..y1`.
pub fn luma_stats<F: Fn(usize, usize) -> [f32; 3]>(
    width: usize,
    rows: std::ops::Range<usize>,
    pixel: F,
) -> (f64, f64) {
    let mut values = Vec::new();
    for y in rows {
        for x in 0..width {
            let [r, g, b] = pixel(x, y);
            values.push(0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64);
        }
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, var.sqrt())
}
