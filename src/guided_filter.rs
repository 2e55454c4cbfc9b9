//! Edge-aware refinement of the transmission map (guided filter).
//!
//! Fits, in every `(2r + 1)²` window, a linear model `q = a·I + b` of the
//! input `p` against the guide `I`, then averages the coefficients of all
//! windows covering a pixel:
//!
//! ```text
//! cov_Ip = mean(I·p) − mean(I)·mean(p)
//! var_I  = mean(I·I) − mean(I)²
//! a      = cov_Ip / (var_I + ε)
//! b      = mean(p) − a·mean(I)
//! q      = mean(a)·I + mean(b)
//! ```
//!
//! All window means come from the shared box filter. The statistics are
//! formed in `f64`: with a guide on the `[0, 255]` scale and `ε ≈ 1e-6`,
//! `f32` cancellation in `cov_Ip` is enough to produce large spurious `a` in
//! flat regions.
//!
//! A flat guide gives `var_I = 0`, hence `a = 0` and `q = mean(mean(p))`, a
//! pure local average.
use crate::error::{DehazeError, Result};
use crate::filters::{reduce_window, BorderMode, MeanReduction, Window};
use crate::image::{ensure_same_shape, ImageF32, ImageView, RgbImageF32};
use log::debug;

pub const DEFAULT_RADIUS: usize = 60;
pub const DEFAULT_EPS: f32 = 1e-6;

/// Guided filter with replicated borders.
pub fn guided_filter(p: &ImageF32, guide: &ImageF32, radius: usize, eps: f32) -> Result<ImageF32> {
    guided_filter_with_border(p, guide, radius, eps, BorderMode::Replicate)
}

pub fn guided_filter_with_border(
    p: &ImageF32,
    guide: &ImageF32,
    radius: usize,
    eps: f32,
    border: BorderMode,
) -> Result<ImageF32> {
    if !(eps > 0.0 && eps.is_finite()) {
        return Err(DehazeError::invalid("eps", eps, "must be finite and strictly positive"));
    }
    ensure_same_shape(p, guide)?;

    let (w, h) = p.dims();
    let window = Window::radius(radius);
    let mean = |data: &[f64]| reduce_window(data, w, h, window, window, border, &MeanReduction);

    let i: Vec<f64> = guide.data.iter().map(|&v| v as f64).collect();
    let pv: Vec<f64> = p.data.iter().map(|&v| v as f64).collect();
    let ip: Vec<f64> = i.iter().zip(&pv).map(|(a, b)| a * b).collect();
    let ii: Vec<f64> = i.iter().map(|a| a * a).collect();

    let mean_i = mean(&i);
    let mean_p = mean(&pv);
    let mean_ip = mean(&ip);
    let mean_ii = mean(&ii);

    let eps = eps as f64;
    let mut a = Vec::with_capacity(i.len());
    let mut b = Vec::with_capacity(i.len());
    for k in 0..i.len() {
        let cov = mean_ip[k] - mean_i[k] * mean_p[k];
        // rounding can push a true zero variance slightly negative
        let var = (mean_ii[k] - mean_i[k] * mean_i[k]).max(0.0);
        let ak = cov / (var + eps);
        a.push(ak);
        b.push(mean_p[k] - ak * mean_i[k]);
    }

    let mean_a = mean(&a);
    let mean_b = mean(&b);
    let data = mean_a
        .iter()
        .zip(&mean_b)
        .zip(&i)
        .map(|((ma, mb), gi)| (ma * gi + mb) as f32)
        .collect();
    debug!("guided filter {}x{} r={} eps={:e}", w, h, radius, eps);
    ImageF32::from_raw(w, h, data)
}

/// Grayscale guide from the input colour image (BT.601 luma, channel-order
/// aware, `[0, 255]` scale).
pub fn luminance_guide(image: &RgbImageF32) -> ImageF32 {
    let [wa, wb, wc] = image.order.luma_weights();
    ImageF32 {
        w: image.w,
        h: image.h,
        data: image
            .pixels()
            .map(|px| wa * px[0] + wb * px[1] + wc * px[2])
            .collect(),
    }
}
