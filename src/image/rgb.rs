//! Owned three-channel f32 image, the working representation of the input.
//!
//! Samples are interleaved per pixel and use the 8-bit scale `[0, 255]` so a
//! decoded byte image converts without rescaling. The channel order is kept
//! alongside the data; the dehazing math ignores it, only the luminance
//! guide needs it.
use super::traits::ImageView;
use super::u8::RgbImageU8;
use crate::error::{DehazeError, Result};
use serde::{Deserialize, Serialize};

/// Number of interleaved samples per pixel.
pub const CHANNELS: usize = 3;

/// Order of the interleaved colour samples.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelOrder {
    #[default]
    Rgb,
    /// Camera order used by OpenCV-style decoders.
    Bgr,
}

impl ChannelOrder {
    /// ITU-R BT.601 luma weights laid out in this channel order.
    pub fn luma_weights(self) -> [f32; 3] {
        match self {
            ChannelOrder::Rgb => [0.299, 0.587, 0.114],
            ChannelOrder::Bgr => [0.114, 0.587, 0.299],
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RgbImageF32 {
    pub w: usize,
    pub h: usize,
    pub order: ChannelOrder,
    /// `w * h * 3` interleaved samples
    pub data: Vec<f32>,
}

impl RgbImageF32 {
    pub fn new(w: usize, h: usize, order: ChannelOrder) -> Self {
        Self {
            w,
            h,
            order,
            data: vec![0.0; w * h * CHANNELS],
        }
    }

    /// Image whose every pixel equals `pixel`.
    pub fn filled(w: usize, h: usize, order: ChannelOrder, pixel: [f32; 3]) -> Self {
        let mut data = Vec::with_capacity(w * h * CHANNELS);
        for _ in 0..w * h {
            data.extend_from_slice(&pixel);
        }
        Self { w, h, order, data }
    }

    pub fn from_raw(w: usize, h: usize, order: ChannelOrder, data: Vec<f32>) -> Result<Self> {
        let expected = w * h * CHANNELS;
        if data.len() != expected {
            return Err(DehazeError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { w, h, order, data })
    }

    /// Widen interleaved 8-bit samples, keeping the `[0, 255]` scale.
    pub fn from_bytes(w: usize, h: usize, order: ChannelOrder, bytes: &[u8]) -> Result<Self> {
        Self::from_raw(w, h, order, bytes.iter().map(|&b| b as f32).collect())
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [f32; 3] {
        let i = (y * self.w + x) * CHANNELS;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, px: [f32; 3]) {
        let i = (y * self.w + x) * CHANNELS;
        self.data[i..i + CHANNELS].copy_from_slice(&px);
    }

    /// Pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = &[f32]> + '_ {
        self.data.chunks_exact(CHANNELS)
    }

    /// Fail with [`DehazeError::EmptyImage`] when there are no pixels.
    pub fn ensure_non_empty(&self) -> Result<()> {
        if self.is_empty() {
            return Err(DehazeError::EmptyImage {
                width: self.w,
                height: self.h,
            });
        }
        Ok(())
    }

    /// Clamp to `[0, 255]` and truncate to 8 bits.
    pub fn to_u8(&self) -> RgbImageU8 {
        RgbImageU8 {
            w: self.w,
            h: self.h,
            order: self.order,
            data: self.data.iter().map(|&v| clamp_to_byte(v)).collect(),
        }
    }
}

/// Display-range clamp followed by an 8-bit cast (NaN maps to 0).
#[inline]
pub fn clamp_to_byte(v: f32) -> u8 {
    v.clamp(0.0, 255.0) as u8
}

impl ImageView for RgbImageF32 {
    type Pixel = f32;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[f32] {
        let len = self.w * CHANNELS;
        &self.data[y * len..(y + 1) * len]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_and_pixels_are_interleaved() {
        let img = RgbImageF32::from_raw(
            2,
            1,
            ChannelOrder::Bgr,
            vec![10.0, 200.0, 30.0, 40.0, 5.0, 60.0],
        )
        .unwrap();
        assert_eq!(img.row(0).len(), 6);
        assert_eq!(img.pixel(1, 0), [40.0, 5.0, 60.0]);
    }

    #[test]
    fn empty_image_is_rejected() {
        let img = RgbImageF32::new(0, 3, ChannelOrder::Rgb);
        assert!(matches!(
            img.ensure_non_empty(),
            Err(DehazeError::EmptyImage {
                width: 0,
                height: 3
            })
        ));
    }

    #[test]
    fn byte_conversion_clamps_and_truncates() {
        let img =
            RgbImageF32::from_raw(1, 1, ChannelOrder::Rgb, vec![-12.0, 99.9, 300.0]).unwrap();
        assert_eq!(img.to_u8().data, vec![0, 99, 255]);
        assert_eq!(clamp_to_byte(f32::NAN), 0);
    }

    #[test]
    fn luma_weights_follow_order() {
        let rgb = ChannelOrder::Rgb.luma_weights();
        let bgr = ChannelOrder::Bgr.luma_weights();
        assert_eq!(rgb[0], bgr[2]);
        assert!((rgb.iter().sum::<f32>() - 1.0).abs() < 1e-6);
    }
}
