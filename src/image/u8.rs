use super::rgb::{ChannelOrder, CHANNELS};
use crate::error::{DehazeError, Result};

/// Owned 8-bit three-channel image; the display-range output of recovery.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbImageU8 {
    pub w: usize,
    pub h: usize,
    pub order: ChannelOrder,
    pub data: Vec<u8>, // w * h * 3, interleaved
}

impl RgbImageU8 {
    pub fn from_raw(w: usize, h: usize, order: ChannelOrder, data: Vec<u8>) -> Result<Self> {
        let expected = w * h * CHANNELS;
        if data.len() != expected {
            return Err(DehazeError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { w, h, order, data })
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let i = (y * self.w + x) * CHANNELS;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Samples reordered to RGB, ready for an encoder.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        match self.order {
            ChannelOrder::Rgb => self.data.clone(),
            ChannelOrder::Bgr => self
                .data
                .chunks_exact(CHANNELS)
                .flat_map(|px| [px[2], px[1], px[0]])
                .collect(),
        }
    }
}
