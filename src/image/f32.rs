//! Owned single-channel f32 grid in row-major layout.
//!
//! Carries the dark channel, the transmission maps, the guide and every
//! intermediate of the guided filter. Samples keep whatever scale the
//! producer chose (the guide and dark channel of the input use `[0, 255]`,
//! transmission maps use `[0, 1]`).
use super::traits::ImageView;
use crate::error::{DehazeError, Result};

#[derive(Clone, Debug, PartialEq)]
pub struct ImageF32 {
    /// Width in pixels
    pub w: usize,
    /// Height in pixels
    pub h: usize,
    /// Backing storage, `w * h` samples
    pub data: Vec<f32>,
}

impl ImageF32 {
    /// Zero-initialised grid of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self::filled(w, h, 0.0)
    }

    /// Grid of size `w × h` with every sample set to `value`.
    pub fn filled(w: usize, h: usize, value: f32) -> Self {
        Self {
            w,
            h,
            data: vec![value; w * h],
        }
    }

    /// Wrap an existing buffer; its length must equal `w * h`.
    pub fn from_raw(w: usize, h: usize, data: Vec<f32>) -> Result<Self> {
        if data.len() != w * h {
            return Err(DehazeError::BufferSize {
                expected: w * h,
                actual: data.len(),
            });
        }
        Ok(Self { w, h, data })
    }

    /// Widen tightly packed 8-bit gray samples without rescaling, so values
    /// stay in `[0, 255]`.
    pub fn from_gray_bytes(w: usize, h: usize, bytes: &[u8]) -> Result<Self> {
        if bytes.len() != w * h {
            return Err(DehazeError::BufferSize {
                expected: w * h,
                actual: bytes.len(),
            });
        }
        Ok(Self {
            w,
            h,
            data: bytes.iter().map(|&b| b as f32).collect(),
        })
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[self.idx(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: f32) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    /// Apply `f` to every sample, producing a new grid.
    pub fn map(&self, f: impl Fn(f32) -> f32) -> Self {
        Self {
            w: self.w,
            h: self.h,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Smallest and largest sample, `None` for an empty grid.
    pub fn min_max(&self) -> Option<(f32, f32)> {
        let mut it = self.data.iter().copied();
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }

    pub fn mean(&self) -> Option<f32> {
        if self.data.is_empty() {
            return None;
        }
        let sum: f64 = self.data.iter().map(|&v| v as f64).sum();
        Some((sum / self.data.len() as f64) as f32)
    }
}

impl ImageView for ImageF32 {
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
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_rejects_wrong_length() {
        let err = ImageF32::from_raw(3, 2, vec![0.0; 5]).unwrap_err();
        assert!(matches!(
            err,
            DehazeError::BufferSize {
                expected: 6,
                actual: 5
            }
        ));
    }

    #[test]
    fn stats_cover_all_samples() {
        let img = ImageF32::from_raw(2, 2, vec![0.5, -1.0, 2.0, 0.5]).unwrap();
        assert_eq!(img.min_max(), Some((-1.0, 2.0)));
        assert_eq!(img.mean(), Some(0.5));
        assert_eq!(ImageF32::new(0, 4).min_max(), None);
    }

    #[test]
    fn widening_keeps_byte_scale() {
        let img = ImageF32::from_gray_bytes(2, 2, &[0, 128, 255, 7]).unwrap();
        assert_eq!(img.data, vec![0.0, 128.0, 255.0, 7.0]);
        assert!(ImageF32::from_gray_bytes(2, 2, &[0; 3]).is_err());
    }
}
