pub mod f32;
pub mod io;
pub mod rgb;
pub mod traits;
pub mod u8;

pub use self::f32::ImageF32;
pub use self::rgb::{ChannelOrder, RgbImageF32};
pub use self::traits::{ImageView, Rows};
pub use self::u8::RgbImageU8;

use crate::error::{DehazeError, Result};

/// Fail unless `actual` has the same width and height as `expected`.
pub fn ensure_same_shape(expected: &impl ImageView, actual: &impl ImageView) -> Result<()> {
    if expected.dims() != actual.dims() {
        return Err(DehazeError::ShapeMismatch {
            expected: expected.dims(),
            actual: actual.dims(),
        });
    }
    Ok(())
}
