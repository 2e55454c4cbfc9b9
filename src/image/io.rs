//! I/O helpers around the `image` codecs and JSON.
//!
//! - `load_rgb_image`: decode a PNG/JPEG/etc. into an `RgbImageF32` on the
//!   `[0, 255]` scale.
//! - `load_grayscale_image`: decode into an `ImageF32` guide.
//! - `save_rgb_u8`: encode the recovered image.
//! - `save_grayscale_f32`: dump a single-channel map (dark channel,
//!   transmission) after scaling.
//! - `write_json_file`: pretty-print a serializable value to disk.
//!
//! Any failure to read or decode an input is reported as
//! [`DehazeError::UnreadableInput`] before the pipeline runs.
use super::{ChannelOrder, ImageF32, ImageView, RgbImageF32, RgbImageU8};
use crate::error::{DehazeError, Result};
use image::{GrayImage, Luma, RgbImage};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Decode an image file into RGB order.
pub fn load_rgb_image(path: &Path) -> Result<RgbImageF32> {
    check_readable(path)?;
    let img = image::open(path)
        .map_err(|e| DehazeError::unreadable(path, e))?
        .into_rgb8();
    let (w, h) = (img.width() as usize, img.height() as usize);
    let image = RgbImageF32::from_bytes(w, h, ChannelOrder::Rgb, img.as_raw())?;
    log::debug!("loaded {} ({}x{})", path.display(), w, h);
    Ok(image)
}

/// Decode an image file and convert to 8-bit luma, widened to f32.
pub fn load_grayscale_image(path: &Path) -> Result<ImageF32> {
    check_readable(path)?;
    let img = image::open(path)
        .map_err(|e| DehazeError::unreadable(path, e))?
        .into_luma8();
    ImageF32::from_gray_bytes(img.width() as usize, img.height() as usize, img.as_raw())
}

/// Encode an 8-bit colour image; the format follows the file extension.
pub fn save_rgb_u8(image: &RgbImageU8, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let buffer = RgbImage::from_raw(image.w as u32, image.h as u32, image.to_rgb_bytes())
        .ok_or_else(|| DehazeError::output(path, "image buffer does not match dimensions"))?;
    buffer
        .save(path)
        .map_err(|e| DehazeError::output(path, e))
}

/// Save a single-channel map as grayscale, multiplying by `scale` and
/// clamping to `[0, 255]`. Use `scale = 255.0` for maps in `[0, 1]`.
pub fn save_grayscale_f32(image: &ImageF32, scale: f32, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let mut out = GrayImage::new(image.w as u32, image.h as u32);
    for (y, row) in image.rows().enumerate() {
        for (x, &px) in row.iter().enumerate() {
            let v = (px * scale).clamp(0.0, 255.0);
            out.put_pixel(x as u32, y as u32, Luma([v as u8]));
        }
    }
    out.save(path).map_err(|e| DehazeError::output(path, e))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value).map_err(|e| DehazeError::output(path, e))?;
    fs::write(path, json).map_err(|e| DehazeError::output(path, e))
}

/// Reject paths that cannot possibly decode: missing, not a regular file, or
/// zero bytes long.
fn check_readable(path: &Path) -> Result<()> {
    let meta = fs::metadata(path).map_err(|e| DehazeError::unreadable(path, e))?;
    if !meta.is_file() {
        return Err(DehazeError::unreadable(path, "not a regular file"));
    }
    if meta.len() == 0 {
        return Err(DehazeError::unreadable(path, "file is empty"));
    }
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| DehazeError::output(parent, e))?;
        }
    }
    Ok(())
}
