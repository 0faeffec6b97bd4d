//! # Output Module
//!
//! Writes rendered HDR buffers to disk. The format follows the file extension:
//! - `.png`: values clamped to [0, 1], sRGB gamma encoded, 8 bits per channel
//! - `.exr`: linear 32-bit floats, untouched

use std::path::Path;

use exr::prelude::write_rgb_file;
use image::{ImageBuffer, Rgb};
use log::info;
use thiserror::Error;

use crate::interval::Interval;

/// Linear HDR image produced by the renderer.
pub type HdrImage = ImageBuffer<Rgb<f32>, Vec<f32>>;

/// Failures while writing an image.
#[derive(Debug, Error)]
pub enum OutputError {
    /// The extension names neither PNG nor EXR.
    #[error("unsupported file extension '{0}', only .png and .exr are supported")]
    UnsupportedExtension(String),
    /// PNG encoding or file I/O failed.
    #[error("failed to save PNG image: {0}")]
    Png(#[from] image::ImageError),
    /// EXR encoding or file I/O failed.
    #[error("failed to save EXR image: {0}")]
    Exr(#[from] exr::error::Error),
}

/// sRGB transfer function with its linear toe for very dark values.
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear <= 0.0 {
        0.0
    } else if linear <= 0.003_130_8 {
        12.92 * linear
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}

/// Quantize one linear channel to an 8-bit sRGB value.
pub fn to_srgb8(linear: f32) -> u8 {
    (linear_to_gamma(Interval::UNIT.clamp(linear)) * 255.0).round() as u8
}

/// Save an HDR image as a gamma-corrected 8-bit PNG.
pub fn save_png(image: &HdrImage, path: &Path) -> Result<(), OutputError> {
    let ldr: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b] = image.get_pixel(x, y).0;
        Rgb([to_srgb8(r), to_srgb8(g), to_srgb8(b)])
    });
    ldr.save(path)?;
    info!("Image saved as {}", path.display());
    Ok(())
}

/// Save an HDR image as linear EXR.
pub fn save_exr(image: &HdrImage, path: &Path) -> Result<(), OutputError> {
    write_rgb_file(path, image.width() as usize, image.height() as usize, |x, y| {
        let [r, g, b] = image.get_pixel(x as u32, y as u32).0;
        (r, g, b)
    })?;
    info!("HDR image saved as EXR: {}", path.display());
    Ok(())
}

/// Save an HDR image, picking the encoder from the file extension.
pub fn save_image(image: &HdrImage, path: &Path) -> Result<(), OutputError> {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "png" => save_png(image, path),
        "exr" => save_exr(image, path),
        _ => Err(OutputError::UnsupportedExtension(extension)),
    }
}
