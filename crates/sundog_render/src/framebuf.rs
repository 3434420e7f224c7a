//! Framebuffer for render output.

use std::path::Path;

use thiserror::Error;

use crate::Color;

/// Errors from writing a framebuffer to disk.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("failed to write image: {0}")]
    Image(#[from] image::ImageError),
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Image-sized buffer of linear-space colors.
///
/// Pixels are stored row-major with row 0 at the top of the image, so the
/// renderer can hand out whole rows as disjoint mutable slices. Everything
/// stays linear until [`Framebuffer::to_rgb8`] encodes for display.
pub struct Framebuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl Framebuffer {
    /// Create a new framebuffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Encode to 8-bit RGB bytes: gamma correction, then clamp to [0, 1].
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.push((255.0 * linear_to_gamma(color.x).clamp(0.0, 1.0)) as u8);
            bytes.push((255.0 * linear_to_gamma(color.y).clamp(0.0, 1.0)) as u8);
            bytes.push((255.0 * linear_to_gamma(color.z).clamp(0.0, 1.0)) as u8);
        }
        bytes
    }

    /// Write the gamma-encoded image to `path` as a PNG.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), SaveError> {
        image::save_buffer_with_format(
            path.as_ref(),
            &self.to_rgb8(),
            self.width,
            self.height,
            image::ColorType::Rgb8,
            image::ImageFormat::Png,
        )?;
        Ok(())
    }
}
