//! RGBA output buffer.

use std::ops::Range;

/// Bytes per pixel (RGBA).
pub const CHANNELS: usize = 4;

/// A width×height RGBA8 image.
///
/// Starts fully zeroed, so any pixel that was never written has alpha 0.
/// Rendered pixels always carry alpha 255.
#[derive(Debug, Clone, PartialEq)]
pub struct Framebuffer {
    pub width: u32,
    pub height: u32,
    pixels: Vec<u8>,
}

impl Framebuffer {
    /// Create a new, unwritten framebuffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * CHANNELS],
        }
    }

    /// Number of bytes in one row.
    pub fn row_stride(&self) -> usize {
        self.width as usize * CHANNELS
    }

    /// Copy a block of whole rows into place.
    ///
    /// `bytes` must hold exactly `rows.len()` rows; rows outside the image
    /// are a caller bug.
    pub fn write_rows(&mut self, rows: Range<u32>, bytes: &[u8]) {
        let stride = self.row_stride();
        let start = rows.start as usize * stride;
        let end = rows.end as usize * stride;
        debug_assert_eq!(bytes.len(), end - start, "row block size mismatch");
        self.pixels[start..end].copy_from_slice(bytes);
    }

    /// Get the pixel at (x, y).
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * CHANNELS;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    /// Count pixels that were never written (alpha 0).
    pub fn unwritten_pixels(&self) -> usize {
        self.pixels
            .chunks_exact(CHANNELS)
            .filter(|px| px[3] == 0)
            .count()
    }

    /// Raw RGBA bytes, row-major from the top-left corner.
    pub fn as_rgba(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume the buffer and return the RGBA bytes.
    pub fn into_rgba(self) -> Vec<u8> {
        self.pixels
    }
}
