//! Color and depth buffers.

use std::path::Path;

use image::{Rgb, RgbImage};

use crate::error::BackendError;

/// A color image plus a depth value per pixel.
///
/// Coordinates are scene coordinates: x to the right, y up, larger z closer
/// to the viewer. Row 0 of the stored image is the top of the scene.
#[derive(Clone, Debug)]
pub struct FrameBuffer {
    color: RgbImage,
    depth: Vec<f64>,
}

impl FrameBuffer {
    /// Create a frame filled with `background` and an empty depth buffer.
    pub fn new(width: u32, height: u32, background: Rgb<u8>) -> Self {
        Self {
            color: RgbImage::from_pixel(width, height, background),
            depth: vec![f64::NEG_INFINITY; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.color.width()
    }

    pub fn height(&self) -> u32 {
        self.color.height()
    }

    /// Reset color to `background` and depth to infinitely far.
    pub fn clear(&mut self, background: Rgb<u8>) {
        for px in self.color.pixels_mut() {
            *px = background;
        }
        self.depth.fill(f64::NEG_INFINITY);
    }

    /// Image row and column for scene coordinates, if on screen.
    fn locate(&self, x: i64, y: i64) -> Option<(u32, u32)> {
        let (w, h) = (i64::from(self.width()), i64::from(self.height()));
        if x < 0 || y < 0 || x >= w || y >= h {
            return None;
        }
        Some((x as u32, (h - 1 - y) as u32))
    }

    /// Write `color` at (x, y) if `z` is nearer than what is already there.
    pub fn plot(&mut self, x: i64, y: i64, z: f64, color: Rgb<u8>) {
        let Some((col, row)) = self.locate(x, y) else {
            return;
        };
        let idx = row as usize * self.width() as usize + col as usize;
        if z > self.depth[idx] {
            self.depth[idx] = z;
            self.color.put_pixel(col, row, color);
        }
    }

    /// Color at scene coordinates (x, y), if on screen.
    pub fn pixel(&self, x: i64, y: i64) -> Option<Rgb<u8>> {
        self.locate(x, y)
            .map(|(col, row)| *self.color.get_pixel(col, row))
    }

    /// Depth at scene coordinates (x, y), if on screen.
    pub fn depth(&self, x: i64, y: i64) -> Option<f64> {
        self.locate(x, y)
            .map(|(col, row)| self.depth[row as usize * self.width() as usize + col as usize])
    }

    pub fn image(&self) -> &RgbImage {
        &self.color
    }

    /// Save the color image; the format follows the file extension.
    pub fn save(&self, path: &Path) -> Result<(), BackendError> {
        self.color.save(path)?;
        Ok(())
    }
}
