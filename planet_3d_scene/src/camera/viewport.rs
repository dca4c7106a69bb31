/// Drawing surface size and device pixel ratio.
///
/// Sizes are in device-independent pixels. The renderer's output resolution
/// is the size times the pixel ratio, with the ratio capped (default 2) to
/// bound overdraw on very dense displays. The cap is one-sided: ratios
/// below 1 are used as-is.

use crate::error::Result;
use crate::engine_bail;

pub const DEFAULT_MAX_PIXEL_RATIO: f32 = 2.0;

/// Renderer output resolution in physical pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputSize {
    pub width: u32,
    pub height: u32,
    pub pixel_ratio: f32,
}

/// Size of the drawing surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: f32,
    height: f32,
    device_pixel_ratio: f32,
    max_pixel_ratio: f32,
}

fn check_size(width: f32, height: f32) -> Result<()> {
    if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
        engine_bail!(InvalidViewport; "planet3d::Viewport",
            "Viewport size must be positive and finite, got {}x{}", width, height);
    }
    Ok(())
}

impl Viewport {
    pub fn new(width: f32, height: f32, device_pixel_ratio: f32) -> Result<Self> {
        check_size(width, height)?;
        Ok(Self {
            width,
            height,
            device_pixel_ratio,
            max_pixel_ratio: DEFAULT_MAX_PIXEL_RATIO,
        })
    }

    /// Override the pixel ratio cap (values below 1 are raised to 1)
    pub fn with_max_pixel_ratio(mut self, max_pixel_ratio: f32) -> Self {
        self.max_pixel_ratio = max_pixel_ratio.max(1.0);
        self
    }

    /// Apply a display-size change. A rejected size leaves the viewport untouched.
    pub fn resize(&mut self, width: f32, height: f32, device_pixel_ratio: f32) -> Result<()> {
        check_size(width, height)?;
        self.width = width;
        self.height = height;
        self.device_pixel_ratio = device_pixel_ratio;
        Ok(())
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn device_pixel_ratio(&self) -> f32 {
        self.device_pixel_ratio
    }

    pub fn max_pixel_ratio(&self) -> f32 {
        self.max_pixel_ratio
    }

    /// width / height
    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// `min(device_pixel_ratio, max)`; an unusable reported ratio counts as 1
    pub fn pixel_ratio(&self) -> f32 {
        if self.device_pixel_ratio > 0.0 && self.device_pixel_ratio.is_finite() {
            self.device_pixel_ratio.min(self.max_pixel_ratio)
        } else {
            1.0
        }
    }

    pub fn output_size(&self) -> OutputSize {
        let ratio = self.pixel_ratio();
        OutputSize {
            width: (self.width * ratio).floor() as u32,
            height: (self.height * ratio).floor() as u32,
            pixel_ratio: ratio,
        }
    }
}

#[cfg(test)]
#[path = "viewport_tests.rs"]
mod tests;
