use crate::error::{PlotError, Result};

/// Drawable area in logical pixels plus the device pixel ratio.
///
/// All plot math runs in logical pixels. Only the render target is sized in
/// physical pixels, so changing the DPR never moves a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: f64,
    height: f64,
    pixel_ratio: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, pixel_ratio: f64) -> Result<Self> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) || !valid(pixel_ratio) {
            return Err(PlotError::InvalidViewport { width, height });
        }
        Ok(Self {
            width,
            height,
            pixel_ratio,
        })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    /// Side of the centered square plotting box.
    pub fn square_side(&self) -> f64 {
        self.width.min(self.height)
    }

    /// Framebuffer size, at least 1x1.
    pub fn physical_size(&self) -> [u32; 2] {
        let px = |v: f64| ((v * self.pixel_ratio).round() as u32).max(1);
        [px(self.width), px(self.height)]
    }
}
