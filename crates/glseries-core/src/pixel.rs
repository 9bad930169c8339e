use glam::Vec2;

/// Size of one device pixel in NDC units, per axis.
///
/// Stroke widths, bar widths and point radii are given in pixels; the
/// tessellators multiply by this to get NDC offsets, and divide by it to do
/// join math in isotropic pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelScale {
    pub x: f32,
    pub y: f32,
}

impl PixelScale {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Derive the pixel scale from two axis ranges (in pixels):
    /// `|2 / (range.1 - range.0)|` per axis.
    pub fn from_ranges(x_range: (f32, f32), y_range: (f32, f32)) -> Self {
        Self {
            x: (2.0 / (x_range.1 - x_range.0)).abs(),
            y: (2.0 / (y_range.1 - y_range.0)).abs(),
        }
    }

    /// Pixel scale for a viewport of `width` x `height` pixels.
    pub fn from_viewport(width: u32, height: u32) -> Self {
        Self::from_ranges((0.0, width as f32), (0.0, height as f32))
    }

    /// True when both axes are finite and non-zero, i.e. pixel and NDC
    /// space can be converted both ways.
    pub fn is_usable(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.x > 0.0 && self.y > 0.0
    }

    /// NDC -> pixel space.
    #[inline]
    pub fn to_pixels(&self, ndc: Vec2) -> Vec2 {
        Vec2::new(ndc.x / self.x, ndc.y / self.y)
    }

    /// Pixel-space offset -> NDC offset.
    #[inline]
    pub fn to_ndc(&self, pixels: Vec2) -> Vec2 {
        Vec2::new(pixels.x * self.x, pixels.y * self.y)
    }
}
