use glam::Vec2;

/// Which screen axis carries the main (value) axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    /// Cross values on x, main values on y.
    #[default]
    Vertical,
    /// Cross values on y, main values on x.
    Horizontal,
}

impl Orientation {
    /// Place a projected `(cross, main)` pair on the screen axes.
    #[inline]
    pub fn point(self, cross: f32, main: f32) -> Vec2 {
        match self {
            Orientation::Vertical => Vec2::new(cross, main),
            Orientation::Horizontal => Vec2::new(main, cross),
        }
    }

    /// Signed distance from `base` to `point` along the main axis.
    #[inline]
    pub fn main_delta(self, point: Vec2, base: Vec2) -> f32 {
        match self {
            Orientation::Vertical => point.y - base.y,
            Orientation::Horizontal => point.x - base.x,
        }
    }
}

/// Where a bar sits relative to its cross value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Align {
    /// The bar starts at the cross value.
    Start,
    #[default]
    Center,
    /// The bar ends at the cross value.
    End,
}

impl Align {
    /// Shift applied on top of centering a bar of `width`.
    #[inline]
    pub fn offset(self, width: f32) -> f32 {
        match self {
            Align::Start => width / 2.0,
            Align::Center => 0.0,
            Align::End => -width / 2.0,
        }
    }
}
