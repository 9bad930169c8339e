//! Per-series draw style.
//!
//! A series' `decorate` callback returns one of these before tessellation.

use crate::{TessellationError, TessellationResult};
use glseries_core::Color;

/// Fill and stroke settings for one series draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    /// Fill color; `None` skips the fill pass.
    pub fill_color: Option<Color>,
    /// Stroke color; `None` skips the stroke pass.
    pub stroke_color: Option<Color>,
    /// Stroke width in device pixels.
    pub stroke_width: u32,
}

impl Style {
    pub const fn new() -> Self {
        Self {
            fill_color: None,
            stroke_color: None,
            stroke_width: 1,
        }
    }

    /// Line series default: black 1px stroke.
    pub const fn line() -> Self {
        Self::new().with_stroke(Color::BLACK, 1)
    }

    /// Area series default: light gray fill, no stroke.
    pub const fn area() -> Self {
        Self::new().with_fill(Color::SERIES_GRAY)
    }

    /// Bar and point default: dark gray fill, no stroke.
    pub const fn bar() -> Self {
        Self::new().with_fill(Color::SERIES_DARK_GRAY)
    }

    pub const fn point() -> Self {
        Self::bar()
    }

    /// Build a style from raw channel slices, as handed over by a style
    /// resolver. Fails if a slice does not hold exactly four channels.
    pub fn from_channels(
        fill: Option<&[f32]>,
        stroke: Option<&[f32]>,
        stroke_width: u32,
    ) -> TessellationResult<Self> {
        Ok(Self {
            fill_color: fill.map(parse_color).transpose()?,
            stroke_color: stroke.map(parse_color).transpose()?,
            stroke_width,
        })
    }

    pub const fn with_fill(mut self, color: Color) -> Self {
        self.fill_color = Some(color);
        self
    }

    pub const fn with_stroke(mut self, color: Color, width: u32) -> Self {
        self.stroke_color = Some(color);
        self.stroke_width = width;
        self
    }

    pub const fn without_stroke(mut self) -> Self {
        self.stroke_color = None;
        self
    }

    /// Stroke color, if the stroke pass should run.
    pub fn visible_stroke(&self) -> Option<Color> {
        self.stroke_color.filter(Color::is_visible)
    }

    /// Fill color, if the fill pass should run.
    pub fn visible_fill(&self) -> Option<Color> {
        self.fill_color.filter(Color::is_visible)
    }

    pub fn stroke_width_px(&self) -> f32 {
        self.stroke_width as f32
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_color(channels: &[f32]) -> TessellationResult<Color> {
    Color::from_slice(channels).ok_or(TessellationError::InvalidStyle {
        expected: Color::CHANNELS,
        found: channels.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_channels() {
        let style = Style::from_channels(Some(&[1.0, 0.0, 0.0, 1.0]), None, 2).unwrap();
        assert_eq!(style.fill_color, Some(Color::rgb(1.0, 0.0, 0.0)));
        assert!(style.stroke_color.is_none());
        assert_eq!(style.stroke_width, 2);
    }

    #[test]
    fn test_malformed_color_is_rejected() {
        let err = Style::from_channels(None, Some(&[0.0, 0.0, 0.0]), 1).unwrap_err();
        assert_eq!(
            err,
            TessellationError::InvalidStyle {
                expected: 4,
                found: 3
            }
        );
    }

    #[test]
    fn test_transparent_stroke_is_hidden() {
        let style = Style::area().with_stroke(Color::TRANSPARENT, 1);
        assert!(style.visible_stroke().is_none());
        assert!(style.visible_fill().is_some());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Style::line().stroke_color, Some(Color::BLACK));
        assert!(Style::area().stroke_color.is_none());
        assert_eq!(Style::point().fill_color, Some(Color::SERIES_DARK_GRAY));
    }
}
