//! Bar tessellation: one quad (two triangles) per datum, plus an optional
//! three-sided outline that leaves the baseline edge open.

use crate::{
    Align, Orientation, TessellationResult,
    vertex::{Geometry, StrokeData, Tessellation},
};
use glam::Vec2;
use glseries_core::{Batch, PixelScale, PrimitiveKind, profiling::profile_scope};

/// A projected bar. `cross`, `main` and `base` are NDC; `width` is pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarSample {
    pub cross: f32,
    pub main: f32,
    pub base: f32,
    pub width: f32,
}

impl BarSample {
    pub fn new(cross: f32, main: f32, base: f32, width: f32) -> Self {
        Self {
            cross,
            main,
            base,
            width,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BarTessellator {
    orientation: Orientation,
    align: Align,
}

impl BarTessellator {
    pub fn new(orientation: Orientation, align: Align) -> Self {
        Self { orientation, align }
    }

    /// Corners in the order baseline-start, top-start, top-end, baseline-end.
    ///
    /// Returns `None` for bars that cannot be drawn.
    pub fn corners(&self, bar: &BarSample, pixel: PixelScale) -> Option<[Vec2; 4]> {
        if !(bar.width > 0.0 && bar.width.is_finite()) {
            return None;
        }

        let pixel_cross = match self.orientation {
            Orientation::Vertical => pixel.x,
            Orientation::Horizontal => pixel.y,
        };
        let offset = self.align.offset(bar.width) - bar.width / 2.0;
        let lo = bar.cross + offset * pixel_cross;
        let hi = lo + bar.width * pixel_cross;

        let corners = [
            self.orientation.point(lo, bar.base),
            self.orientation.point(lo, bar.main),
            self.orientation.point(hi, bar.main),
            self.orientation.point(hi, bar.base),
        ];
        corners.iter().all(|c| c.is_finite()).then_some(corners)
    }

    pub fn tessellate(
        &self,
        bars: &[BarSample],
        with_stroke: bool,
        pixel: PixelScale,
    ) -> TessellationResult<Tessellation> {
        profile_scope!("bar_tessellate");

        let mut fill = Geometry::with_capacity(PrimitiveKind::Triangles, bars.len() * 6)?;
        for bar in bars {
            let Some([c1, c2, c3, c4]) = self.corners(bar, pixel) else {
                tracing::trace!(?bar, "skipping degenerate bar");
                continue;
            };
            for corner in [c1, c2, c3, c3, c4, c1] {
                fill.push(corner);
            }
        }
        close_single_batch(&mut fill);

        let stroke = if with_stroke {
            Some(StrokeData::Outline(self.tessellate_outline(bars, pixel)?))
        } else {
            None
        };

        tracing::trace!(bars = bars.len(), vertices = fill.vertex_count(), "tessellated bars");
        Ok(Tessellation {
            fill,
            stroke,
            pixel_scale: pixel,
        })
    }

    /// Outline segments `c1-c2`, `c2-c3`, `c3-c4` per bar, as a line list.
    pub fn tessellate_outline(
        &self,
        bars: &[BarSample],
        pixel: PixelScale,
    ) -> TessellationResult<Geometry> {
        profile_scope!("bar_outline");

        let mut lines = Geometry::with_capacity(PrimitiveKind::Lines, bars.len() * 6)?;
        for bar in bars {
            if let Some([c1, c2, c3, c4]) = self.corners(bar, pixel) {
                for corner in [c1, c2, c2, c3, c3, c4] {
                    lines.push(corner);
                }
            }
        }
        close_single_batch(&mut lines);
        Ok(lines)
    }
}

fn close_single_batch(geometry: &mut Geometry) {
    let count = geometry.vertex_count();
    if count > 0 {
        geometry.batches.push(Batch::new(0, count));
    }
}
