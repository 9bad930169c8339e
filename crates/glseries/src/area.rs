//! Area tessellation.
//!
//! The fill is a triangle strip alternating main-curve and baseline
//! vertices. Where the curve crosses the baseline, two coincident vertices
//! are inserted at the crossing so the strip pinches to a point instead of
//! drawing a bow-tie. The optional stroke traces the main curve only.

use crate::{
    LineTessellator, Orientation, TessellationResult,
    geometry::crossover_ratio,
    line::line_strip,
    vertex::{Geometry, StrokeData, Tessellation},
};
use glam::Vec2;
use glseries_core::{PixelScale, PrimitiveKind, TessellationConfig, profiling::profile_scope};

/// A projected datum: its point on the main curve and on the baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaSample {
    pub main: Vec2,
    pub base: Vec2,
}

impl AreaSample {
    pub fn new(main: Vec2, base: Vec2) -> Self {
        Self { main, base }
    }

    fn is_finite(&self) -> bool {
        self.main.is_finite() && self.base.is_finite()
    }
}

/// Side of the baseline, or `None` when exactly on it.
fn side(delta: f32) -> Option<bool> {
    if delta > 0.0 {
        Some(true)
    } else if delta < 0.0 {
        Some(false)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AreaTessellator {
    orientation: Orientation,
    stroke: LineTessellator,
}

impl AreaTessellator {
    pub fn new(orientation: Orientation, stroke_width: f32, config: &TessellationConfig) -> Self {
        Self {
            orientation,
            stroke: LineTessellator::new(stroke_width, config),
        }
    }

    /// Fill, and the stroke when `with_stroke` is set.
    pub fn tessellate(
        &self,
        samples: &[Option<AreaSample>],
        with_stroke: bool,
        pixel: PixelScale,
    ) -> TessellationResult<Tessellation> {
        let fill = self.tessellate_fill(samples)?;
        let stroke = if with_stroke {
            Some(StrokeData::Outline(self.tessellate_stroke(samples, pixel)?))
        } else {
            None
        };
        Ok(Tessellation {
            fill,
            stroke,
            pixel_scale: pixel,
        })
    }

    /// Number of baseline crossings between consecutive defined samples.
    pub fn count_crossovers(&self, samples: &[Option<AreaSample>]) -> usize {
        let mut count = 0;
        let mut last: Option<bool> = None;
        for sample in samples {
            match sample.filter(AreaSample::is_finite) {
                Some(s) => {
                    let cur = side(self.orientation.main_delta(s.main, s.base));
                    if let (Some(a), Some(b)) = (last, cur)
                        && a != b
                    {
                        count += 1;
                    }
                    last = cur;
                }
                None => last = None,
            }
        }
        count
    }

    /// Triangle strip fill with crossover vertices, one batch per defined
    /// run. Batch offsets include the inserted vertices.
    pub fn tessellate_fill(&self, samples: &[Option<AreaSample>]) -> TessellationResult<Geometry> {
        profile_scope!("area_fill");

        let defined = samples
            .iter()
            .filter(|s| s.is_some_and(|s| s.is_finite()))
            .count();
        let crossovers = self.count_crossovers(samples);
        let mut fill =
            Geometry::with_capacity(PrimitiveKind::TriangleStrip, 2 * defined + 2 * crossovers)?;

        let mut start = 0;
        // Previous defined sample and its signed distance to the baseline.
        let mut last: Option<(AreaSample, f32)> = None;

        for sample in samples {
            let Some(s) = sample.filter(AreaSample::is_finite) else {
                start = fill.close_batch(start);
                last = None;
                continue;
            };

            let delta = self.orientation.main_delta(s.main, s.base);
            if let Some((prev, prev_delta)) = last
                && let (Some(a), Some(b)) = (side(prev_delta), side(delta))
                && a != b
            {
                let ratio = crossover_ratio(prev_delta, delta);
                let crossing = prev.main + (s.main - prev.main) * ratio;
                fill.push(crossing);
                fill.push(crossing);
            }

            fill.push(s.main);
            fill.push(s.base);
            last = Some((s, delta));
        }
        fill.close_batch(start);

        tracing::trace!(defined, crossovers, batches = fill.batches.len(), "tessellated area fill");
        Ok(fill)
    }

    /// The main curve as a line strip per defined run, triangulated when the
    /// stroke is thick.
    pub fn tessellate_stroke(
        &self,
        samples: &[Option<AreaSample>],
        pixel: PixelScale,
    ) -> TessellationResult<Geometry> {
        profile_scope!("area_stroke");

        let mains: Vec<Option<Vec2>> = samples
            .iter()
            .map(|s| s.filter(AreaSample::is_finite).map(|s| s.main))
            .collect();
        let strip = line_strip(&mains)?;
        if self.stroke.is_thin() {
            Ok(strip)
        } else {
            self.stroke.thicken(&strip, pixel)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glseries_core::Batch;

    const PIXEL: PixelScale = PixelScale::new(0.01, 0.01);

    fn vertical(points: &[(f32, f32)]) -> Vec<Option<AreaSample>> {
        points
            .iter()
            .map(|&(x, y)| Some(AreaSample::new(Vec2::new(x, y), Vec2::new(x, 0.0))))
            .collect()
    }

    fn tessellator() -> AreaTessellator {
        AreaTessellator::new(Orientation::Vertical, 1.0, &TessellationConfig::default())
    }

    #[test]
    fn test_single_crossover() {
        let samples = vertical(&[(0.0, 0.0), (1.0, 1.0), (2.0, -1.0)]);
        let fill = tessellator().tessellate_fill(&samples).unwrap();

        assert_eq!(fill.vertices.len(), 16);
        assert_eq!(fill.batches, vec![Batch::new(0, 8)]);
        // Crossing halfway between x = 1 and x = 2, inserted twice.
        assert_eq!(fill.point(4), Vec2::new(1.5, 0.0));
        assert_eq!(fill.point(5), Vec2::new(1.5, 0.0));
        assert_eq!(fill.point(6), Vec2::new(2.0, -1.0));
    }

    #[test]
    fn test_zero_delta_is_not_a_crossing() {
        let samples = vertical(&[(0.0, 1.0), (1.0, 0.0), (2.0, -1.0)]);
        assert_eq!(tessellator().count_crossovers(&samples), 0);
        let fill = tessellator().tessellate_fill(&samples).unwrap();
        assert_eq!(fill.vertex_count(), 6);
    }

    #[test]
    fn test_gap_resets_sign_tracking() {
        let mut samples = vertical(&[(0.0, 1.0), (1.0, 1.0), (2.0, -1.0), (3.0, -1.0)]);
        samples[2] = None;
        let fill = tessellator().tessellate_fill(&samples).unwrap();

        assert_eq!(tessellator().count_crossovers(&samples), 0);
        assert_eq!(fill.batches, vec![Batch::new(0, 4), Batch::new(4, 2)]);
    }

    #[test]
    fn test_batch_offsets_include_crossovers() {
        let mut samples = vertical(&[(0.0, 1.0), (1.0, -1.0), (2.0, 1.0), (3.0, 1.0), (4.0, 1.0)]);
        samples[3] = None;
        let fill = tessellator().tessellate_fill(&samples).unwrap();

        // First run: 3 samples + 2 crossovers.
        assert_eq!(fill.batches, vec![Batch::new(0, 10), Batch::new(10, 2)]);
    }

    #[test]
    fn test_horizontal_orientation() {
        let samples = vec![
            Some(AreaSample::new(Vec2::new(1.0, 0.0), Vec2::new(0.0, 0.0))),
            Some(AreaSample::new(Vec2::new(-1.0, 1.0), Vec2::new(0.0, 1.0))),
        ];
        let tessellator =
            AreaTessellator::new(Orientation::Horizontal, 1.0, &TessellationConfig::default());
        let fill = tessellator.tessellate_fill(&samples).unwrap();

        assert_eq!(fill.vertex_count(), 6);
        assert_eq!(fill.point(2), Vec2::new(0.0, 0.5));
    }

    #[test]
    fn test_stroke_follows_main_curve() {
        let mut samples = vertical(&[(0.0, 1.0), (1.0, 2.0), (2.0, 1.0), (3.0, 1.0)]);
        samples[2] = None;
        let result = tessellator().tessellate(&samples, true, PIXEL).unwrap();

        let Some(StrokeData::Outline(stroke)) = result.stroke else {
            panic!("expected an outline");
        };
        assert_eq!(stroke.kind, PrimitiveKind::LineStrip);
        assert_eq!(stroke.batches, vec![Batch::new(0, 2), Batch::new(2, 1)]);
        assert_eq!(stroke.point(1), Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_thick_stroke_is_triangulated() {
        let samples = vertical(&[(0.0, 0.1), (0.5, 0.2), (1.0, 0.1)]);
        let tessellator =
            AreaTessellator::new(Orientation::Vertical, 3.0, &TessellationConfig::default());
        let stroke = tessellator.tessellate_stroke(&samples, PIXEL).unwrap();

        assert_eq!(stroke.kind, PrimitiveKind::TriangleStrip);
        assert_eq!(stroke.vertex_count(), 6);
    }

    #[test]
    fn test_without_stroke() {
        let samples = vertical(&[(0.0, 1.0), (1.0, 1.0)]);
        let result = tessellator().tessellate(&samples, false, PIXEL).unwrap();
        assert!(result.stroke.is_none());
        assert_eq!(result.pixel_scale, PIXEL);
    }
}
