//! Point tessellation.
//!
//! Each point becomes an independent triangle fan around its center: wedges
//! of a circle, or one triangle per edge of a symbol outline. The first
//! vertex of every triangle is the center, which is what the ring edge
//! buffer relies on.

use crate::{Symbol, TessellationResult, error::alloc_floats, vertex::Geometry};
use glam::Vec2;
use glseries_core::{
    Batch, PixelScale, PrimitiveKind, TessellationConfig, profiling::profile_scope,
};

/// A projected point center and its symbol area in square pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointSample {
    pub center: Vec2,
    pub size: f32,
}

impl PointSample {
    pub fn new(center: Vec2, size: f32) -> Self {
        Self { center, size }
    }

    fn is_drawable(&self) -> bool {
        self.size > 0.0 && self.size.is_finite() && self.center.is_finite()
    }
}

/// Largest circle radius or symbol scale, in pixels.
pub const MAX_POINT_RADIUS: u32 = 4096;

/// Circle radius in whole pixels for a symbol of `size` square pixels.
///
/// Any positive size gets at least a 1px radius, and at most
/// [`MAX_POINT_RADIUS`].
pub fn circle_radius(size: f32) -> u32 {
    if !(size > 0.0 && size.is_finite()) {
        return 0;
    }
    ((size.sqrt() * 0.65).floor() as u32).clamp(1, MAX_POINT_RADIUS)
}

/// Outline scale in pixels for a symbol of `size` square pixels.
pub fn shape_scale(size: f32) -> f32 {
    (size.sqrt() * 0.5).min(MAX_POINT_RADIUS as f32)
}

/// Tessellates points as circles or symbol outlines.
#[derive(Debug, Clone)]
pub struct PointTessellator {
    /// `None` for circles.
    outline: Option<Vec<Vec2>>,
    min_segments: u32,
}

impl PointTessellator {
    pub fn new(symbol: &Symbol, config: &TessellationConfig) -> Self {
        Self {
            outline: symbol.outline(),
            min_segments: config.min_circle_segments,
        }
    }

    /// Wedge count for a circle of `radius` pixels.
    pub fn circle_segments(&self, radius: u32) -> u32 {
        if radius == 0 {
            return 0;
        }
        radius.saturating_mul(2).max(self.min_segments)
    }

    fn triangles_for(&self, sample: &PointSample) -> usize {
        if !sample.is_drawable() {
            return 0;
        }
        match &self.outline {
            Some(outline) if outline.len() >= 2 => outline.len(),
            Some(_) => 0,
            None => self.circle_segments(circle_radius(sample.size)) as usize,
        }
    }

    /// Build the triangle list for `points`, already filtered for
    /// definedness. The result is a single batch.
    pub fn tessellate(
        &self,
        points: &[PointSample],
        pixel: PixelScale,
    ) -> TessellationResult<Geometry> {
        profile_scope!("point_tessellate");

        let triangles: usize = points.iter().map(|p| self.triangles_for(p)).sum();
        let mut geometry = Geometry {
            vertices: alloc_floats(triangles * 6)?,
            batches: Vec::new(),
            kind: PrimitiveKind::Triangles,
        };

        for sample in points {
            if self.triangles_for(sample) == 0 {
                tracing::trace!(size = sample.size, "skipping empty point");
                continue;
            }
            match &self.outline {
                Some(outline) => push_shape(&mut geometry, sample, outline, pixel),
                None => self.push_circle(&mut geometry, sample, pixel),
            }
        }

        let count = geometry.vertex_count();
        if count > 0 {
            geometry.batches.push(Batch::new(0, count));
        }
        tracing::trace!(points = points.len(), triangles, "tessellated points");
        Ok(geometry)
    }

    fn push_circle(&self, geometry: &mut Geometry, sample: &PointSample, pixel: PixelScale) {
        let radius = circle_radius(sample.size) as f32;
        let segments = self.circle_segments(circle_radius(sample.size));
        let step = std::f32::consts::TAU / segments as f32;
        let at = |n: u32| {
            let angle = step * n as f32;
            sample.center + pixel.to_ndc(Vec2::new(angle.sin(), angle.cos()) * radius)
        };

        for n in 0..segments {
            geometry.push(sample.center);
            geometry.push(at(n));
            geometry.push(at(n + 1));
        }
    }
}

fn push_shape(geometry: &mut Geometry, sample: &PointSample, outline: &[Vec2], pixel: PixelScale) {
    let scale = shape_scale(sample.size);
    let at = |p: Vec2| sample.center + pixel.to_ndc(p * scale);

    for (n, &vertex) in outline.iter().enumerate() {
        let next = outline[(n + 1) % outline.len()];
        geometry.push(sample.center);
        geometry.push(at(vertex));
        geometry.push(at(next));
    }
}

/// Ring edge buffer for a point triangle list.
///
/// Parallel to `fill.vertices`: for each triangle `(center, v1, v2)` the
/// values are `[0, (r1 + r2) / 2, d1, r1, d2, r2]`, where `d` is the pixel
/// distance from the center and `r` is where the stroke band begins along
/// that spoke. The correction factor `sqrt(d1 / d2)` keeps the band even
/// when the two spokes differ in length.
pub fn edge_buffer(
    fill: &Geometry,
    pixel: PixelScale,
    stroke_width: f32,
) -> TessellationResult<Vec<f32>> {
    profile_scope!("point_edges");

    let mut edges = alloc_floats(fill.vertices.len())?;
    for triangle in fill.vertices.chunks_exact(6) {
        let center = Vec2::new(triangle[0], triangle[1]);
        let d1 = pixel
            .to_pixels(Vec2::new(triangle[2], triangle[3]) - center)
            .length();
        let d2 = pixel
            .to_pixels(Vec2::new(triangle[4], triangle[5]) - center)
            .length();

        let diff = (d1 / d2).sqrt();
        let diff = if diff > 0.0 && diff.is_finite() { diff } else { 1.0 };
        let r1 = d1 - stroke_width * diff;
        let r2 = d2 - stroke_width / diff;

        edges.extend_from_slice(&[0.0, (r1 + r2) / 2.0, d1, r1, d2, r2]);
    }
    Ok(edges)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PIXEL: PixelScale = PixelScale::new(0.01, 0.02);

    fn tessellator(symbol: Symbol) -> PointTessellator {
        PointTessellator::new(&symbol, &TessellationConfig::default())
    }

    #[test]
    fn test_circle_radius() {
        assert_eq!(circle_radius(64.0), 5);
        assert_eq!(circle_radius(1.0), 1);
        assert_eq!(circle_radius(0.0), 0);
        assert_eq!(circle_radius(f32::NAN), 0);
        assert_eq!(circle_radius(f32::MAX), MAX_POINT_RADIUS);
    }

    #[test]
    fn test_huge_points_are_capped() {
        let circle = tessellator(Symbol::Circle);
        assert_eq!(circle.circle_segments(u32::MAX), u32::MAX);

        let huge = [PointSample::new(Vec2::ZERO, f32::MAX)];
        let geometry = circle.tessellate(&huge, PIXEL).unwrap();
        assert_eq!(geometry.vertex_count(), 2 * MAX_POINT_RADIUS as usize * 3);
        assert!(geometry.vertices.iter().all(|v| v.is_finite()));

        let square = tessellator(Symbol::Square).tessellate(&huge, PIXEL).unwrap();
        assert_eq!(square.vertex_count(), 4 * 3);
        assert!(square.vertices.iter().all(|v| v.abs() <= MAX_POINT_RADIUS as f32));
    }

    #[test]
    fn test_circle_segment_floor() {
        let t = tessellator(Symbol::Circle);
        assert_eq!(t.circle_segments(1), 6);
        assert_eq!(t.circle_segments(5), 10);
        assert_eq!(t.circle_segments(0), 0);
    }

    #[test]
    fn test_circle_wedges() {
        let t = tessellator(Symbol::Circle);
        let geometry = t
            .tessellate(&[PointSample::new(Vec2::ZERO, 64.0)], PIXEL)
            .unwrap();

        assert_eq!(geometry.vertex_count(), 30);
        assert_eq!(geometry.batches, vec![Batch::new(0, 30)]);
        // First wedge starts straight up, 5px away.
        assert_eq!(geometry.point(0), Vec2::ZERO);
        assert!((geometry.point(1) - Vec2::new(0.0, 0.1)).length() < 1e-6);
        // Last wedge closes back on the start.
        assert!((geometry.point(29) - geometry.point(1)).length() < 1e-6);
    }

    #[test]
    fn test_zero_size_emits_nothing() {
        let t = tessellator(Symbol::Circle);
        let geometry = t
            .tessellate(
                &[
                    PointSample::new(Vec2::ZERO, 0.0),
                    PointSample::new(Vec2::ZERO, -4.0),
                ],
                PIXEL,
            )
            .unwrap();
        assert_eq!(geometry.vertex_count(), 0);
        assert!(geometry.is_empty());
    }

    #[test]
    fn test_square_shape() {
        let t = tessellator(Symbol::Square);
        let geometry = t
            .tessellate(&[PointSample::new(Vec2::new(0.5, 0.5), 16.0)], PIXEL)
            .unwrap();

        // One triangle per edge, 2px half-width.
        assert_eq!(geometry.vertex_count(), 12);
        let corner = geometry.point(1);
        assert!((corner - Vec2::new(0.48, 0.46)).length() < 1e-6);
    }

    #[test]
    fn test_edge_buffer_layout() {
        let t = tessellator(Symbol::Circle);
        let fill = t
            .tessellate(&[PointSample::new(Vec2::ZERO, 64.0)], PIXEL)
            .unwrap();
        let edges = edge_buffer(&fill, PIXEL, 1.0).unwrap();

        assert_eq!(edges.len(), fill.vertices.len());
        assert_eq!(edges[0], 0.0);
        assert!((edges[2] - 5.0).abs() < 1e-4);
        assert!((edges[3] - 4.0).abs() < 1e-4);
        assert!((edges[1] - 4.0).abs() < 1e-4);
        assert!(edges.iter().all(|v| v.is_finite()));
    }
}
