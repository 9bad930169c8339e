//! The contract between the tessellation engine and a graphics backend.
//!
//! The engine never opens a device context. It produces interleaved
//! `[x, y, x, y, ..]` NDC buffers plus batch ranges and hands them to a
//! [`Rasterizer`], which owns uploads, shaders and draw calls.

use crate::{Batch, Color, PixelScale, Scale, scale::NdcScale};

/// How a vertex buffer is assembled into primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// Independent triangles, 3 vertices each.
    Triangles,
    /// Triangle strip; coincident vertices produce degenerate triangles.
    TriangleStrip,
    /// Independent segments, 2 vertices each.
    Lines,
    /// Connected polyline.
    LineStrip,
}

impl PrimitiveKind {
    /// The matching `wgpu` topology for pipeline creation.
    pub fn topology(self) -> wgpu::PrimitiveTopology {
        match self {
            PrimitiveKind::Triangles => wgpu::PrimitiveTopology::TriangleList,
            PrimitiveKind::TriangleStrip => wgpu::PrimitiveTopology::TriangleStrip,
            PrimitiveKind::Lines => wgpu::PrimitiveTopology::LineList,
            PrimitiveKind::LineStrip => wgpu::PrimitiveTopology::LineStrip,
        }
    }

    pub fn is_strip(self) -> bool {
        matches!(self, PrimitiveKind::TriangleStrip | PrimitiveKind::LineStrip)
    }

    /// Vertices per primitive for list topologies.
    pub fn vertices_per_primitive(self) -> Option<usize> {
        match self {
            PrimitiveKind::Triangles => Some(3),
            PrimitiveKind::Lines => Some(2),
            PrimitiveKind::TriangleStrip | PrimitiveKind::LineStrip => None,
        }
    }
}

/// Two scales projected into NDC plus the pixel scale they imply.
#[derive(Debug, Clone, Copy)]
pub struct ProjectedScales<'a> {
    pub x: NdcScale<'a>,
    pub y: NdcScale<'a>,
    pub pixel: PixelScale,
}

/// A graphics backend capable of drawing tessellated series.
///
/// Every method is called from the rendering thread only. Vertex slices are
/// borrowed for the duration of the call; backends copy what they upload.
pub trait Rasterizer {
    /// Draw `vertices` as `kind` in `color`. With `batch`, only that vertex
    /// range is drawn.
    fn submit_triangles(
        &mut self,
        vertices: &[f32],
        color: Color,
        kind: PrimitiveKind,
        batch: Option<Batch>,
    );

    /// Draw `vertices` as independent line segments, `line_width` pixels wide.
    fn submit_lines(&mut self, vertices: &[f32], color: Color, line_width: f32);

    /// Draw anti-aliased ring triangles.
    ///
    /// `edges` runs parallel to `vertices` (one pair per vertex) and carries
    /// the distance-to-center / distance-to-edge values the fragment stage
    /// blends `fill` and `stroke` with.
    fn submit_edge_triangles(
        &mut self,
        vertices: &[f32],
        edges: &[f32],
        fill: Color,
        stroke_width: f32,
        stroke: Color,
    );

    /// Re-target both scales at NDC and derive the pixel scale from their
    /// ranges.
    fn apply_scales<'a>(&self, x: &'a dyn Scale, y: &'a dyn Scale) -> ProjectedScales<'a> {
        ProjectedScales {
            x: NdcScale::new(x),
            y: NdcScale::new(y),
            pixel: PixelScale::from_ranges(x.range(), y.range()),
        }
    }
}

impl<R: Rasterizer + ?Sized> Rasterizer for &mut R {
    fn submit_triangles(
        &mut self,
        vertices: &[f32],
        color: Color,
        kind: PrimitiveKind,
        batch: Option<Batch>,
    ) {
        (**self).submit_triangles(vertices, color, kind, batch)
    }

    fn submit_lines(&mut self, vertices: &[f32], color: Color, line_width: f32) {
        (**self).submit_lines(vertices, color, line_width)
    }

    fn submit_edge_triangles(
        &mut self,
        vertices: &[f32],
        edges: &[f32],
        fill: Color,
        stroke_width: f32,
        stroke: Color,
    ) {
        (**self).submit_edge_triangles(vertices, edges, fill, stroke_width, stroke)
    }

    fn apply_scales<'a>(&self, x: &'a dyn Scale, y: &'a dyn Scale) -> ProjectedScales<'a> {
        (**self).apply_scales(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LinearScale;

    struct NullRasterizer;

    impl Rasterizer for NullRasterizer {
        fn submit_triangles(&mut self, _: &[f32], _: Color, _: PrimitiveKind, _: Option<Batch>) {}
        fn submit_lines(&mut self, _: &[f32], _: Color, _: f32) {}
        fn submit_edge_triangles(&mut self, _: &[f32], _: &[f32], _: Color, _: f32, _: Color) {}
    }

    #[test]
    fn test_topology_mapping() {
        assert_eq!(
            PrimitiveKind::TriangleStrip.topology(),
            wgpu::PrimitiveTopology::TriangleStrip
        );
        assert_eq!(PrimitiveKind::Lines.topology(), wgpu::PrimitiveTopology::LineList);
        assert_eq!(PrimitiveKind::Triangles.vertices_per_primitive(), Some(3));
        assert!(PrimitiveKind::LineStrip.is_strip());
    }

    #[test]
    fn test_default_apply_scales() {
        let x = LinearScale::new((0.0, 10.0), (0.0, 400.0));
        let y = LinearScale::new((0.0, 1.0), (200.0, 0.0));
        let scales = NullRasterizer.apply_scales(&x, &y);

        assert_eq!(scales.pixel, PixelScale::new(2.0 / 400.0, 2.0 / 200.0));
        assert_eq!(scales.x.project(10.0, 0), 1.0);
        assert_eq!(scales.y.project(0.0, 0), -1.0);
    }
}
