//! Batch dispatch: turns a [`Tessellation`] into rasterizer calls.
//!
//! Fill and stroke are separate passes. Each pass uses one color for all of
//! its batches, so a backend that caches its color uniform uploads it once.

use crate::{
    Style,
    vertex::{Geometry, StrokeData, Tessellation},
};
use glseries_core::{Color, PrimitiveKind, Rasterizer, profiling::profile_scope};

/// Draw calls issued per pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchCounts {
    pub fill_batches: usize,
    pub stroke_batches: usize,
}

/// Submit `tessellation` drawn with `style`.
///
/// Ring points (edge stroke data) go out as a single edge-triangle call;
/// everything else is one call per batch per pass.
pub fn dispatch<R: Rasterizer + ?Sized>(
    rasterizer: &mut R,
    tessellation: &Tessellation,
    style: &Style,
) -> DispatchCounts {
    profile_scope!("dispatch");

    let mut counts = DispatchCounts::default();
    let stroke_color = style.visible_stroke();

    if let (Some(StrokeData::Edges(edges)), Some(stroke)) = (&tessellation.stroke, stroke_color) {
        if !tessellation.fill.vertices.is_empty() {
            let fill = style.visible_fill().unwrap_or(Color::TRANSPARENT);
            rasterizer.submit_edge_triangles(
                &tessellation.fill.vertices,
                edges,
                fill,
                style.stroke_width_px(),
                stroke,
            );
            counts.fill_batches = 1;
            counts.stroke_batches = 1;
        }
        return counts;
    }

    if let Some(fill) = style.visible_fill() {
        counts.fill_batches = submit_geometry(rasterizer, &tessellation.fill, fill, 1.0);
    }

    if let (Some(StrokeData::Outline(outline)), Some(stroke)) = (&tessellation.stroke, stroke_color)
    {
        counts.stroke_batches =
            submit_geometry(rasterizer, outline, stroke, style.stroke_width_px());
    }

    tracing::trace!(
        fill = counts.fill_batches,
        stroke = counts.stroke_batches,
        "dispatched batches"
    );
    counts
}

fn submit_geometry<R: Rasterizer + ?Sized>(
    rasterizer: &mut R,
    geometry: &Geometry,
    color: Color,
    line_width: f32,
) -> usize {
    for batch in &geometry.batches {
        match geometry.kind {
            PrimitiveKind::Lines => {
                rasterizer.submit_lines(&geometry.vertices[batch.floats()], color, line_width);
            }
            kind => rasterizer.submit_triangles(&geometry.vertices, color, kind, Some(*batch)),
        }
    }
    geometry.batches.len()
}
