//! Line tessellation.
//!
//! Defined points are compacted into a line strip, split into batches at
//! every undefined point. Thin strokes are drawn as that strip directly;
//! thicker ones are expanded into a mitered triangle strip with two
//! vertices per point.

use crate::{TessellationError, TessellationResult, geometry::miter_join, vertex::Geometry};
use glam::Vec2;
use glseries_core::{PixelScale, PrimitiveKind, TessellationConfig, profiling::profile_scope};

#[derive(Debug, Clone, Copy)]
pub struct LineTessellator {
    stroke_width: f32,
    config: TessellationConfig,
}

impl LineTessellator {
    pub fn new(stroke_width: f32, config: &TessellationConfig) -> Self {
        Self {
            stroke_width,
            config: *config,
        }
    }

    /// Whether output is a native line strip rather than triangles.
    pub fn is_thin(&self) -> bool {
        self.config.is_thin(self.stroke_width)
    }

    /// Tessellate projected points; `None` (or a non-finite point) marks a
    /// gap.
    pub fn tessellate(
        &self,
        points: &[Option<Vec2>],
        pixel: PixelScale,
    ) -> TessellationResult<Geometry> {
        profile_scope!("line_tessellate");
        let strip = line_strip(points)?;
        self.finish(strip, pixel)
    }

    /// Tessellate pre-projected interleaved `[x0, y0, x1, y1, ..]` data as a
    /// single batch. There is no definedness test; non-finite pairs are
    /// dropped.
    pub fn tessellate_raw(
        &self,
        interleaved: &[f32],
        pixel: PixelScale,
    ) -> TessellationResult<Geometry> {
        profile_scope!("line_tessellate_raw");

        let mut strip = Geometry::with_capacity(PrimitiveKind::LineStrip, interleaved.len() / 2)?;
        for pair in interleaved.chunks_exact(2) {
            let point = Vec2::new(pair[0], pair[1]);
            if point.is_finite() {
                strip.push(point);
            } else {
                tracing::trace!(?point, "dropping non-finite raw point");
            }
        }
        strip.close_batch(0);
        self.finish(strip, pixel)
    }

    fn finish(&self, strip: Geometry, pixel: PixelScale) -> TessellationResult<Geometry> {
        if self.is_thin() {
            Ok(strip)
        } else {
            self.thicken(&strip, pixel)
        }
    }

    /// Expand each batch of a line strip into a triangle strip
    /// `stroke_width` pixels wide.
    ///
    /// Batches with fewer than two distinct points are dropped; the output
    /// batch offsets are re-based onto the new buffer.
    pub fn thicken(&self, strip: &Geometry, pixel: PixelScale) -> TessellationResult<Geometry> {
        profile_scope!("line_thicken");

        if !pixel.is_usable() {
            return Err(TessellationError::DegenerateScale {
                x: pixel.x,
                y: pixel.y,
            });
        }

        let half_width = self.stroke_width * 0.5;
        let mut out =
            Geometry::with_capacity(PrimitiveKind::TriangleStrip, strip.vertex_count() * 2)?;
        let mut joins = Vec::new();
        let mut normals = Vec::new();

        for batch in &strip.batches {
            joins.clear();
            joins.extend(batch.vertices().map(|i| {
                let prev = (i > batch.offset).then(|| strip.point(i - 1));
                let next = (i + 1 < batch.end()).then(|| strip.point(i + 1));
                miter_join(prev, strip.point(i), next, pixel, self.config.miter_limit)
            }));

            if !resolve_normals(&joins, &mut normals) {
                tracing::trace!(?batch, "skipping batch without extent");
                continue;
            }

            let start = out.vertex_count();
            for (i, normal) in batch.vertices().zip(&normals) {
                let point = strip.point(i);
                let offset = pixel.to_ndc(*normal * half_width);
                out.push(point + offset);
                out.push(point - offset);
            }
            out.close_batch(start);
        }

        tracing::trace!(
            batches = out.batches.len(),
            vertices = out.vertex_count(),
            "thickened line strip"
        );
        Ok(out)
    }
}

/// Compact the finite points into a line strip, one batch per defined run.
pub fn line_strip(points: &[Option<Vec2>]) -> TessellationResult<Geometry> {
    let defined = points
        .iter()
        .filter(|p| matches!(p, Some(v) if v.is_finite()))
        .count();
    let mut strip = Geometry::with_capacity(PrimitiveKind::LineStrip, defined)?;

    let mut start = 0;
    for point in points {
        match point {
            Some(p) if p.is_finite() => strip.push(*p),
            _ => start = strip.close_batch(start),
        }
    }
    strip.close_batch(start);
    Ok(strip)
}

/// Fill gaps left by zero-length segments with the nearest valid normal.
/// Returns `false` when there is none at all.
fn resolve_normals(joins: &[Option<Vec2>], out: &mut Vec<Vec2>) -> bool {
    out.clear();
    let Some(mut last) = joins.iter().flatten().next().copied() else {
        return false;
    };
    for join in joins {
        if let Some(normal) = join {
            last = *normal;
        }
        out.push(last);
    }
    true
}
