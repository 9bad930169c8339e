//! Vertex formats and tessellation output.
//!
//! Buffers are kept as flat interleaved `f32` arrays, which is what the
//! rasterizer contract takes. The `#[repr(C)]` vertex types describe the same
//! memory for backends that bind it through wgpu.

use crate::error::{TessellationResult, alloc_floats};
use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use glseries_core::{Batch, PixelScale, PrimitiveKind};
use static_assertions::assert_eq_size;

/// A projected NDC position.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct PositionVertex {
    pub position: [f32; 2],
}

assert_eq_size!(PositionVertex, [f32; 2]);

impl PositionVertex {
    pub fn new(x: f32, y: f32) -> Self {
        Self { position: [x, y] }
    }

    /// Get the WGPU vertex buffer layout.
    pub fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x2,
            }],
        }
    }
}

/// Companion attribute for anti-aliased point rings.
///
/// `distance` is the pixel distance from the point center; `inner` is where
/// the stroke band starts, measured the same way.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct EdgeVertex {
    pub distance: f32,
    pub inner: f32,
}

assert_eq_size!(EdgeVertex, [f32; 2]);

impl EdgeVertex {
    /// Layout bound as a second buffer next to [`PositionVertex`].
    pub fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x2,
            }],
        }
    }
}

/// One tessellated vertex buffer plus the batches to draw it in.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    /// Interleaved `[x, y, x, y, ..]` NDC coordinates.
    pub vertices: Vec<f32>,
    /// Vertex ranges, one draw call each, in data order.
    pub batches: Vec<Batch>,
    pub kind: PrimitiveKind,
}

impl Geometry {
    pub fn new(kind: PrimitiveKind) -> Self {
        Self {
            vertices: Vec::new(),
            batches: Vec::new(),
            kind,
        }
    }

    /// Create a geometry with room for exactly `vertices` vertices.
    pub fn with_capacity(kind: PrimitiveKind, vertices: usize) -> TessellationResult<Self> {
        Ok(Self {
            vertices: alloc_floats(vertices.saturating_mul(2))?,
            batches: Vec::new(),
            kind,
        })
    }

    #[inline]
    pub fn push(&mut self, point: Vec2) {
        self.vertices.push(point.x);
        self.vertices.push(point.y);
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    /// Close the batch that began at vertex `start`. Empty batches are
    /// dropped. Returns the vertex index the next batch starts at.
    pub fn close_batch(&mut self, start: usize) -> usize {
        let end = self.vertex_count();
        if end > start {
            self.batches.push(Batch::new(start, end - start));
        }
        end
    }

    /// Vertex `index` as a point.
    pub fn point(&self, index: usize) -> Vec2 {
        Vec2::new(self.vertices[index * 2], self.vertices[index * 2 + 1])
    }

    /// The vertex buffer viewed as [`PositionVertex`]es.
    pub fn as_vertices(&self) -> &[PositionVertex] {
        bytemuck::try_cast_slice(&self.vertices).unwrap_or_default()
    }
}

/// Stroke output of a tessellator.
#[derive(Debug, Clone, PartialEq)]
pub enum StrokeData {
    /// Separate outline geometry drawn after the fill.
    Outline(Geometry),
    /// Per-vertex ring distances parallel to the fill buffer.
    Edges(Vec<f32>),
}

impl StrokeData {
    pub fn batch_count(&self) -> usize {
        match self {
            StrokeData::Outline(geometry) => geometry.batches.len(),
            StrokeData::Edges(edges) => usize::from(!edges.is_empty()),
        }
    }

    /// The edge buffer viewed as [`EdgeVertex`]es, if this is ring data.
    pub fn as_edge_vertices(&self) -> Option<&[EdgeVertex]> {
        match self {
            StrokeData::Edges(edges) => Some(bytemuck::try_cast_slice(edges).unwrap_or_default()),
            StrokeData::Outline(_) => None,
        }
    }
}

/// Complete output for one series at one pixel scale.
#[derive(Debug, Clone, PartialEq)]
pub struct Tessellation {
    pub fill: Geometry,
    pub stroke: Option<StrokeData>,
    /// Pixel scale the buffers were built for.
    pub pixel_scale: PixelScale,
}

impl Tessellation {
    /// Nothing to draw.
    pub fn empty() -> Self {
        Self {
            fill: Geometry::new(PrimitiveKind::Triangles),
            stroke: None,
            pixel_scale: PixelScale::default(),
        }
    }

    /// A result with no fill pass, e.g. a plain line.
    pub fn stroke_only(stroke: Geometry, pixel_scale: PixelScale) -> Self {
        Self {
            fill: Geometry::new(stroke.kind),
            stroke: Some(StrokeData::Outline(stroke)),
            pixel_scale,
        }
    }

    pub fn vertex_count(&self) -> usize {
        let stroke = match &self.stroke {
            Some(StrokeData::Outline(geometry)) => geometry.vertex_count(),
            Some(StrokeData::Edges(_)) | None => 0,
        };
        self.fill.vertex_count() + stroke
    }
}
