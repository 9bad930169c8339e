//! Recording implementation of `Rasterizer` for testing.
//!
//! Nothing is drawn. Every submission is copied into a shared call log that
//! tests inspect afterwards.

use glseries_core::{Batch, Color, PrimitiveKind, Rasterizer};
use parking_lot::Mutex;
use std::sync::Arc;

/// A recorded rasterizer call.
#[derive(Debug, Clone, PartialEq)]
pub enum RasterCall {
    Triangles {
        vertices: Vec<f32>,
        color: Color,
        kind: PrimitiveKind,
        batch: Option<Batch>,
    },
    Lines {
        vertices: Vec<f32>,
        color: Color,
        line_width: f32,
    },
    EdgeTriangles {
        vertices: Vec<f32>,
        edges: Vec<f32>,
        fill: Color,
        stroke_width: f32,
        stroke: Color,
    },
}

impl RasterCall {
    /// Vertices this call actually draws (batch range when present).
    pub fn drawn_vertex_count(&self) -> usize {
        match self {
            RasterCall::Triangles {
                batch: Some(batch), ..
            } => batch.count,
            RasterCall::Triangles { vertices, .. }
            | RasterCall::Lines { vertices, .. }
            | RasterCall::EdgeTriangles { vertices, .. } => vertices.len() / 2,
        }
    }

    /// The interleaved coordinates this call draws.
    pub fn drawn_floats(&self) -> &[f32] {
        match self {
            RasterCall::Triangles {
                vertices,
                batch: Some(batch),
                ..
            } => &vertices[batch.floats()],
            RasterCall::Triangles { vertices, .. }
            | RasterCall::Lines { vertices, .. }
            | RasterCall::EdgeTriangles { vertices, .. } => vertices,
        }
    }
}

#[derive(Debug, Default)]
struct MockState {
    calls: Vec<RasterCall>,
    /// Last color pair bound, mirroring a backend that only rewrites its
    /// color uniform when the value differs.
    bound_colors: Option<(Color, Color)>,
    color_uploads: usize,
}

impl MockState {
    fn bind_colors(&mut self, fill: Color, stroke: Color) {
        if self.bound_colors != Some((fill, stroke)) {
            self.bound_colors = Some((fill, stroke));
            self.color_uploads += 1;
        }
    }
}

/// Mock rasterizer for testing.
///
/// Clones share one call log, so a test can hand one handle to the code
/// under test and assert through another.
///
/// # Example
///
/// ```rust
/// use glseries_core::{Color, Rasterizer};
/// use glseries_test_utils::MockRasterizer;
///
/// let mock = MockRasterizer::new();
/// let mut handle = mock.clone();
/// handle.submit_lines(&[0.0, 0.0, 1.0, 1.0], Color::BLACK, 1.0);
///
/// assert_eq!(mock.count_line_submits(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockRasterizer {
    state: Arc<Mutex<MockState>>,
}

impl MockRasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a copy of all recorded calls.
    pub fn calls(&self) -> Vec<RasterCall> {
        self.state.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().calls.len()
    }

    pub fn count_triangle_submits(&self) -> usize {
        self.count(|call| matches!(call, RasterCall::Triangles { .. }))
    }

    pub fn count_kind(&self, kind: PrimitiveKind) -> usize {
        self.count(|call| matches!(call, RasterCall::Triangles { kind: k, .. } if *k == kind))
    }

    pub fn count_line_submits(&self) -> usize {
        self.count(|call| matches!(call, RasterCall::Lines { .. }))
    }

    pub fn count_edge_submits(&self) -> usize {
        self.count(|call| matches!(call, RasterCall::EdgeTriangles { .. }))
    }

    /// Number of times the bound color changed.
    pub fn color_uploads(&self) -> usize {
        self.state.lock().color_uploads
    }

    /// Total vertices drawn across all calls.
    pub fn drawn_vertex_count(&self) -> usize {
        self.state
            .lock()
            .calls
            .iter()
            .map(RasterCall::drawn_vertex_count)
            .sum()
    }

    /// True if any recorded coordinate is `NaN` or infinite.
    pub fn has_non_finite(&self) -> bool {
        self.state.lock().calls.iter().any(|call| match call {
            RasterCall::EdgeTriangles {
                vertices, edges, ..
            } => vertices.iter().chain(edges).any(|v| !v.is_finite()),
            other => other.drawn_floats().iter().any(|v| !v.is_finite()),
        })
    }

    /// Clear recorded calls (useful between frames).
    pub fn clear_calls(&self) {
        let mut state = self.state.lock();
        state.calls.clear();
        state.color_uploads = 0;
        state.bound_colors = None;
    }

    fn count(&self, predicate: impl Fn(&RasterCall) -> bool) -> usize {
        self.state.lock().calls.iter().filter(|c| predicate(c)).count()
    }
}

impl Rasterizer for MockRasterizer {
    fn submit_triangles(
        &mut self,
        vertices: &[f32],
        color: Color,
        kind: PrimitiveKind,
        batch: Option<Batch>,
    ) {
        let mut state = self.state.lock();
        state.bind_colors(color, color);
        state.calls.push(RasterCall::Triangles {
            vertices: vertices.to_vec(),
            color,
            kind,
            batch,
        });
    }

    fn submit_lines(&mut self, vertices: &[f32], color: Color, line_width: f32) {
        let mut state = self.state.lock();
        state.bind_colors(color, color);
        state.calls.push(RasterCall::Lines {
            vertices: vertices.to_vec(),
            color,
            line_width,
        });
    }

    fn submit_edge_triangles(
        &mut self,
        vertices: &[f32],
        edges: &[f32],
        fill: Color,
        stroke_width: f32,
        stroke: Color,
    ) {
        let mut state = self.state.lock();
        state.bind_colors(fill, stroke);
        state.calls.push(RasterCall::EdgeTriangles {
            vertices: vertices.to_vec(),
            edges: edges.to_vec(),
            fill,
            stroke_width,
            stroke,
        });
    }
}
