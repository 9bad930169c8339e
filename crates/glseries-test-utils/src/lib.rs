//! Test utilities for glseries.
//!
//! The main component is `MockRasterizer` (requires the `mock` feature), a
//! [`Rasterizer`](glseries_core::Rasterizer) that draws nothing and records
//! every call, so engine tests can assert on batches, colors and buffers.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "mock")]
//! # {
//! use glseries_core::{Color, PrimitiveKind, Rasterizer};
//! use glseries_test_utils::MockRasterizer;
//!
//! let mut mock = MockRasterizer::new();
//! let triangle = [0.0, 0.0, 1.0, 0.0, 0.0, 1.0];
//! mock.submit_triangles(&triangle, Color::BLACK, PrimitiveKind::Triangles, None);
//!
//! assert_eq!(mock.count_triangle_submits(), 1);
//! assert_eq!(mock.drawn_vertex_count(), 3);
//! # }
//! ```

#[cfg(feature = "mock")]
pub mod mock_rasterizer;

#[cfg(feature = "mock")]
pub use mock_rasterizer::*;
