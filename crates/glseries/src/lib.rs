//! glseries - GPU tessellation and draw batching for 2D chart series
//!
//! This crate provides:
//! - Line, area, bar and point series with per-datum accessors
//! - Tessellation into flat interleaved `[x, y]` vertex buffers in NDC
//! - Miter-joined thick lines and baseline crossovers for areas
//! - Ring strokes for point symbols via an edge-distance buffer
//! - A per-series cache that reuses geometry across frames
//!
//! Drawing goes through the [`Rasterizer`](glseries_core::Rasterizer)
//! trait; the backend owns buffers, pipelines and shaders.
//!
//! # Example
//!
//! ```ignore
//! use glseries::*;
//! use glseries_core::LinearScale;
//!
//! let x = LinearScale::new((0.0, 100.0), (0.0, 800.0));
//! let y = LinearScale::new((0.0, 1.0), (600.0, 0.0));
//!
//! let mut series: Series<Vec2> = LineSeries::new(
//!     XyConfig::default()
//!         .with_decorate(|_, _| Style::line().with_stroke(Color::SERIES_RED, 2)),
//! )
//! .into();
//!
//! // Redraws with the same scales and data length reuse the geometry.
//! let stats = series.draw(&data, &x, &y, &mut rasterizer)?;
//! ```

// Geometry
pub mod geometry;
pub mod orientation;
pub mod shape;
pub mod vertex;

// Tessellators
pub mod area;
pub mod bar;
pub mod line;
pub mod point;

// Drawing
pub mod cache;
pub mod dispatch;
pub mod error;
pub mod series;
pub mod style;

pub use area::{AreaSample, AreaTessellator};
pub use bar::{BarSample, BarTessellator};
pub use line::LineTessellator;
pub use orientation::{Align, Orientation};
pub use point::{PointSample, PointTessellator};
pub use shape::Symbol;
pub use vertex::{EdgeVertex, Geometry, PositionVertex, StrokeData, Tessellation};

pub use cache::{CacheDirtyFlags, CacheKey, CacheLookup, DrawCache};
pub use dispatch::{DispatchCounts, dispatch};
pub use error::{TessellationError, TessellationResult};
pub use series::{
    AreaSeries, BarConfig, BarSeries, DrawStats, LineSeries, PointConfig, PointSeries, Series,
    XyConfig, XyDatum,
};
pub use style::Style;

pub use glam::Vec2;
pub use glseries_core::{Color, PixelScale, TessellationConfig};
