//! glseries Core
//!
//! Shared types and the contract between the tessellation engine and the
//! graphics backend that actually draws its buffers.

pub mod batch;
pub mod color;
pub mod config;
pub mod logging;
pub mod pixel;
pub mod profiling;
pub mod rasterizer;
pub mod scale;

pub use batch::Batch;
pub use color::Color;
pub use config::TessellationConfig;
pub use pixel::PixelScale;
pub use rasterizer::{PrimitiveKind, ProjectedScales, Rasterizer};
pub use scale::{LinearScale, NdcScale, Scale};
