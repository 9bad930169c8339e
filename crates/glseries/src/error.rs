use std::collections::TryReserveError;

/// Errors that can occur while tessellating or drawing a series.
///
/// Degenerate geometry is never an error; it is skipped. These variants
/// cover input the engine cannot work with at all.
#[derive(Debug, Clone, PartialEq)]
pub enum TessellationError {
    /// A color did not carry exactly four channels.
    InvalidStyle { expected: usize, found: usize },

    /// The pixel scale is zero or non-finite, so pixel sizes cannot be
    /// converted to NDC.
    DegenerateScale { x: f32, y: f32 },

    /// A vertex buffer could not be allocated.
    OutOfMemory { requested: usize },
}

impl std::fmt::Display for TessellationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TessellationError::InvalidStyle { expected, found } => write!(
                f,
                "Invalid style: color has {} channels, expected {}",
                found, expected
            ),
            TessellationError::DegenerateScale { x, y } => {
                write!(f, "Degenerate pixel scale: ({}, {})", x, y)
            }
            TessellationError::OutOfMemory { requested } => {
                write!(f, "Failed to allocate vertex buffer of {} floats", requested)
            }
        }
    }
}

impl std::error::Error for TessellationError {}

/// Result type for tessellation operations.
pub type TessellationResult<T> = Result<T, TessellationError>;

/// Allocate a float buffer with room for exactly `len` values.
pub(crate) fn alloc_floats(len: usize) -> TessellationResult<Vec<f32>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_: TryReserveError| TessellationError::OutOfMemory { requested: len })?;
    Ok(buffer)
}
