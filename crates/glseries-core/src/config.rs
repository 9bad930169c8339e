/// Tunables shared by every tessellator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TessellationConfig {
    /// Stroke widths (in device pixels) below this are drawn as native
    /// 1px line strips instead of triangulated strips.
    pub thin_line_threshold: f32,
    /// Longest miter, as a multiple of half the stroke width.
    pub miter_limit: f32,
    /// Fewest wedges used for a circular point.
    pub min_circle_segments: u32,
    /// Reuse tessellation results between frames. Off by default: a cached
    /// series only rebuilds when its data length or pixel scale changes, or
    /// after `mark_data_changed`.
    pub cache_enabled: bool,
}

impl TessellationConfig {
    pub const DEFAULT_THIN_LINE_THRESHOLD: f32 = 1.1;
    pub const DEFAULT_MITER_LIMIT: f32 = 4.0;
    pub const DEFAULT_MIN_CIRCLE_SEGMENTS: u32 = 6;

    pub fn new() -> Self {
        Self {
            thin_line_threshold: Self::DEFAULT_THIN_LINE_THRESHOLD,
            miter_limit: Self::DEFAULT_MITER_LIMIT,
            min_circle_segments: Self::DEFAULT_MIN_CIRCLE_SEGMENTS,
            cache_enabled: false,
        }
    }

    pub fn with_thin_line_threshold(mut self, threshold: f32) -> Self {
        self.thin_line_threshold = threshold;
        self
    }

    /// Set the miter limit. Values below 1 are raised to 1.
    pub fn with_miter_limit(mut self, limit: f32) -> Self {
        self.miter_limit = limit.max(1.0);
        self
    }

    /// Set the minimum circle segment count. At least 3 segments are kept.
    pub fn with_min_circle_segments(mut self, segments: u32) -> Self {
        self.min_circle_segments = segments.max(3);
        self
    }

    pub fn with_cache(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }

    /// Whether a stroke of `width` pixels is drawn as a native line strip.
    pub fn is_thin(&self, width: f32) -> bool {
        width < self.thin_line_threshold
    }
}

impl Default for TessellationConfig {
    fn default() -> Self {
        Self::new()
    }
}
