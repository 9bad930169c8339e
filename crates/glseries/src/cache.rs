//! Per-series tessellation cache.
//!
//! A series keeps the last [`Tessellation`] it built. It is reused while the
//! pixel scale, stroke width and data length are unchanged and nothing has
//! been marked dirty. Style-only changes keep the geometry.
//!
//! Neither the data values nor the scale domains are part of the key. Mark
//! the data changed after editing it in place, or after panning or zooming
//! without resizing. Series leave the cache off unless configured.

use crate::{
    TessellationResult,
    vertex::{StrokeData, Tessellation},
};
use glseries_core::PixelScale;

bitflags::bitflags! {
    /// What changed since the cached tessellation was built.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CacheDirtyFlags: u8 {
        /// Data was replaced or mutated in place.
        const DATA_CHANGED = 0b0000_0001;
        /// A new series configuration was installed.
        const CONFIG_CHANGED = 0b0000_0010;
        /// Colors changed (no geometry update needed).
        const STYLE_CHANGED = 0b0000_0100;
    }
}

impl CacheDirtyFlags {
    /// Check if the geometry must be rebuilt.
    pub fn needs_rebuild(&self) -> bool {
        self.intersects(Self::DATA_CHANGED | Self::CONFIG_CHANGED)
    }

    /// Check if only style changed (no geometry update needed).
    pub fn is_style_only(&self) -> bool {
        *self == Self::STYLE_CHANGED
    }
}

/// Inputs the cached geometry depends on besides the data itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheKey {
    pub pixel_scale: PixelScale,
    /// Stroke width in pixels.
    pub line_width: f32,
    pub data_len: usize,
}

impl CacheKey {
    pub fn new(pixel_scale: PixelScale, line_width: f32, data_len: usize) -> Self {
        Self {
            pixel_scale,
            line_width,
            data_len,
        }
    }
}

/// Outcome of a cache lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheLookup {
    /// The cached tessellation can be drawn as is.
    Hit,
    /// Geometry is valid but the stroke was never built.
    MissingStroke,
    /// Everything must be rebuilt.
    Miss,
}

/// Memoized tessellation for one series.
#[derive(Debug, Clone)]
pub struct DrawCache {
    key: Option<CacheKey>,
    tessellation: Tessellation,
    dirty: CacheDirtyFlags,
    enabled: bool,
    hits: u64,
    misses: u64,
    stroke_upgrades: u64,
}

impl Default for DrawCache {
    fn default() -> Self {
        Self::new(true)
    }
}

impl DrawCache {
    /// Create an empty cache. A disabled cache misses on every lookup.
    pub fn new(enabled: bool) -> Self {
        Self {
            key: None,
            tessellation: Tessellation::empty(),
            dirty: CacheDirtyFlags::all(),
            enabled,
            hits: 0,
            misses: 0,
            stroke_upgrades: 0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.invalidate();
    }

    /// Get the dirty flags.
    pub fn dirty_flags(&self) -> CacheDirtyFlags {
        self.dirty
    }

    /// Mark the cache as needing a full rebuild.
    pub fn invalidate(&mut self) {
        self.dirty = CacheDirtyFlags::all();
    }

    pub fn mark_data_changed(&mut self) {
        self.dirty |= CacheDirtyFlags::DATA_CHANGED;
    }

    pub fn mark_config_changed(&mut self) {
        self.dirty |= CacheDirtyFlags::CONFIG_CHANGED;
    }

    pub fn mark_style_changed(&mut self) {
        self.dirty |= CacheDirtyFlags::STYLE_CHANGED;
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn stroke_upgrades(&self) -> u64 {
        self.stroke_upgrades
    }

    /// The cached tessellation, if one has been stored.
    pub fn entry(&self) -> Option<&Tessellation> {
        self.key.map(|_| &self.tessellation)
    }

    /// Decide whether the cached tessellation can serve a draw with `key`.
    pub fn lookup(&mut self, key: &CacheKey, with_stroke: bool) -> CacheLookup {
        if !self.enabled || self.dirty.needs_rebuild() || self.key.as_ref() != Some(key) {
            self.misses += 1;
            tracing::debug!(?key, dirty = ?self.dirty, "draw cache miss");
            return CacheLookup::Miss;
        }

        // Style changes never touch geometry.
        self.dirty.remove(CacheDirtyFlags::STYLE_CHANGED);

        if with_stroke && self.tessellation.stroke.is_none() {
            self.stroke_upgrades += 1;
            tracing::debug!("draw cache stroke upgrade");
            return CacheLookup::MissingStroke;
        }

        self.hits += 1;
        CacheLookup::Hit
    }

    /// Replace the cached tessellation and clear the dirty flags.
    pub fn store(&mut self, key: CacheKey, tessellation: Tessellation) -> &Tessellation {
        self.key = Some(key);
        self.dirty = CacheDirtyFlags::empty();
        self.tessellation = tessellation;
        &self.tessellation
    }

    /// Attach a stroke to the cached tessellation, keeping its fill.
    pub fn upgrade_stroke(&mut self, stroke: StrokeData) -> &Tessellation {
        self.tessellation.stroke = Some(stroke);
        &self.tessellation
    }

    /// Look up `key`, rebuilding whatever is missing.
    ///
    /// `build` produces a complete tessellation on a miss. `build_stroke`
    /// receives the cached tessellation when only its stroke is missing.
    pub fn get_or_build<B, S>(
        &mut self,
        key: CacheKey,
        with_stroke: bool,
        build: B,
        build_stroke: S,
    ) -> TessellationResult<(&Tessellation, CacheLookup)>
    where
        B: FnOnce() -> TessellationResult<Tessellation>,
        S: FnOnce(&Tessellation) -> TessellationResult<StrokeData>,
    {
        let lookup = self.lookup(&key, with_stroke);
        match lookup {
            CacheLookup::Hit => {}
            CacheLookup::MissingStroke => {
                let stroke = build_stroke(&self.tessellation)?;
                self.upgrade_stroke(stroke);
            }
            CacheLookup::Miss => {
                let tessellation = build()?;
                self.store(key, tessellation);
            }
        }
        Ok((&self.tessellation, lookup))
    }
}
