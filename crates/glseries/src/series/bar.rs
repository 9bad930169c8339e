use super::{Accessor, DrawStats, XyConfig, XyDatum, checked_pixel};
use crate::{
    Align, BarSample, BarTessellator, DrawCache, Style, TessellationResult,
    cache::CacheKey,
    dispatch::dispatch,
    vertex::StrokeData,
};
use glseries_core::{Rasterizer, Scale, profiling::profile_scope};
use std::sync::Arc;

/// Bar width in pixels when no accessor is set.
const DEFAULT_BANDWIDTH: f32 = 5.0;

/// Bar configuration: the shared accessors plus bar width and alignment.
pub struct BarConfig<D> {
    pub xy: XyConfig<D>,
    bandwidth: Accessor<D>,
    align: Align,
}

impl<D> Clone for BarConfig<D> {
    fn clone(&self) -> Self {
        Self {
            xy: self.xy.clone(),
            bandwidth: Arc::clone(&self.bandwidth),
            align: self.align,
        }
    }
}

impl<D> std::fmt::Debug for BarConfig<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BarConfig")
            .field("xy", &self.xy)
            .field("align", &self.align)
            .finish()
    }
}

impl<D: XyDatum + 'static> Default for BarConfig<D> {
    fn default() -> Self {
        Self::new(XyConfig::default())
    }
}

impl<D: 'static> BarConfig<D> {
    pub fn new(xy: XyConfig<D>) -> Self {
        Self {
            xy,
            bandwidth: Arc::new(|_: &D, _: usize| DEFAULT_BANDWIDTH),
            align: Align::default(),
        }
    }

    /// Bar width in pixels, per datum.
    pub fn with_bandwidth(
        mut self,
        bandwidth: impl Fn(&D, usize) -> f32 + Send + Sync + 'static,
    ) -> Self {
        self.bandwidth = Arc::new(bandwidth);
        self
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn align(&self) -> Align {
        self.align
    }
}

/// One rectangle per datum, spanning from the base value to the main value.
///
/// Default style: dark gray fill, no stroke.
#[derive(Debug)]
pub struct BarSeries<D> {
    config: BarConfig<D>,
    pub(super) cache: DrawCache,
}

impl<D: 'static> BarSeries<D> {
    pub fn new(config: BarConfig<D>) -> Self {
        Self {
            cache: DrawCache::new(config.xy.tessellation().cache_enabled),
            config,
        }
    }

    pub fn config(&self) -> &BarConfig<D> {
        &self.config
    }

    /// Install a new configuration; the next draw rebuilds.
    pub fn set_config(&mut self, config: BarConfig<D>) {
        self.cache.set_enabled(config.xy.tessellation().cache_enabled);
        self.cache.mark_config_changed();
        self.config = config;
    }

    pub fn cache(&self) -> &DrawCache {
        &self.cache
    }

    pub fn mark_data_changed(&mut self) {
        self.cache.mark_data_changed();
    }

    pub fn mark_style_changed(&mut self) {
        self.cache.mark_style_changed();
    }

    pub fn draw<R: Rasterizer + ?Sized>(
        &mut self,
        data: &[D],
        x_scale: &dyn Scale,
        y_scale: &dyn Scale,
        rasterizer: &mut R,
    ) -> TessellationResult<DrawStats> {
        profile_scope!("bar_series_draw");

        let style = self.config.xy.style(data, Style::bar());
        let with_stroke = style.visible_stroke().is_some();
        if style.visible_fill().is_none() && !with_stroke {
            return Ok(DrawStats::default());
        }

        let scales = rasterizer.apply_scales(x_scale, y_scale);
        let pixel = checked_pixel(scales.pixel)?;
        let tessellator = BarTessellator::new(self.config.xy.orientation(), self.config.align);
        let config = &self.config;
        let bars = || -> Vec<BarSample> {
            data.iter()
                .enumerate()
                .filter_map(|(i, d)| {
                    let p = config.xy.project(config.xy.values(d, i)?, i, &scales);
                    Some(BarSample::new(p.cross, p.main, p.base, (config.bandwidth)(d, i)))
                })
                .collect()
        };

        let key = CacheKey::new(pixel, style.stroke_width_px(), data.len());
        let (tessellation, lookup) = self.cache.get_or_build(
            key,
            with_stroke,
            || tessellator.tessellate(&bars(), with_stroke, pixel),
            |_| {
                let outline = tessellator.tessellate_outline(&bars(), pixel)?;
                Ok(StrokeData::Outline(outline))
            },
        )?;

        let counts = dispatch(rasterizer, tessellation, &style);
        Ok(DrawStats::new(lookup, counts, tessellation))
    }
}
