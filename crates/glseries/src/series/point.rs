use super::{Accessor, DrawStats, XyConfig, XyDatum, checked_pixel};
use crate::{
    DrawCache, PointSample, PointTessellator, Style, Symbol, TessellationResult,
    cache::CacheKey,
    dispatch::dispatch,
    point::edge_buffer,
    vertex::{StrokeData, Tessellation},
};
use glseries_core::{Rasterizer, Scale, profiling::profile_scope};
use std::sync::Arc;

/// Symbol area in square pixels when no accessor is set.
const DEFAULT_SIZE: f32 = 64.0;

/// Point configuration: the shared accessors plus symbol and size.
pub struct PointConfig<D> {
    pub xy: XyConfig<D>,
    size: Accessor<D>,
    symbol: Symbol,
}

impl<D> Clone for PointConfig<D> {
    fn clone(&self) -> Self {
        Self {
            xy: self.xy.clone(),
            size: Arc::clone(&self.size),
            symbol: self.symbol.clone(),
        }
    }
}

impl<D> std::fmt::Debug for PointConfig<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointConfig")
            .field("xy", &self.xy)
            .field("symbol", &self.symbol)
            .finish()
    }
}

impl<D: XyDatum + 'static> Default for PointConfig<D> {
    fn default() -> Self {
        Self::new(XyConfig::default())
    }
}

impl<D: 'static> PointConfig<D> {
    pub fn new(xy: XyConfig<D>) -> Self {
        Self {
            xy,
            size: Arc::new(|_: &D, _: usize| DEFAULT_SIZE),
            symbol: Symbol::default(),
        }
    }

    /// Symbol area in square pixels, per datum.
    pub fn with_size(mut self, size: impl Fn(&D, usize) -> f32 + Send + Sync + 'static) -> Self {
        self.size = Arc::new(size);
        self
    }

    pub fn with_symbol(mut self, symbol: Symbol) -> Self {
        self.symbol = symbol;
        self
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }
}

/// A symbol at every defined datum.
///
/// Default style: dark gray fill, no stroke. A stroke is drawn as a ring
/// inside each symbol's edge by the rasterizer's edge pipeline.
#[derive(Debug)]
pub struct PointSeries<D> {
    config: PointConfig<D>,
    pub(super) cache: DrawCache,
}

impl<D: 'static> PointSeries<D> {
    pub fn new(config: PointConfig<D>) -> Self {
        Self {
            cache: DrawCache::new(config.xy.tessellation().cache_enabled),
            config,
        }
    }

    pub fn config(&self) -> &PointConfig<D> {
        &self.config
    }

    /// Install a new configuration; the next draw rebuilds.
    pub fn set_config(&mut self, config: PointConfig<D>) {
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
        profile_scope!("point_series_draw");

        let style = self.config.xy.style(data, Style::point());
        let with_stroke = style.visible_stroke().is_some();
        if style.visible_fill().is_none() && !with_stroke {
            return Ok(DrawStats::default());
        }

        let scales = rasterizer.apply_scales(x_scale, y_scale);
        let pixel = checked_pixel(scales.pixel)?;
        let stroke_width = style.stroke_width_px();
        let config = &self.config;
        let build = || -> TessellationResult<Tessellation> {
            let samples: Vec<PointSample> = data
                .iter()
                .enumerate()
                .filter_map(|(i, d)| {
                    let center = config.xy.project_point(d, i, &scales)?;
                    Some(PointSample::new(center, (config.size)(d, i)))
                })
                .collect();
            let fill = PointTessellator::new(&config.symbol, config.xy.tessellation())
                .tessellate(&samples, pixel)?;
            let stroke = if with_stroke {
                Some(StrokeData::Edges(edge_buffer(&fill, pixel, stroke_width)?))
            } else {
                None
            };
            Ok(Tessellation {
                fill,
                stroke,
                pixel_scale: pixel,
            })
        };

        let key = CacheKey::new(pixel, stroke_width, data.len());
        let (tessellation, lookup) = self.cache.get_or_build(key, with_stroke, build, |cached| {
            Ok(StrokeData::Edges(edge_buffer(&cached.fill, pixel, stroke_width)?))
        })?;

        let counts = dispatch(rasterizer, tessellation, &style);
        Ok(DrawStats::new(lookup, counts, tessellation))
    }
}
