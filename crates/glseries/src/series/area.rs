use super::{DrawStats, XyConfig, checked_pixel};
use crate::{
    AreaSample, AreaTessellator, DrawCache, Style, TessellationResult,
    cache::CacheKey,
    dispatch::dispatch,
    vertex::StrokeData,
};
use glseries_core::{Rasterizer, Scale, profiling::profile_scope};

/// The region between the main values and the base values.
///
/// Default style: light gray fill, no stroke. A stroke traces the main
/// values only.
#[derive(Debug)]
pub struct AreaSeries<D> {
    config: XyConfig<D>,
    pub(super) cache: DrawCache,
}

impl<D: 'static> AreaSeries<D> {
    pub fn new(config: XyConfig<D>) -> Self {
        Self {
            cache: DrawCache::new(config.tessellation().cache_enabled),
            config,
        }
    }

    pub fn config(&self) -> &XyConfig<D> {
        &self.config
    }

    /// Install a new configuration; the next draw rebuilds.
    pub fn set_config(&mut self, config: XyConfig<D>) {
        self.cache.set_enabled(config.tessellation().cache_enabled);
        self.cache.mark_config_changed();
        self.config = config;
    }

    pub fn cache(&self) -> &DrawCache {
        &self.cache
    }

    pub fn mark_data_changed(&mut self) {
        self.cache.mark_data_changed();
    }

    /// Colors changed; geometry is kept.
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
        profile_scope!("area_series_draw");

        let style = self.config.style(data, Style::area());
        let with_stroke = style.visible_stroke().is_some();
        if style.visible_fill().is_none() && !with_stroke {
            return Ok(DrawStats::default());
        }

        let scales = rasterizer.apply_scales(x_scale, y_scale);
        let pixel = checked_pixel(scales.pixel)?;
        let orientation = self.config.orientation();
        let tessellator = AreaTessellator::new(
            orientation,
            style.stroke_width_px(),
            self.config.tessellation(),
        );
        let config = &self.config;
        let samples = || -> Vec<Option<AreaSample>> {
            data.iter()
                .enumerate()
                .map(|(i, d)| {
                    let p = config.project(config.values(d, i)?, i, &scales);
                    Some(AreaSample::new(
                        orientation.point(p.cross, p.main),
                        orientation.point(p.cross, p.base),
                    ))
                })
                .collect()
        };

        let key = CacheKey::new(pixel, style.stroke_width_px(), data.len());
        let (tessellation, lookup) = self.cache.get_or_build(
            key,
            with_stroke,
            || tessellator.tessellate(&samples(), with_stroke, pixel),
            |_| {
                let stroke = tessellator.tessellate_stroke(&samples(), pixel)?;
                Ok(StrokeData::Outline(stroke))
            },
        )?;

        let counts = dispatch(rasterizer, tessellation, &style);
        Ok(DrawStats::new(lookup, counts, tessellation))
    }
}
