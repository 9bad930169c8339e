use super::{DrawStats, XyConfig, checked_pixel};
use crate::{
    DrawCache, LineTessellator, Style, TessellationResult,
    cache::CacheKey,
    dispatch::dispatch,
    vertex::{StrokeData, Tessellation},
};
use glam::Vec2;
use glseries_core::{Rasterizer, Scale, profiling::profile_scope};

/// A polyline through the main values, broken at undefined data.
///
/// Default style: black 1px stroke.
#[derive(Debug)]
pub struct LineSeries<D> {
    config: XyConfig<D>,
    pub(super) cache: DrawCache,
}

impl<D: 'static> LineSeries<D> {
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
        profile_scope!("line_series_draw");

        let style = self.config.style(data, Style::line());
        if style.visible_stroke().is_none() {
            return Ok(DrawStats::default());
        }

        let scales = rasterizer.apply_scales(x_scale, y_scale);
        let pixel = checked_pixel(scales.pixel)?;
        let tessellator = LineTessellator::new(style.stroke_width_px(), self.config.tessellation());
        let config = &self.config;
        let build_line = || {
            let points: Vec<Option<Vec2>> = data
                .iter()
                .enumerate()
                .map(|(i, d)| config.project_point(d, i, &scales))
                .collect();
            tessellator.tessellate(&points, pixel)
        };

        let key = CacheKey::new(pixel, style.stroke_width_px(), data.len());
        let (tessellation, lookup) = self.cache.get_or_build(
            key,
            true,
            || Ok(Tessellation::stroke_only(build_line()?, pixel)),
            |_| Ok(StrokeData::Outline(build_line()?)),
        )?;

        let counts = dispatch(rasterizer, tessellation, &style);
        Ok(DrawStats::new(lookup, counts, tessellation))
    }

    /// Draw pre-projected interleaved `[x0, y0, x1, y1, ..]` NDC data as one
    /// unbroken line. The scales only provide the pixel scale.
    ///
    /// The cache is keyed on the point count; call
    /// [`mark_data_changed`](Self::mark_data_changed) after changing values.
    pub fn draw_raw<R: Rasterizer + ?Sized>(
        &mut self,
        interleaved: &[f32],
        x_scale: &dyn Scale,
        y_scale: &dyn Scale,
        rasterizer: &mut R,
    ) -> TessellationResult<DrawStats> {
        profile_scope!("line_series_draw_raw");

        let style = self.config.style(&[], Style::line());
        if style.visible_stroke().is_none() {
            return Ok(DrawStats::default());
        }

        let pixel = checked_pixel(rasterizer.apply_scales(x_scale, y_scale).pixel)?;
        let tessellator = LineTessellator::new(style.stroke_width_px(), self.config.tessellation());
        let key = CacheKey::new(pixel, style.stroke_width_px(), interleaved.len() / 2);
        let (tessellation, lookup) = self.cache.get_or_build(
            key,
            true,
            || {
                let line = tessellator.tessellate_raw(interleaved, pixel)?;
                Ok(Tessellation::stroke_only(line, pixel))
            },
            |_| Ok(StrokeData::Outline(tessellator.tessellate_raw(interleaved, pixel)?)),
        )?;

        let counts = dispatch(rasterizer, tessellation, &style);
        Ok(DrawStats::new(lookup, counts, tessellation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glseries_core::{Color, LinearScale, PrimitiveKind};
    use glseries_test_utils::MockRasterizer;

    fn series() -> LineSeries<Vec2> {
        LineSeries::new(XyConfig::default())
    }

    fn cached_series() -> LineSeries<Vec2> {
        let tessellation = glseries_core::TessellationConfig::default().with_cache(true);
        LineSeries::new(XyConfig::default().with_tessellation(tessellation))
    }

    #[test]
    fn test_thin_line_draws_strip_batches() {
        let mut mock = MockRasterizer::new();
        let scale = LinearScale::ndc();
        let data = [
            Vec2::new(-1.0, 0.0),
            Vec2::new(0.0, f32::NAN),
            Vec2::new(0.2, 0.5),
            Vec2::new(0.4, 0.0),
        ];

        let stats = series().draw(&data, &scale, &scale, &mut mock).unwrap();

        assert_eq!(stats.stroke_batches, 2);
        assert_eq!(stats.fill_batches, 0);
        assert_eq!(mock.count_kind(PrimitiveKind::LineStrip), 2);
        assert_eq!(mock.drawn_vertex_count(), 3);
    }

    #[test]
    fn test_thick_line_uses_triangle_strip() {
        let mut mock = MockRasterizer::new();
        let scale = LinearScale::new((0.0, 10.0), (0.0, 500.0));
        let data: Vec<Vec2> = (0..10).map(|i| Vec2::new(i as f32, (i % 3) as f32)).collect();
        let mut series = LineSeries::new(
            XyConfig::default().with_decorate(|_, _| Style::line().with_stroke(Color::BLACK, 3)),
        );

        let stats = series.draw(&data, &scale, &scale, &mut mock).unwrap();

        assert_eq!(stats.vertex_count, 20);
        assert_eq!(mock.count_kind(PrimitiveKind::TriangleStrip), 1);
        assert!(!mock.has_non_finite());
    }

    #[test]
    fn test_second_draw_hits_cache() {
        let mut mock = MockRasterizer::new();
        let scale = LinearScale::ndc();
        let data = [Vec2::new(0.0, 0.0), Vec2::new(0.5, 0.5)];
        let mut series = cached_series();

        assert!(!series.draw(&data, &scale, &scale, &mut mock).unwrap().cache_hit);
        assert!(series.draw(&data, &scale, &scale, &mut mock).unwrap().cache_hit);

        series.mark_data_changed();
        assert!(!series.draw(&data, &scale, &scale, &mut mock).unwrap().cache_hit);
    }

    #[test]
    fn test_in_place_edit_redraws_by_default() {
        let mut mock = MockRasterizer::new();
        let scale = LinearScale::ndc();
        let mut data = [Vec2::new(-0.5, 0.0), Vec2::new(0.0, 0.0), Vec2::new(0.5, 0.0)];
        let mut series = series();

        series.draw(&data, &scale, &scale, &mut mock).unwrap();
        data[1].y = 0.5;
        mock.clear_calls();

        let stats = series.draw(&data, &scale, &scale, &mut mock).unwrap();
        assert!(!stats.cache_hit);
        let expected: &[f32] = &[-0.5, 0.0, 0.0, 0.5, 0.5, 0.0];
        assert_eq!(mock.calls()[0].drawn_floats(), expected);
    }

    #[test]
    fn test_set_config_invalidates() {
        let mut mock = MockRasterizer::new();
        let scale = LinearScale::ndc();
        let data = [Vec2::new(0.0, 0.0), Vec2::new(0.5, 0.5)];
        let mut series = series();

        series.draw(&data, &scale, &scale, &mut mock).unwrap();
        series.set_config(XyConfig::default());
        assert!(!series.draw(&data, &scale, &scale, &mut mock).unwrap().cache_hit);
    }

    #[test]
    fn test_raw_data_is_one_batch() {
        let mut mock = MockRasterizer::new();
        let scale = LinearScale::ndc();
        let raw = [-1.0, -1.0, 0.0, 0.5, 1.0, -1.0];

        let stats = series().draw_raw(&raw, &scale, &scale, &mut mock).unwrap();

        assert_eq!(stats.stroke_batches, 1);
        assert_eq!(mock.drawn_vertex_count(), 3);
    }

    #[test]
    fn test_hidden_stroke_draws_nothing() {
        let mut mock = MockRasterizer::new();
        let scale = LinearScale::ndc();
        let mut series = LineSeries::new(
            XyConfig::<Vec2>::default().with_decorate(|_, _| Style::line().without_stroke()),
        );

        let stats = series
            .draw(&[Vec2::ZERO, Vec2::ONE], &scale, &scale, &mut mock)
            .unwrap();
        assert_eq!(stats, DrawStats::default());
        assert_eq!(mock.call_count(), 0);
    }
}
