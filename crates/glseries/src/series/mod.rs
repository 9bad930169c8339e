//! Chart series.
//!
//! A series owns an immutable configuration (accessors, orientation,
//! decoration, tessellation tunables) and the [`DrawCache`] for its last
//! tessellation. Each `draw` call resolves the style, projects the data,
//! reuses or rebuilds the tessellation and dispatches it.

pub mod area;
pub mod bar;
pub mod line;
pub mod point;

pub use area::AreaSeries;
pub use bar::{BarConfig, BarSeries};
pub use line::LineSeries;
pub use point::{PointConfig, PointSeries};

use crate::{
    DrawCache, Orientation, Style, TessellationError, TessellationResult,
    cache::CacheLookup, dispatch::DispatchCounts, vertex::Tessellation,
};
use glam::Vec2;
use glseries_core::{PixelScale, ProjectedScales, Rasterizer, Scale, TessellationConfig};
use std::sync::Arc;

/// Reads one value from a datum; the second argument is its index.
pub type Accessor<D> = Arc<dyn Fn(&D, usize) -> f32 + Send + Sync>;

/// Decides whether a datum is drawn.
pub type Predicate<D> = Arc<dyn Fn(&D, usize) -> bool + Send + Sync>;

/// Computes the style for a draw from the whole data set.
pub type Decorate<D> = Arc<dyn Fn(&[D], usize) -> Style + Send + Sync>;

/// Data with a natural x/y pair, used for default accessors.
pub trait XyDatum {
    fn x(&self) -> f32;
    fn y(&self) -> f32;
}

impl XyDatum for Vec2 {
    fn x(&self) -> f32 {
        self.x
    }

    fn y(&self) -> f32 {
        self.y
    }
}

impl XyDatum for (f32, f32) {
    fn x(&self) -> f32 {
        self.0
    }

    fn y(&self) -> f32 {
        self.1
    }
}

impl XyDatum for [f32; 2] {
    fn x(&self) -> f32 {
        self[0]
    }

    fn y(&self) -> f32 {
        self[1]
    }
}

/// Summary of one `draw` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DrawStats {
    /// The cached tessellation was drawn without rebuilding anything.
    pub cache_hit: bool,
    pub fill_batches: usize,
    pub stroke_batches: usize,
    pub vertex_count: usize,
}

impl DrawStats {
    pub(crate) fn new(
        lookup: CacheLookup,
        counts: DispatchCounts,
        tessellation: &Tessellation,
    ) -> Self {
        Self {
            cache_hit: lookup == CacheLookup::Hit,
            fill_batches: counts.fill_batches,
            stroke_batches: counts.stroke_batches,
            vertex_count: tessellation.vertex_count(),
        }
    }
}

/// Raw values read from one datum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct XyValues {
    pub cross: f32,
    pub main: f32,
    pub base: f32,
}

/// Accessors and options shared by every series kind.
pub struct XyConfig<D> {
    cross_value: Accessor<D>,
    main_value: Accessor<D>,
    base_value: Accessor<D>,
    defined: Option<Predicate<D>>,
    decorate: Option<Decorate<D>>,
    orientation: Orientation,
    tessellation: TessellationConfig,
}

impl<D> Clone for XyConfig<D> {
    fn clone(&self) -> Self {
        Self {
            cross_value: Arc::clone(&self.cross_value),
            main_value: Arc::clone(&self.main_value),
            base_value: Arc::clone(&self.base_value),
            defined: self.defined.clone(),
            decorate: self.decorate.clone(),
            orientation: self.orientation,
            tessellation: self.tessellation,
        }
    }
}

impl<D> std::fmt::Debug for XyConfig<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XyConfig")
            .field("orientation", &self.orientation)
            .field("tessellation", &self.tessellation)
            .field("has_defined", &self.defined.is_some())
            .field("has_decorate", &self.decorate.is_some())
            .finish()
    }
}

impl<D: XyDatum + 'static> Default for XyConfig<D> {
    fn default() -> Self {
        Self::new(|d: &D, _: usize| d.x(), |d: &D, _: usize| d.y())
    }
}

impl<D: 'static> XyConfig<D> {
    /// Create a configuration reading cross and main values with the given
    /// accessors. The base value defaults to 0.
    pub fn new(
        cross_value: impl Fn(&D, usize) -> f32 + Send + Sync + 'static,
        main_value: impl Fn(&D, usize) -> f32 + Send + Sync + 'static,
    ) -> Self {
        Self {
            cross_value: Arc::new(cross_value),
            main_value: Arc::new(main_value),
            base_value: Arc::new(|_: &D, _: usize| 0.0),
            defined: None,
            decorate: None,
            orientation: Orientation::default(),
            tessellation: TessellationConfig::default(),
        }
    }

    pub fn with_cross_value(
        mut self,
        accessor: impl Fn(&D, usize) -> f32 + Send + Sync + 'static,
    ) -> Self {
        self.cross_value = Arc::new(accessor);
        self
    }

    pub fn with_main_value(
        mut self,
        accessor: impl Fn(&D, usize) -> f32 + Send + Sync + 'static,
    ) -> Self {
        self.main_value = Arc::new(accessor);
        self
    }

    pub fn with_base_value(
        mut self,
        accessor: impl Fn(&D, usize) -> f32 + Send + Sync + 'static,
    ) -> Self {
        self.base_value = Arc::new(accessor);
        self
    }

    /// Skip data the predicate rejects. Data with non-finite values is
    /// always skipped.
    pub fn with_defined(
        mut self,
        predicate: impl Fn(&D, usize) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.defined = Some(Arc::new(predicate));
        self
    }

    /// Compute the style of each draw. Without it the series default is used.
    pub fn with_decorate(
        mut self,
        decorate: impl Fn(&[D], usize) -> Style + Send + Sync + 'static,
    ) -> Self {
        self.decorate = Some(Arc::new(decorate));
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_tessellation(mut self, tessellation: TessellationConfig) -> Self {
        self.tessellation = tessellation;
        self
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn tessellation(&self) -> &TessellationConfig {
        &self.tessellation
    }

    /// Style for this draw: the decorate result, else `default`.
    pub(crate) fn style(&self, data: &[D], default: Style) -> Style {
        self.decorate
            .as_ref()
            .map_or(default, |decorate| decorate(data, 0))
    }

    /// Values of a defined datum.
    pub(crate) fn values(&self, datum: &D, index: usize) -> Option<XyValues> {
        if let Some(defined) = &self.defined
            && !defined(datum, index)
        {
            return None;
        }
        let values = XyValues {
            cross: (self.cross_value)(datum, index),
            main: (self.main_value)(datum, index),
            base: (self.base_value)(datum, index),
        };
        (values.cross.is_finite() && values.main.is_finite() && values.base.is_finite())
            .then_some(values)
    }

    /// Project values into NDC along their axes.
    pub(crate) fn project(
        &self,
        values: XyValues,
        index: usize,
        scales: &ProjectedScales<'_>,
    ) -> XyValues {
        let (cross_scale, main_scale) = match self.orientation {
            Orientation::Vertical => (&scales.x, &scales.y),
            Orientation::Horizontal => (&scales.y, &scales.x),
        };
        XyValues {
            cross: cross_scale.project(values.cross, index),
            main: main_scale.project(values.main, index),
            base: main_scale.project(values.base, index),
        }
    }

    /// Screen position of a datum's main value, if defined.
    pub(crate) fn project_point(
        &self,
        datum: &D,
        index: usize,
        scales: &ProjectedScales<'_>,
    ) -> Option<Vec2> {
        let projected = self.project(self.values(datum, index)?, index, scales);
        Some(self.orientation.point(projected.cross, projected.main))
    }
}

/// Reject pixel scales that cannot convert between pixels and NDC.
pub(crate) fn checked_pixel(pixel: PixelScale) -> TessellationResult<PixelScale> {
    if pixel.is_usable() {
        Ok(pixel)
    } else {
        tracing::warn!(?pixel, "rejecting degenerate pixel scale");
        Err(TessellationError::DegenerateScale {
            x: pixel.x,
            y: pixel.y,
        })
    }
}

/// Any series kind.
pub enum Series<D> {
    Line(LineSeries<D>),
    Area(AreaSeries<D>),
    Bar(BarSeries<D>),
    Point(PointSeries<D>),
}

impl<D: 'static> std::fmt::Debug for Series<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Series")
            .field("kind", &self.kind_name())
            .field("cache", self.cache())
            .finish()
    }
}

impl<D: 'static> Series<D> {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Series::Line(_) => "line",
            Series::Area(_) => "area",
            Series::Bar(_) => "bar",
            Series::Point(_) => "point",
        }
    }

    /// Draw one frame of `data`.
    pub fn draw<R: Rasterizer + ?Sized>(
        &mut self,
        data: &[D],
        x_scale: &dyn Scale,
        y_scale: &dyn Scale,
        rasterizer: &mut R,
    ) -> TessellationResult<DrawStats> {
        match self {
            Series::Line(series) => series.draw(data, x_scale, y_scale, rasterizer),
            Series::Area(series) => series.draw(data, x_scale, y_scale, rasterizer),
            Series::Bar(series) => series.draw(data, x_scale, y_scale, rasterizer),
            Series::Point(series) => series.draw(data, x_scale, y_scale, rasterizer),
        }
    }

    pub fn cache(&self) -> &DrawCache {
        match self {
            Series::Line(series) => series.cache(),
            Series::Area(series) => series.cache(),
            Series::Bar(series) => series.cache(),
            Series::Point(series) => series.cache(),
        }
    }

    fn cache_mut(&mut self) -> &mut DrawCache {
        match self {
            Series::Line(series) => &mut series.cache,
            Series::Area(series) => &mut series.cache,
            Series::Bar(series) => &mut series.cache,
            Series::Point(series) => &mut series.cache,
        }
    }

    /// Force a rebuild on the next draw. Call after mutating data in place.
    pub fn mark_data_changed(&mut self) {
        self.cache_mut().mark_data_changed();
    }

    pub fn mark_style_changed(&mut self) {
        self.cache_mut().mark_style_changed();
    }
}

impl<D> From<LineSeries<D>> for Series<D> {
    fn from(series: LineSeries<D>) -> Self {
        Series::Line(series)
    }
}

impl<D> From<AreaSeries<D>> for Series<D> {
    fn from(series: AreaSeries<D>) -> Self {
        Series::Area(series)
    }
}

impl<D> From<BarSeries<D>> for Series<D> {
    fn from(series: BarSeries<D>) -> Self {
        Series::Bar(series)
    }
}

impl<D> From<PointSeries<D>> for Series<D> {
    fn from(series: PointSeries<D>) -> Self {
        Series::Point(series)
    }
}
