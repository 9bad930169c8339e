//! Scale contract.
//!
//! Scale math lives outside the engine. A scale maps a domain value to a
//! position in its output range (usually pixels); the engine only ever asks
//! for that mapping and for the range bounds.

/// A domain-to-range mapping supplied by the charting layer.
pub trait Scale {
    /// Map `value` (the datum at `index`) into range units.
    fn apply(&self, value: f32, index: usize) -> f32;

    /// Output range `(start, end)`. The order follows the axis direction.
    fn range(&self) -> (f32, f32);
}

impl<S: Scale + ?Sized> Scale for &S {
    fn apply(&self, value: f32, index: usize) -> f32 {
        (**self).apply(value, index)
    }

    fn range(&self) -> (f32, f32) {
        (**self).range()
    }
}

/// Continuous linear scale. Enough for tests, benches and simple charts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: (f32, f32),
    pub range: (f32, f32),
}

impl LinearScale {
    pub const fn new(domain: (f32, f32), range: (f32, f32)) -> Self {
        Self { domain, range }
    }

    /// Identity over NDC: domain and range are both `[-1, 1]`.
    pub const fn ndc() -> Self {
        Self::new((-1.0, 1.0), (-1.0, 1.0))
    }
}

impl Scale for LinearScale {
    fn apply(&self, value: f32, _index: usize) -> f32 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return (r0 + r1) * 0.5;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    fn range(&self) -> (f32, f32) {
        self.range
    }
}

/// A scale re-targeted at NDC: its range is stretched onto `[-1, 1]`.
#[derive(Clone, Copy)]
pub struct NdcScale<'a> {
    inner: &'a dyn Scale,
    start: f32,
    span: f32,
}

impl std::fmt::Debug for NdcScale<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NdcScale")
            .field("start", &self.start)
            .field("span", &self.span)
            .finish()
    }
}

impl<'a> NdcScale<'a> {
    pub fn new(inner: &'a dyn Scale) -> Self {
        let (start, end) = inner.range();
        Self {
            inner,
            start,
            span: end - start,
        }
    }

    /// Project `value` into NDC.
    #[inline]
    pub fn project(&self, value: f32, index: usize) -> f32 {
        let position = self.inner.apply(value, index);
        (position - self.start) / self.span * 2.0 - 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_scale() {
        let scale = LinearScale::new((0.0, 10.0), (0.0, 100.0));
        assert_eq!(scale.apply(5.0, 0), 50.0);
        assert_eq!(scale.apply(-1.0, 0), -10.0);
    }

    #[test]
    fn test_ndc_projection_handles_inverted_range() {
        let scale = LinearScale::new((0.0, 10.0), (300.0, 0.0));
        let ndc = NdcScale::new(&scale);
        assert_eq!(ndc.project(0.0, 0), -1.0);
        assert_eq!(ndc.project(10.0, 0), 1.0);
        assert_eq!(ndc.project(5.0, 0), 0.0);
    }

    #[test]
    fn test_ndc_identity() {
        let scale = LinearScale::ndc();
        let ndc = NdcScale::new(&scale);
        assert_eq!(ndc.project(0.25, 3), 0.25);
    }
}
