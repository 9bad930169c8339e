//! Vector helpers shared by the tessellators.
//!
//! Everything here is pure and total: degenerate input yields `None` (or a
//! neutral value) instead of `NaN`.

use glam::Vec2;
use glseries_core::PixelScale;

/// Scale `v` to unit length.
///
/// Returns `None` for zero-length or non-finite vectors.
#[inline]
pub fn normalize(v: Vec2) -> Option<Vec2> {
    let length = v.length();
    if length > 0.0 && length.is_finite() {
        Some(v / length)
    } else {
        None
    }
}

/// Unit normal of the segment `p1 -> p2`, i.e. the direction rotated a
/// quarter turn clockwise: `(dy, -dx)`.
#[inline]
pub fn line_normal(p1: Vec2, p2: Vec2) -> Option<Vec2> {
    let d = p2 - p1;
    normalize(Vec2::new(d.y, -d.x))
}

/// Offset direction for the stroke vertex at `cur`, in pixel space.
///
/// Inputs are NDC; they are divided by `pixel` first so the join is computed
/// in isotropic space. The returned vector is the miter direction scaled by
/// the miter length (1 for a straight line); callers multiply it by half the
/// stroke width and convert back with [`PixelScale::to_ndc`].
///
/// Endpoints and points next to a zero-length segment use the single
/// adjacent segment normal. A full reversal, where no miter exists, also
/// falls back to the incoming normal. The length is clamped to
/// `miter_limit`. Returns `None` only when neither neighbor gives a segment.
pub fn miter_join(
    prev: Option<Vec2>,
    cur: Vec2,
    next: Option<Vec2>,
    pixel: PixelScale,
    miter_limit: f32,
) -> Option<Vec2> {
    let c = pixel.to_pixels(cur);
    let incoming = prev.and_then(|p| line_normal(pixel.to_pixels(p), c));
    let outgoing = next.and_then(|n| line_normal(c, pixel.to_pixels(n)));

    match (incoming, outgoing) {
        (Some(n1), Some(n2)) => {
            let Some(miter) = normalize(n1 + n2) else {
                return Some(n1);
            };
            let cos_half = miter.dot(n1);
            if cos_half <= f32::EPSILON {
                return Some(n1);
            }
            Some(miter * (1.0 / cos_half).min(miter_limit))
        }
        (Some(n), None) | (None, Some(n)) => Some(n),
        (None, None) => None,
    }
}

/// Fraction of the way from the previous point to the current one at which
/// a curve crosses its baseline, given each point's signed distance to it.
///
/// Returns 0 when both distances are zero.
#[inline]
pub fn crossover_ratio(last_delta: f32, cur_delta: f32) -> f32 {
    let total = last_delta.abs() + cur_delta.abs();
    if total > 0.0 && total.is_finite() {
        last_delta.abs() / total
    } else {
        0.0
    }
}
