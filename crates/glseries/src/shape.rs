//! Point symbols.
//!
//! Every symbol except [`Symbol::Circle`] is reduced to a unit outline: a
//! polygon around the origin, y pointing up, scaled so its largest
//! coordinate magnitude is 1. The point tessellator fans triangles from the
//! point center over consecutive outline vertices, wrapping at the end.

use glam::Vec2;
use std::f32::consts::{PI, TAU};

/// Symbolic shape drawn at each point.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Symbol {
    /// Tessellated as wedges with a size-dependent segment count.
    #[default]
    Circle,
    Square,
    Diamond,
    Cross,
    /// Pointing up.
    Triangle,
    /// Five pointed.
    Star,
    /// Three-armed "Y".
    Wye,
    RegularPolygon { sides: u32 },
    /// Arbitrary outline in any units; normalized on use.
    Custom(Vec<Vec2>),
}

impl Symbol {
    /// Normalized outline, or `None` for circles.
    ///
    /// A custom outline with no extent yields an empty outline.
    pub fn outline(&self) -> Option<Vec<Vec2>> {
        let raw = match self {
            Symbol::Circle => return None,
            Symbol::Square => vec![
                Vec2::new(-1.0, -1.0),
                Vec2::new(1.0, -1.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(-1.0, 1.0),
            ],
            Symbol::Diamond => {
                let tan30 = (PI / 6.0).tan();
                vec![
                    Vec2::new(0.0, 1.0),
                    Vec2::new(tan30, 0.0),
                    Vec2::new(0.0, -1.0),
                    Vec2::new(-tan30, 0.0),
                ]
            }
            Symbol::Cross => cross_outline(),
            Symbol::Triangle => regular_polygon(3),
            Symbol::Star => star(5, (PI / 10.0).sin() / (7.0 * PI / 10.0).sin()),
            Symbol::Wye => wye_outline(),
            Symbol::RegularPolygon { sides } => regular_polygon((*sides).max(3)),
            Symbol::Custom(points) => points.clone(),
        };
        Some(normalize_outline(raw))
    }
}

/// Scale `points` so the largest coordinate magnitude is 1.
fn normalize_outline(points: Vec<Vec2>) -> Vec<Vec2> {
    let extent = points
        .iter()
        .fold(0.0f32, |max, p| max.max(p.x.abs()).max(p.y.abs()));
    if extent <= 0.0 || !extent.is_finite() {
        return Vec::new();
    }
    points.into_iter().map(|p| p / extent).collect()
}

/// Vertices on the unit circle, the first pointing up, going clockwise.
fn regular_polygon(sides: u32) -> Vec<Vec2> {
    let angle_step = TAU / sides as f32;
    (0..sides)
        .map(|i| {
            let angle = angle_step * i as f32;
            Vec2::new(angle.sin(), angle.cos())
        })
        .collect()
}

fn star(points: u32, inner_radius: f32) -> Vec<Vec2> {
    let angle_step = TAU / (points * 2) as f32;
    (0..points * 2)
        .map(|i| {
            let angle = angle_step * i as f32;
            let radius = if i % 2 == 0 { 1.0 } else { inner_radius };
            Vec2::new(angle.sin(), angle.cos()) * radius
        })
        .collect()
}

/// Plus sign with arms one third of the full width.
fn cross_outline() -> Vec<Vec2> {
    let a = 1.0 / 3.0;
    [
        (-1.0, -a),
        (-a, -a),
        (-a, -1.0),
        (a, -1.0),
        (a, -a),
        (1.0, -a),
        (1.0, a),
        (a, a),
        (a, 1.0),
        (-a, 1.0),
        (-a, a),
        (-1.0, a),
    ]
    .into_iter()
    .map(|(x, y)| Vec2::new(x, y))
    .collect()
}

/// One arm traced outward and back, then rotated by a third of a turn twice.
fn wye_outline() -> Vec<Vec2> {
    let k = 1.0 / 12f32.sqrt();
    let arm = [
        Vec2::new(0.5, -k),
        Vec2::new(0.5, -k - 1.0),
        Vec2::new(-0.5, -k - 1.0),
    ];
    (0..3)
        .flat_map(|turn| {
            let rotation = Vec2::from_angle(TAU / 3.0 * turn as f32);
            arm.into_iter().map(move |p| rotation.rotate(p))
        })
        .collect()
}
