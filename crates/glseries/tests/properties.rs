//! Randomized, table-driven checks of tessellator invariants.
//!
//! Every case is generated from a fixed seed so failures reproduce.

use glseries::{
    AreaSample, AreaTessellator, LineTessellator, Orientation, PointSample, PointTessellator,
    Symbol, geometry::miter_join, point::circle_radius,
};
use glseries_core::{PixelScale, PrimitiveKind, TessellationConfig};
use glam::Vec2;
use rand::{Rng, SeedableRng, rngs::StdRng};

const SEEDS: [u64; 8] = [1, 2, 3, 5, 8, 13, 21, 34];
const PIXEL: PixelScale = PixelScale::new(0.004, 0.005);

/// Random points in NDC with roughly `gap_rate` of them undefined.
fn random_points(rng: &mut StdRng, len: usize, gap_rate: f64) -> Vec<Option<Vec2>> {
    (0..len)
        .map(|_| {
            if rng.random_bool(gap_rate) {
                None
            } else {
                Some(Vec2::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0)))
            }
        })
        .collect()
}

/// Lengths of the maximal defined runs, and the number of undefined runs.
fn runs(points: &[Option<Vec2>]) -> (Vec<usize>, usize) {
    let mut defined = Vec::new();
    let mut gaps = 0;
    let mut current = 0;
    let mut in_gap = false;
    for point in points {
        match point {
            Some(_) => {
                current += 1;
                in_gap = false;
            }
            None => {
                if current > 0 {
                    defined.push(current);
                    current = 0;
                }
                if !in_gap {
                    gaps += 1;
                    in_gap = true;
                }
            }
        }
    }
    if current > 0 {
        defined.push(current);
    }
    (defined, gaps)
}

#[test]
fn test_thin_line_batches_follow_defined_runs() {
    let tessellator = LineTessellator::new(1.0, &TessellationConfig::default());
    for seed in SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let len = rng.random_range(10..210);
        let points = random_points(&mut rng, len, 0.1);
        let (expected, gaps) = runs(&points);

        let geometry = tessellator.tessellate(&points, PIXEL).unwrap();

        assert_eq!(geometry.kind, PrimitiveKind::LineStrip);
        assert!(geometry.batches.len() <= gaps + 1, "seed {seed}");
        let counts: Vec<usize> = geometry.batches.iter().map(|b| b.count).collect();
        assert_eq!(counts, expected, "seed {seed}");
    }
}

#[test]
fn test_thick_line_batches_are_rebased() {
    let tessellator = LineTessellator::new(5.0, &TessellationConfig::default());
    for seed in SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let points = random_points(&mut rng, 150, 0.15);
        let (expected, gaps) = runs(&points);

        let geometry = tessellator.tessellate(&points, PIXEL).unwrap();

        assert_eq!(geometry.kind, PrimitiveKind::TriangleStrip);
        assert!(geometry.batches.len() <= gaps + 1);
        let counts: Vec<usize> = geometry.batches.iter().map(|b| b.count).collect();
        let doubled: Vec<usize> = expected.iter().filter(|&&n| n >= 2).map(|n| n * 2).collect();
        assert_eq!(counts, doubled, "seed {seed}");

        let mut offset = 0;
        for batch in &geometry.batches {
            assert_eq!(batch.offset, offset);
            offset += batch.count;
        }
        assert_eq!(offset, geometry.vertex_count());
        assert!(geometry.vertices.iter().all(|v| v.is_finite()));
    }
}

#[test]
fn test_area_fill_size_counts_crossovers() {
    let tessellator =
        AreaTessellator::new(Orientation::Vertical, 1.0, &TessellationConfig::default());
    for seed in SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let samples: Vec<Option<AreaSample>> = (0..120)
            .map(|i| {
                if rng.random_bool(0.08) {
                    return None;
                }
                let x = i as f32 / 60.0 - 1.0;
                // Exact zeros exercise the unsigned case.
                let y = if rng.random_bool(0.05) {
                    0.0
                } else {
                    rng.random_range(-1.0..1.0)
                };
                Some(AreaSample::new(Vec2::new(x, y), Vec2::new(x, 0.0)))
            })
            .collect();

        let sign = |s: &AreaSample| {
            let d = s.main.y - s.base.y;
            (d != 0.0).then_some(d > 0.0)
        };
        let defined = samples.iter().flatten().count();
        let crossovers = samples
            .windows(2)
            .filter(|pair| match (pair[0], pair[1]) {
                (Some(a), Some(b)) => matches!((sign(&a), sign(&b)), (Some(x), Some(y)) if x != y),
                _ => false,
            })
            .count();

        assert_eq!(tessellator.count_crossovers(&samples), crossovers, "seed {seed}");
        let fill = tessellator.tessellate_fill(&samples).unwrap();
        assert_eq!(fill.vertices.len(), 4 * defined + 4 * crossovers, "seed {seed}");
    }
}

#[test]
fn test_miter_is_finite_and_limited() {
    let limit = TessellationConfig::default().miter_limit;
    for seed in SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..200 {
            let mut point = || {
                Vec2::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0))
            };
            let (a, b, c) = (point(), point(), point());
            if let Some(n) = miter_join(Some(a), b, Some(c), PIXEL, limit) {
                assert!(n.is_finite());
                assert!(n.length() <= limit + 1e-4);
                assert!(n.length() >= 1.0 - 1e-4);
            }
        }
    }
}

#[test]
fn test_circle_triangle_count() {
    let config = TessellationConfig::default();
    let tessellator = PointTessellator::new(&Symbol::Circle, &config);
    for seed in SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let samples: Vec<PointSample> = (0..40)
            .map(|_| {
                let size = if rng.random_bool(0.1) {
                    0.0
                } else {
                    rng.random_range(1.0..900.0)
                };
                PointSample::new(Vec2::ZERO, size)
            })
            .collect();

        let expected: usize = samples
            .iter()
            .map(|s| circle_radius(s.size))
            .filter(|&r| r > 0)
            .map(|r| (2 * r).max(config.min_circle_segments) as usize * 3)
            .sum();

        let geometry = tessellator.tessellate(&samples, PIXEL).unwrap();
        assert_eq!(geometry.vertex_count(), expected, "seed {seed}");
    }
}
