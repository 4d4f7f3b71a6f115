//! Convex hull extraction (Graham scan).
//!
//! Operates on bare `[lng, lat]` pairs so the scan stays independent of
//! the sample metadata. Collinear points are dropped during the scan,
//! so a fully collinear input collapses to its two endpoints and the
//! caller can recognize the degenerate case by the result length.

use std::cmp::Ordering;

/// Cross product of `(b - a) x (c - a)`.
///
/// Positive when the path `a -> b -> c` turns counter-clockwise.
fn cross(a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> f64 {
    (b[0] - a[0]).mul_add(c[1] - a[1], -((b[1] - a[1]) * (c[0] - a[0])))
}

fn squared_distance(a: [f64; 2], b: [f64; 2]) -> f64 {
    let dx = b[0] - a[0];
    let dy = b[1] - a[1];
    dx.mul_add(dx, dy * dy)
}

/// Computes the convex hull of `points` with a Graham scan.
///
/// Returns the hull vertices in counter-clockwise order starting from
/// the bottom-most point, without repeating the first vertex. Inputs
/// with fewer than 3 points are returned as-is; collinear inputs
/// collapse to fewer than 3 vertices.
#[must_use]
pub fn convex_hull(points: &[[f64; 2]]) -> Vec<[f64; 2]> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let mut sorted = points.to_vec();

    // Anchor: lowest latitude, ties broken by lowest longitude.
    let mut anchor = 0;
    for (i, p) in sorted.iter().enumerate().skip(1) {
        if p[1] < sorted[anchor][1] || (p[1] == sorted[anchor][1] && p[0] < sorted[anchor][0]) {
            anchor = i;
        }
    }
    sorted.swap(0, anchor);
    let origin = sorted[0];

    // Sort the rest by polar angle around the anchor; equal angles go
    // nearest-first so duplicates and collinear runs stay stable.
    sorted[1..].sort_by(|a, b| {
        let angle_a = (a[1] - origin[1]).atan2(a[0] - origin[0]);
        let angle_b = (b[1] - origin[1]).atan2(b[0] - origin[0]);
        angle_a.partial_cmp(&angle_b).unwrap_or(Ordering::Equal).then_with(|| {
            squared_distance(origin, *a)
                .partial_cmp(&squared_distance(origin, *b))
                .unwrap_or(Ordering::Equal)
        })
    });

    let mut hull = vec![sorted[0], sorted[1]];
    for &candidate in &sorted[2..] {
        // Pop anything that no longer makes a strict left turn; this is
        // also what discards collinear and duplicate points.
        while hull.len() > 1 && cross(hull[hull.len() - 2], hull[hull.len() - 1], candidate) <= 0.0
        {
            hull.pop();
        }
        hull.push(candidate);
    }

    hull
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_ccw(hull: &[[f64; 2]]) {
        let n = hull.len();
        for i in 0..n {
            let turn = cross(hull[i], hull[(i + 1) % n], hull[(i + 2) % n]);
            assert!(turn > 0.0, "non-left turn at vertex {i}: {turn}");
        }
    }

    #[test]
    fn square_with_interior_point() {
        let points = [
            [0.0, 0.0],
            [1.0, 0.0],
            [1.0, 1.0],
            [0.0, 1.0],
            [0.5, 0.5],
        ];
        let hull = convex_hull(&points);
        assert_eq!(hull.len(), 4);
        assert!(!hull.contains(&[0.5, 0.5]));
        assert_ccw(&hull);
    }

    #[test]
    fn starts_at_bottom_most_point() {
        let points = [[0.0, 1.0], [2.0, 3.0], [1.0, 0.0], [3.0, 2.0]];
        let hull = convex_hull(&points);
        assert_eq!(hull[0], [1.0, 0.0]);
    }

    #[test]
    fn bottom_ties_break_by_longitude() {
        let points = [[2.0, 0.0], [0.0, 0.0], [1.0, 1.0]];
        let hull = convex_hull(&points);
        assert_eq!(hull[0], [0.0, 0.0]);
    }

    #[test]
    fn collinear_points_collapse() {
        let points = [[0.0, 0.0], [1.0, 1.0], [2.0, 2.0], [3.0, 3.0], [4.0, 4.0]];
        let hull = convex_hull(&points);
        assert!(hull.len() < 3, "collinear input produced {} vertices", hull.len());
    }

    #[test]
    fn duplicates_are_dropped_from_hull() {
        let points = [
            [0.0, 0.0],
            [0.0, 0.0],
            [1.0, 0.0],
            [1.0, 0.0],
            [0.5, 1.0],
        ];
        let hull = convex_hull(&points);
        assert_eq!(hull.len(), 3);
        assert_ccw(&hull);
    }

    #[test]
    fn all_identical_points_collapse() {
        let points = [[0.3, 0.3]; 5];
        let hull = convex_hull(&points);
        assert!(hull.len() < 3);
    }

    #[test]
    fn fewer_than_three_points_pass_through() {
        let points = [[0.0, 0.0], [1.0, 1.0]];
        assert_eq!(convex_hull(&points), points.to_vec());
    }

    #[test]
    fn hull_contains_every_input_point() {
        let points = [
            [0.0, 0.0],
            [2.0, 0.1],
            [1.9, 1.8],
            [0.2, 2.1],
            [1.0, 1.0],
            [0.4, 0.9],
            [1.5, 0.3],
        ];
        let hull = convex_hull(&points);
        assert!(hull.len() >= 3);
        let n = hull.len();
        for point in &points {
            for i in 0..n {
                let side = cross(hull[i], hull[(i + 1) % n], *point);
                assert!(side >= -1e-12, "point {point:?} outside edge {i}");
            }
        }
    }
}
