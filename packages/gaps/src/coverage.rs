//! Coverage filtering: which high-density samples fall outside every
//! reading-room service area.
//!
//! The zone test is a brute-force O(samples x zones) scan; the feeds
//! carry hundreds of samples and around two hundred rooms. A spatial
//! index can be swapped in here without changing the contract if the
//! inputs ever grow past that scale.

use reading_map_gaps_models::{CoverageZone, SamplePoint};

/// Planar Euclidean distance between two lon/lat coordinates, in degrees.
#[must_use]
pub fn planar_distance(a_lng: f64, a_lat: f64, b_lng: f64, b_lat: f64) -> f64 {
    let dx = a_lng - b_lng;
    let dy = a_lat - b_lat;
    dx.hypot(dy)
}

/// Whether `point` lies inside at least one service zone.
///
/// A point exactly on a zone boundary counts as covered.
#[must_use]
pub fn is_covered(point: &SamplePoint, zones: &[CoverageZone]) -> bool {
    zones
        .iter()
        .any(|zone| planar_distance(point.lng, point.lat, zone.lng, zone.lat) <= zone.radius)
}

/// Filters `points` down to the uncovered high-density candidate set:
/// samples with weight strictly above `weight_threshold` that no zone
/// covers. Input order is preserved.
#[must_use]
pub fn uncovered_candidates(
    points: &[SamplePoint],
    zones: &[CoverageZone],
    weight_threshold: f64,
) -> Vec<SamplePoint> {
    points
        .iter()
        .filter(|point| point.weight > weight_threshold && !is_covered(point, zones))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_distance_is_covered() {
        let zone = CoverageZone::new(0.0, 0.0, 1.0);
        let on_edge = SamplePoint::new(1.0, 0.0, 90.0);
        let outside = SamplePoint::new(1.0 + 1e-9, 0.0, 90.0);
        assert!(is_covered(&on_edge, &[zone]));
        assert!(!is_covered(&outside, &[zone]));
    }

    #[test]
    fn any_zone_suffices() {
        let zones = [
            CoverageZone::new(10.0, 10.0, 0.5),
            CoverageZone::new(0.0, 0.0, 0.5),
        ];
        let point = SamplePoint::new(0.1, 0.1, 90.0);
        assert!(is_covered(&point, &zones));
    }

    #[test]
    fn threshold_is_strict() {
        let points = [
            SamplePoint::new(0.0, 0.0, 80.0),
            SamplePoint::new(0.1, 0.0, 80.1),
        ];
        let candidates = uncovered_candidates(&points, &[], 80.0);
        assert_eq!(candidates.len(), 1);
        assert!((candidates[0].weight - 80.1).abs() < f64::EPSILON);
    }

    #[test]
    fn covered_points_are_excluded() {
        let zone = CoverageZone::new(112.45, 34.62, 0.008);
        let points = [
            SamplePoint::new(112.451, 34.621, 95.0),
            SamplePoint::new(112.50, 34.70, 95.0),
        ];
        let candidates = uncovered_candidates(&points, &[zone], 80.0);
        assert_eq!(candidates.len(), 1);
        assert!((candidates[0].lng - 112.50).abs() < f64::EPSILON);
    }

    #[test]
    fn no_zones_keeps_all_high_weight() {
        let points = [
            SamplePoint::new(0.0, 0.0, 90.0),
            SamplePoint::new(1.0, 1.0, 50.0),
        ];
        let candidates = uncovered_candidates(&points, &[], 80.0);
        assert_eq!(candidates.len(), 1);
    }
}
