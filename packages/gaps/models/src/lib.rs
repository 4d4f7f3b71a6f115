#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geometry types for reading-room coverage gap analysis.
//!
//! These types describe the inputs and outputs of the gap detector:
//! weighted population samples, circular service areas around reading
//! rooms, and the convex gap polygons the detector emits. They are
//! independent of where the data comes from (JSON feed, API) and of how
//! the polygons are rendered.

use serde::{Deserialize, Serialize};

/// A population-density sample at a map coordinate.
///
/// Coordinates are WGS-84 longitude/latitude degrees; the weight is a
/// bounded density proxy (the heatmap feed uses 0-100).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SamplePoint {
    /// Longitude in degrees.
    pub lng: f64,
    /// Latitude in degrees.
    pub lat: f64,
    /// Non-negative density weight.
    pub weight: f64,
}

impl SamplePoint {
    /// Creates a sample at `(lng, lat)` with the given weight.
    #[must_use]
    pub const fn new(lng: f64, lat: f64, weight: f64) -> Self {
        Self { lng, lat, weight }
    }
}

/// A circular service area around one reading room.
///
/// The radius is expressed in the same planar degree units as the
/// coordinates, not in meters; see the feed package for the meter
/// conversion used by the Luoyang data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageZone {
    /// Center longitude in degrees.
    pub lng: f64,
    /// Center latitude in degrees.
    pub lat: f64,
    /// Non-negative service radius in degrees.
    pub radius: f64,
}

impl CoverageZone {
    /// Creates a zone centered at `(lng, lat)` with the given radius.
    #[must_use]
    pub const fn new(lng: f64, lat: f64, radius: f64) -> Self {
        Self { lng, lat, radius }
    }
}

/// Tuning parameters for the gap detector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GapParams {
    /// Minimum weight (exclusive) for a sample to count as high density.
    pub weight_threshold: f64,
    /// Maximum distance (inclusive, in coordinate degrees) for two
    /// samples to count as neighbors during clustering. Distances are
    /// planar over lon/lat, so the real-world meaning drifts with
    /// latitude; 0.003 is roughly 300 m at Luoyang.
    pub neighborhood_radius: f64,
    /// Minimum number of mutually reachable samples for a cluster to be
    /// reported.
    pub min_cluster_size: usize,
}

impl Default for GapParams {
    /// The parameters the Luoyang reading-room site ships with.
    fn default() -> Self {
        Self {
            weight_threshold: 80.0,
            neighborhood_radius: 0.003,
            min_cluster_size: 5,
        }
    }
}

/// The convex boundary around one cluster of uncovered high-density
/// samples, ready to be drawn as a service-gap polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GapPolygon {
    /// Hull vertices as `[lng, lat]` pairs, counter-clockwise, with the
    /// first vertex not repeated at the end.
    pub vertices: Vec<[f64; 2]>,
    /// Number of samples in the cluster this hull encloses.
    pub point_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_match_site() {
        let params = GapParams::default();
        assert!((params.weight_threshold - 80.0).abs() < f64::EPSILON);
        assert!((params.neighborhood_radius - 0.003).abs() < f64::EPSILON);
        assert_eq!(params.min_cluster_size, 5);
    }

    #[test]
    fn gap_polygon_serializes_camel_case() {
        let polygon = GapPolygon {
            vertices: vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]],
            point_count: 3,
        };
        let json = serde_json::to_value(&polygon).expect("serialize");
        assert!(json.get("pointCount").is_some());
        assert_eq!(json["vertices"][1][0], 1.0);
    }
}
