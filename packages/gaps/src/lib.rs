#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Coverage-gap detection for the reading-room map.
//!
//! Takes the population heat samples and the service circles around
//! every reading room, finds the high-density samples no circle covers,
//! clusters them, and wraps each cluster in a convex hull. The hulls are
//! the red "service gap" polygons the frontend draws.
//!
//! The whole pass is pure and synchronous: no I/O, no shared state,
//! deterministic for a given input order. Callers can rerun or memoize
//! it freely.

pub mod cluster;
pub mod coverage;
pub mod hull;

use reading_map_gaps_models::{CoverageZone, GapParams, GapPolygon, SamplePoint};
use thiserror::Error;

/// Errors that can occur during gap detection.
///
/// All of them are precondition violations: the detector refuses
/// non-finite or negative inputs instead of letting NaN propagate into
/// the geometry.
#[derive(Debug, Error)]
pub enum GapError {
    /// A sample point or coverage zone carried an invalid value.
    #[error("Invalid {kind} at index {index}: {message}")]
    InvalidInput {
        /// Which input collection the offending element came from.
        kind: &'static str,
        /// Index of the offending element.
        index: usize,
        /// Description of what was wrong with it.
        message: String,
    },

    /// A detector parameter was out of range.
    #[error("Invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of what was wrong with it.
        message: String,
    },
}

/// Detects service gaps: convex polygons around clusters of uncovered
/// high-density samples.
///
/// Samples with weight strictly above `params.weight_threshold` that no
/// zone covers are clustered with radius `params.neighborhood_radius`;
/// each cluster of at least `params.min_cluster_size` samples whose hull
/// spans at least 3 distinct vertices yields one [`GapPolygon`].
/// Degenerate clusters (too small, or collinear enough to collapse the
/// hull) are dropped silently, and an empty candidate set yields an
/// empty vector.
///
/// # Errors
///
/// Returns [`GapError`] if any coordinate, weight, or radius is
/// non-finite, any weight or radius is negative, `weight_threshold` or
/// `neighborhood_radius` is non-finite or negative, or
/// `min_cluster_size` is zero.
pub fn detect_gaps(
    points: &[SamplePoint],
    zones: &[CoverageZone],
    params: &GapParams,
) -> Result<Vec<GapPolygon>, GapError> {
    validate_inputs(points, zones, params)?;

    let candidates = coverage::uncovered_candidates(points, zones, params.weight_threshold);
    log::debug!(
        "{} of {} samples are uncovered high-density candidates",
        candidates.len(),
        points.len()
    );
    if candidates.is_empty() {
        return Ok(Vec::new());
    }

    let clusters =
        cluster::cluster_points(&candidates, params.neighborhood_radius, params.min_cluster_size);
    log::debug!("{} raw clusters", clusters.len());

    let mut polygons = Vec::new();
    for indices in clusters {
        if indices.len() < params.min_cluster_size || indices.len() < 3 {
            continue;
        }
        let coords: Vec<[f64; 2]> = indices
            .iter()
            .map(|&i| [candidates[i].lng, candidates[i].lat])
            .collect();
        let vertices = hull::convex_hull(&coords);
        if vertices.len() < 3 {
            // Collinear cluster; nothing drawable.
            continue;
        }
        polygons.push(GapPolygon {
            vertices,
            point_count: indices.len(),
        });
    }

    log::debug!("{} gap polygons emitted", polygons.len());
    Ok(polygons)
}

fn validate_inputs(
    points: &[SamplePoint],
    zones: &[CoverageZone],
    params: &GapParams,
) -> Result<(), GapError> {
    for (index, point) in points.iter().enumerate() {
        if !point.lng.is_finite() || !point.lat.is_finite() {
            return Err(GapError::InvalidInput {
                kind: "sample point",
                index,
                message: format!("non-finite coordinate ({}, {})", point.lng, point.lat),
            });
        }
        if !point.weight.is_finite() || point.weight < 0.0 {
            return Err(GapError::InvalidInput {
                kind: "sample point",
                index,
                message: format!("weight must be finite and non-negative, got {}", point.weight),
            });
        }
    }

    for (index, zone) in zones.iter().enumerate() {
        if !zone.lng.is_finite() || !zone.lat.is_finite() {
            return Err(GapError::InvalidInput {
                kind: "coverage zone",
                index,
                message: format!("non-finite center ({}, {})", zone.lng, zone.lat),
            });
        }
        if !zone.radius.is_finite() || zone.radius < 0.0 {
            return Err(GapError::InvalidInput {
                kind: "coverage zone",
                index,
                message: format!("radius must be finite and non-negative, got {}", zone.radius),
            });
        }
    }

    if !params.weight_threshold.is_finite() || params.weight_threshold < 0.0 {
        return Err(GapError::InvalidParameter {
            name: "weight_threshold",
            message: format!(
                "must be finite and non-negative, got {}",
                params.weight_threshold
            ),
        });
    }
    if !params.neighborhood_radius.is_finite() || params.neighborhood_radius < 0.0 {
        return Err(GapError::InvalidParameter {
            name: "neighborhood_radius",
            message: format!(
                "must be finite and non-negative, got {}",
                params.neighborhood_radius
            ),
        });
    }
    if params.min_cluster_size == 0 {
        return Err(GapError::InvalidParameter {
            name: "min_cluster_size",
            message: "must be at least 1".to_string(),
        });
    }

    Ok(())
}
