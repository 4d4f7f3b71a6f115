#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the reading-room map server.
//!
//! These types are serialized to JSON for the REST API. Query types
//! carry the same defaults the frontend ships with, so a bare request
//! behaves exactly like the site.

use reading_map_gaps_models::GapParams;
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Always true when the server can answer at all.
    pub healthy: bool,
    /// Crate version.
    pub version: String,
}

/// Server status response: uptime and request counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiStatus {
    /// Seconds since the server started.
    pub uptime_seconds: u64,
    /// API requests handled since startup.
    pub total_requests: u64,
    /// Isochrone requests successfully proxied upstream.
    pub proxied_requests: u64,
    /// Requests that ended in an error response.
    pub failed_requests: u64,
    /// Whether a Mapbox token is configured.
    pub mapbox_token_configured: bool,
}

/// Query parameters for the gap detection endpoint.
///
/// Every field is optional; missing fields fall back to the site
/// defaults.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GapQueryParams {
    /// Minimum heat weight (exclusive) for a sample to count.
    pub weight_threshold: Option<f64>,
    /// Clustering neighborhood radius in coordinate degrees.
    pub eps: Option<f64>,
    /// Minimum cluster size for a gap to be reported.
    pub min_cluster_size: Option<usize>,
    /// Service radius around each room, in meters.
    pub service_radius_meters: Option<f64>,
}

impl GapQueryParams {
    /// Merges the query with the default detector parameters.
    #[must_use]
    pub fn to_params(self) -> GapParams {
        let defaults = GapParams::default();
        GapParams {
            weight_threshold: self.weight_threshold.unwrap_or(defaults.weight_threshold),
            neighborhood_radius: self.eps.unwrap_or(defaults.neighborhood_radius),
            min_cluster_size: self.min_cluster_size.unwrap_or(defaults.min_cluster_size),
        }
    }
}

/// Travel mode for the isochrone proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelProfile {
    /// On foot (the frontend default).
    #[default]
    Walking,
    /// By bicycle.
    Cycling,
    /// By car.
    Driving,
}

impl TravelProfile {
    /// The Mapbox routing profile segment for this mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Walking => "walking",
            Self::Cycling => "cycling",
            Self::Driving => "driving",
        }
    }
}

/// Query parameters for the isochrone proxy endpoint.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IsochroneQuery {
    /// Center longitude in degrees.
    pub lng: f64,
    /// Center latitude in degrees.
    pub lat: f64,
    /// Contour size in minutes (1-60).
    #[serde(default = "default_minutes")]
    pub minutes: u16,
    /// Travel mode.
    #[serde(default)]
    pub profile: TravelProfile,
}

const fn default_minutes() -> u16 {
    15
}
