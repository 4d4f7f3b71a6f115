#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Data feeds for the reading-room map.
//!
//! Parses the two JSON feeds the site is built on, from local files or
//! over HTTP, and converts them into the detector's geometry types: the
//! reading-room registry (district -> rooms, coordinates as `"lng,lat"`
//! strings) and the population heat samples (`{lng, lat, count}`
//! records).

pub mod fetch;
pub mod load;
pub mod records;

use thiserror::Error;

/// Nominal walking service radius of one reading room, in meters.
pub const SERVICE_RADIUS_METERS: f64 = 800.0;

/// Flat meters-to-degrees factor the site uses everywhere.
///
/// The map works in raw lon/lat degrees and treats 0.001 degrees as
/// 100 m regardless of latitude. True enough around Luoyang (34.6 N);
/// anyone reusing this at other latitudes needs a projected metric.
pub const DEGREES_PER_METER: f64 = 1e-5;

/// Default service radius in coordinate degrees.
pub const DEFAULT_SERVICE_RADIUS: f64 = SERVICE_RADIUS_METERS * DEGREES_PER_METER;

/// Errors that can occur while loading or parsing a feed.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Reading a local feed file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Fetching a remote feed failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The feed parsed but its content was unusable.
    #[error("Conversion error: {message}")]
    Conversion {
        /// Description of what went wrong.
        message: String,
    },
}
