#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! `GeoJSON` artifact generation for the reading-room map frontend.
//!
//! Runs the gap detector over the feeds and writes the results as
//! `GeoJSON` `FeatureCollection` files under `data/generated/`: one with
//! the service-gap polygons, one with the room markers and their
//! service radii. The frontend loads these files verbatim.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject};
use reading_map_feed::records::ReadingRoom;
use reading_map_feed::{FeedError, load, records};
use reading_map_gaps::GapError;
use reading_map_gaps_models::{GapParams, GapPolygon};
use thiserror::Error;

/// Errors that can occur during artifact generation.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Writing an output file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A feed could not be loaded.
    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    /// The gap detector rejected its inputs.
    #[error("Gap detection error: {0}")]
    Gap(#[from] GapError),

    /// Serializing an output document failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where the feeds live and where the artifacts go.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Path to the reading-room registry JSON.
    pub rooms_path: PathBuf,
    /// Path to the heat-sample JSON.
    pub heat_path: PathBuf,
    /// Output directory for generated artifacts.
    pub out_dir: PathBuf,
    /// Service radius in coordinate degrees.
    pub service_radius: f64,
    /// Detector parameters.
    pub params: GapParams,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            rooms_path: PathBuf::from("static/data/reading_rooms.json"),
            heat_path: PathBuf::from("static/data/heat_samples.json"),
            out_dir: PathBuf::from("data/generated"),
            service_radius: reading_map_feed::DEFAULT_SERVICE_RADIUS,
            params: GapParams::default(),
        }
    }
}

/// Runs gap detection over the feeds and writes
/// `<out_dir>/gap_areas.geojson`.
///
/// # Errors
///
/// Returns [`GenerateError`] if a feed cannot be loaded, the detector
/// rejects its inputs, or the output cannot be written.
pub fn run_gaps(config: &GenerateConfig) -> Result<(), GenerateError> {
    let rooms = load::load_rooms(&config.rooms_path)?;
    let samples = load::load_heat_samples(&config.heat_path)?;

    let zones = records::service_zones(&rooms, config.service_radius);
    let points = records::sample_points(&samples);

    let polygons = reading_map_gaps::detect_gaps(&points, &zones, &config.params)?;
    log::info!(
        "Detected {} service gaps from {} samples and {} rooms",
        polygons.len(),
        points.len(),
        rooms.len()
    );

    let collection = gap_feature_collection(&polygons);
    write_geojson(&config.out_dir.join("gap_areas.geojson"), &collection)
}

/// Writes the room markers as `<out_dir>/rooms.geojson`.
///
/// # Errors
///
/// Returns [`GenerateError`] if the registry cannot be loaded or the
/// output cannot be written.
pub fn run_rooms(config: &GenerateConfig) -> Result<(), GenerateError> {
    let rooms = load::load_rooms(&config.rooms_path)?;
    let collection = room_feature_collection(&rooms, config.service_radius);
    write_geojson(&config.out_dir.join("rooms.geojson"), &collection)
}

/// Converts gap polygons into a `GeoJSON` `FeatureCollection`.
///
/// Hull vertices arrive counter-clockwise with an open ring; `GeoJSON`
/// wants the ring closed, which the `geo` conversion takes care of.
#[must_use]
pub fn gap_feature_collection(polygons: &[GapPolygon]) -> FeatureCollection {
    let features = polygons
        .iter()
        .map(|polygon| {
            let ring: Vec<(f64, f64)> = polygon.vertices.iter().map(|v| (v[0], v[1])).collect();
            let exterior = geo::Polygon::new(geo::LineString::from(ring), vec![]);

            let mut properties = JsonObject::new();
            properties.insert(
                "pointCount".to_string(),
                serde_json::Value::from(polygon.point_count),
            );

            Feature {
                bbox: None,
                geometry: Some(Geometry::new(geojson::Value::from(&exterior))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: Some(generation_stamp()),
    }
}

/// Converts rooms into a `GeoJSON` `FeatureCollection` of point
/// features carrying the marker metadata the frontend shows in info
/// windows, plus the service radius (in meters) for drawing circles.
#[must_use]
pub fn room_feature_collection(rooms: &[ReadingRoom], service_radius: f64) -> FeatureCollection {
    let radius_meters = service_radius / reading_map_feed::DEGREES_PER_METER;

    let features = rooms
        .iter()
        .map(|room| {
            let point = geo::Point::new(room.lng, room.lat);

            let mut properties = JsonObject::new();
            properties.insert("name".to_string(), serde_json::Value::from(room.name.clone()));
            properties.insert(
                "district".to_string(),
                serde_json::Value::from(room.district.clone()),
            );
            properties.insert(
                "serviceRadiusMeters".to_string(),
                serde_json::Value::from(radius_meters),
            );
            if let Some(address) = &room.address {
                properties.insert("address".to_string(), serde_json::Value::from(address.clone()));
            }
            if let Some(books) = room.books {
                properties.insert("books".to_string(), serde_json::Value::from(books));
            }
            if let Some(seats) = room.seats {
                properties.insert("seats".to_string(), serde_json::Value::from(seats));
            }
            if let Some(area) = room.area_sq_m {
                properties.insert("areaSqM".to_string(), serde_json::Value::from(area));
            }
            if let Some(hours) = &room.opening_hours {
                properties.insert(
                    "openingHours".to_string(),
                    serde_json::Value::from(hours.clone()),
                );
            }

            Feature {
                bbox: None,
                geometry: Some(Geometry::new(geojson::Value::from(&point))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: Some(generation_stamp()),
    }
}

fn generation_stamp() -> JsonObject {
    let mut members = JsonObject::new();
    members.insert(
        "generatedAt".to_string(),
        serde_json::Value::from(Utc::now().to_rfc3339()),
    );
    members
}

fn write_geojson(path: &Path, collection: &FeatureCollection) -> Result<(), GenerateError> {
    let body = serde_json::to_string_pretty(collection)?;
    fs::write(path, body)?;
    log::info!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> GapPolygon {
        GapPolygon {
            vertices: vec![[112.40, 34.60], [112.41, 34.60], [112.405, 34.61]],
            point_count: 7,
        }
    }

    #[test]
    fn gap_features_close_the_ring() {
        let collection = gap_feature_collection(&[triangle()]);
        assert_eq!(collection.features.len(), 1);

        let geometry = collection.features[0].geometry.as_ref().expect("geometry");
        let geojson::Value::Polygon(rings) = &geometry.value else {
            panic!("expected polygon geometry");
        };
        assert_eq!(rings.len(), 1, "no holes expected");
        assert_eq!(rings[0].len(), 4, "3 vertices plus closing point");
        assert_eq!(rings[0].first(), rings[0].last());
    }

    #[test]
    fn gap_features_carry_point_count() {
        let collection = gap_feature_collection(&[triangle()]);
        let properties = collection.features[0].properties.as_ref().expect("properties");
        assert_eq!(properties["pointCount"], serde_json::Value::from(7));
    }

    #[test]
    fn collection_is_stamped() {
        let collection = gap_feature_collection(&[]);
        let members = collection.foreign_members.as_ref().expect("foreign members");
        assert!(members.contains_key("generatedAt"));
    }

    #[test]
    fn room_features_carry_metadata() {
        let rooms = vec![ReadingRoom {
            name: "开元湖城市书房".to_string(),
            lng: 112.458,
            lat: 34.618,
            district: "洛龙区".to_string(),
            address: Some("开元大道".to_string()),
            books: Some(12_000),
            seats: Some(60),
            area_sq_m: Some(200.0),
            opening_hours: None,
        }];
        let collection = room_feature_collection(&rooms, reading_map_feed::DEFAULT_SERVICE_RADIUS);

        let properties = collection.features[0].properties.as_ref().expect("properties");
        assert_eq!(properties["district"], serde_json::Value::from("洛龙区"));
        let radius = properties["serviceRadiusMeters"].as_f64().expect("radius");
        assert!((radius - 800.0).abs() < 1e-9);
        assert_eq!(properties["books"], serde_json::Value::from(12_000));
        assert!(!properties.contains_key("openingHours"));
    }
}
