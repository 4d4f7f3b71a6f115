//! Raw feed record types and their conversion into detector inputs.
//!
//! Field names mirror the JSON feeds as published, so these types
//! deserialize the files as-is. [`ReadingRoom`] is the cleaned-up form
//! the rest of the workspace consumes.

use std::collections::BTreeMap;

use reading_map_gaps_models::{CoverageZone, SamplePoint};
use serde::{Deserialize, Serialize};

/// The reading-room registry feed: rooms grouped by district.
#[derive(Debug, Clone, Deserialize)]
pub struct RoomFeed {
    /// District name -> district block. `BTreeMap` keeps iteration
    /// order stable across runs.
    pub districts: BTreeMap<String, DistrictRecord>,
}

/// One district's block in the registry feed.
#[derive(Debug, Clone, Deserialize)]
pub struct DistrictRecord {
    /// Rooms in this district.
    #[serde(default)]
    pub libraries: Vec<RoomRecord>,
}

/// One reading room as published in the registry feed.
#[derive(Debug, Clone, Deserialize)]
pub struct RoomRecord {
    /// Room name.
    pub name: String,
    /// Coordinates as a `"lng,lat"` string.
    pub coordinates: String,
    /// Street address.
    #[serde(default)]
    pub address: Option<String>,
    /// Book count.
    #[serde(default)]
    pub books: Option<u32>,
    /// Seat count.
    #[serde(default)]
    pub seats: Option<u32>,
    /// Floor area in square meters.
    #[serde(default)]
    pub area: Option<f64>,
    /// District label carried on the record itself.
    #[serde(default)]
    pub district: Option<String>,
    /// Opening hours, e.g. `"9:00-17:00"`.
    #[serde(default)]
    pub opening_hours: Option<String>,
}

impl RoomRecord {
    /// Parses the `"lng,lat"` coordinate string.
    ///
    /// Returns `None` when the string does not hold exactly two finite
    /// numbers.
    #[must_use]
    pub fn parse_coordinates(&self) -> Option<(f64, f64)> {
        let mut parts = self.coordinates.split(',');
        let lng: f64 = parts.next()?.trim().parse().ok()?;
        let lat: f64 = parts.next()?.trim().parse().ok()?;
        if parts.next().is_some() || !lng.is_finite() || !lat.is_finite() {
            return None;
        }
        Some((lng, lat))
    }
}

/// One population heat sample as published in the heat feed.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct HeatSample {
    /// Longitude in degrees.
    pub lng: f64,
    /// Latitude in degrees.
    pub lat: f64,
    /// Density weight on the feed's 0-100 scale.
    pub count: f64,
}

/// A reading room with parsed coordinates and its feed metadata.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingRoom {
    /// Room name.
    pub name: String,
    /// Longitude in degrees.
    pub lng: f64,
    /// Latitude in degrees.
    pub lat: f64,
    /// District the room belongs to (registry grouping wins over the
    /// record's own label).
    pub district: String,
    /// Street address.
    pub address: Option<String>,
    /// Book count.
    pub books: Option<u32>,
    /// Seat count.
    pub seats: Option<u32>,
    /// Floor area in square meters.
    pub area_sq_m: Option<f64>,
    /// Opening hours.
    pub opening_hours: Option<String>,
}

impl ReadingRoom {
    /// The circular service area around this room, with `radius` in
    /// coordinate degrees.
    #[must_use]
    pub const fn service_zone(&self, radius: f64) -> CoverageZone {
        CoverageZone::new(self.lng, self.lat, radius)
    }
}

/// Flattens the district-grouped feed into a list of rooms.
///
/// Rooms whose coordinate string does not parse are skipped with a
/// warning; the map can live without one marker, not without the rest.
#[must_use]
pub fn flatten_rooms(feed: &RoomFeed) -> Vec<ReadingRoom> {
    let mut rooms = Vec::new();
    for (district, block) in &feed.districts {
        for record in &block.libraries {
            let Some((lng, lat)) = record.parse_coordinates() else {
                log::warn!(
                    "Skipping room '{}' with unparseable coordinates '{}'",
                    record.name,
                    record.coordinates
                );
                continue;
            };
            rooms.push(ReadingRoom {
                name: record.name.clone(),
                lng,
                lat,
                district: district.clone(),
                address: record.address.clone(),
                books: record.books,
                seats: record.seats,
                area_sq_m: record.area,
                opening_hours: record.opening_hours.clone(),
            });
        }
    }
    rooms
}

/// Service zones for a set of rooms, all with the same radius in
/// coordinate degrees.
#[must_use]
pub fn service_zones(rooms: &[ReadingRoom], radius: f64) -> Vec<CoverageZone> {
    rooms.iter().map(|room| room.service_zone(radius)).collect()
}

/// Converts heat samples into detector sample points, `count` becoming
/// the weight.
#[must_use]
pub fn sample_points(samples: &[HeatSample]) -> Vec<SamplePoint> {
    samples
        .iter()
        .map(|s| SamplePoint::new(s.lng, s.lat, s.count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED_JSON: &str = r#"{
        "districts": {
            "洛龙区": {
                "libraries": [
                    {
                        "name": "开元湖城市书房",
                        "coordinates": "112.458,34.618",
                        "address": "开元大道",
                        "books": 12000,
                        "seats": 60,
                        "area": 200.0,
                        "opening_hours": "8:30-21:00"
                    },
                    {
                        "name": "坏坐标书房",
                        "coordinates": "not-a-coordinate"
                    }
                ]
            },
            "西工区": {
                "libraries": [
                    { "name": "王城公园城市书房", "coordinates": " 112.428 , 34.669 " }
                ]
            }
        }
    }"#;

    #[test]
    fn feed_parses_and_flattens() {
        let feed: RoomFeed = serde_json::from_str(FEED_JSON).expect("parse feed");
        let rooms = flatten_rooms(&feed);
        assert_eq!(rooms.len(), 2, "unparseable room should be skipped");
        assert_eq!(rooms[0].district, "洛龙区");
        assert_eq!(rooms[0].books, Some(12_000));
        assert!((rooms[1].lng - 112.428).abs() < 1e-9);
    }

    #[test]
    fn coordinate_parsing_rejects_garbage() {
        let mut record = RoomRecord {
            name: "t".to_string(),
            coordinates: "112.4,34.6".to_string(),
            address: None,
            books: None,
            seats: None,
            area: None,
            district: None,
            opening_hours: None,
        };
        assert_eq!(record.parse_coordinates(), Some((112.4, 34.6)));

        for bad in ["112.4", "112.4,34.6,0", "NaN,34.6", "a,b", ""] {
            record.coordinates = bad.to_string();
            assert_eq!(record.parse_coordinates(), None, "accepted '{bad}'");
        }
    }

    #[test]
    fn service_zone_uses_given_radius() {
        let feed: RoomFeed = serde_json::from_str(FEED_JSON).expect("parse feed");
        let rooms = flatten_rooms(&feed);
        let zones = service_zones(&rooms, crate::DEFAULT_SERVICE_RADIUS);
        assert_eq!(zones.len(), rooms.len());
        assert!((zones[0].radius - 0.008).abs() < 1e-12);
    }

    #[test]
    fn heat_samples_become_weighted_points() {
        let json = r#"[{"lng": 112.4, "lat": 34.6, "count": 92.5}]"#;
        let samples: Vec<HeatSample> = serde_json::from_str(json).expect("parse samples");
        let points = sample_points(&samples);
        assert_eq!(points.len(), 1);
        assert!((points[0].weight - 92.5).abs() < f64::EPSILON);
    }
}
