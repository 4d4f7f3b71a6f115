//! HTTP handler functions for the reading-room map API.

use actix_web::{HttpResponse, web};
use reading_map_feed::load;
use reading_map_feed::records;
use reading_map_server_models::{ApiHealth, ApiStatus, GapQueryParams, IsochroneQuery};

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/status`
///
/// Uptime and request counters.
pub async fn status(state: web::Data<AppState>) -> HttpResponse {
    let (total, proxied, failed) = state.stats.snapshot();
    HttpResponse::Ok().json(ApiStatus {
        uptime_seconds: state.started_at.elapsed().as_secs(),
        total_requests: total,
        proxied_requests: proxied,
        failed_requests: failed,
        mapbox_token_configured: state.mapbox_token.is_some(),
    })
}

/// `GET /api/gaps`
///
/// Runs gap detection over the configured feeds and returns the result
/// as a `GeoJSON` `FeatureCollection`. Detector parameter errors are the
/// caller's fault (400); unreadable feeds are ours (500).
pub async fn gaps(state: web::Data<AppState>, params: web::Query<GapQueryParams>) -> HttpResponse {
    state.stats.record_request();

    let service_radius = params
        .service_radius_meters
        .unwrap_or(reading_map_feed::SERVICE_RADIUS_METERS)
        * reading_map_feed::DEGREES_PER_METER;

    let rooms = match load::load_rooms(&state.rooms_path) {
        Ok(rooms) => rooms,
        Err(e) => {
            log::error!("Failed to load room registry: {e}");
            state.stats.record_failed();
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to load room registry"
            }));
        }
    };
    let samples = match load::load_heat_samples(&state.heat_path) {
        Ok(samples) => samples,
        Err(e) => {
            log::error!("Failed to load heat samples: {e}");
            state.stats.record_failed();
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to load heat samples"
            }));
        }
    };

    let zones = records::service_zones(&rooms, service_radius);
    let points = records::sample_points(&samples);

    match reading_map_gaps::detect_gaps(&points, &zones, &params.to_params()) {
        Ok(polygons) => {
            HttpResponse::Ok().json(reading_map_generate::gap_feature_collection(&polygons))
        }
        Err(e) => {
            // Every detector error is a precondition violation, either
            // in the query parameters or in the feed data.
            log::error!("Gap detection rejected inputs: {e}");
            state.stats.record_failed();
            HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
        }
    }
}

/// `GET /api/isochrone`
///
/// Validated pass-through to the Mapbox Isochrone API. Keeps the access
/// token server-side; the frontend only ever sees the contour JSON.
pub async fn isochrone(
    state: web::Data<AppState>,
    query: web::Query<IsochroneQuery>,
) -> HttpResponse {
    state.stats.record_request();

    if let Err(message) = validate_isochrone(&query) {
        state.stats.record_failed();
        return HttpResponse::BadRequest().json(serde_json::json!({ "error": message }));
    }

    let Some(token) = state.mapbox_token.clone() else {
        state.stats.record_failed();
        return HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "error": "Isochrone proxy is not configured"
        }));
    };

    let url = format!(
        "https://api.mapbox.com/isochrone/v1/mapbox/{}/{},{}",
        query.profile.as_str(),
        query.lng,
        query.lat
    );

    let upstream = state
        .http
        .get(&url)
        .query(&[
            ("contours_minutes", query.minutes.to_string()),
            ("polygons", "true".to_string()),
            ("access_token", token),
        ])
        .send()
        .await;

    match upstream {
        Ok(resp) if resp.status().is_success() => match resp.json::<serde_json::Value>().await {
            Ok(body) => {
                state.stats.record_proxied();
                HttpResponse::Ok().json(body)
            }
            Err(e) => {
                log::error!("Isochrone response was not JSON: {e}");
                state.stats.record_failed();
                HttpResponse::BadGateway().json(serde_json::json!({
                    "error": "Upstream returned an unreadable response"
                }))
            }
        },
        Ok(resp) => {
            log::error!("Isochrone upstream answered {}", resp.status());
            state.stats.record_failed();
            HttpResponse::BadGateway().json(serde_json::json!({
                "error": "Upstream isochrone request failed"
            }))
        }
        Err(e) => {
            log::error!("Isochrone request failed: {e}");
            state.stats.record_failed();
            HttpResponse::BadGateway().json(serde_json::json!({
                "error": "Upstream isochrone request failed"
            }))
        }
    }
}

/// Checks the isochrone query against the Mapbox API limits.
fn validate_isochrone(query: &IsochroneQuery) -> Result<(), String> {
    if !query.lng.is_finite() || !(-180.0..=180.0).contains(&query.lng) {
        return Err(format!("lng out of range: {}", query.lng));
    }
    if !query.lat.is_finite() || !(-90.0..=90.0).contains(&query.lat) {
        return Err(format!("lat out of range: {}", query.lat));
    }
    if !(1..=60).contains(&query.minutes) {
        return Err(format!("minutes must be 1-60, got {}", query.minutes));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use reading_map_server_models::TravelProfile;

    use super::*;

    fn query(lng: f64, lat: f64, minutes: u16) -> IsochroneQuery {
        IsochroneQuery {
            lng,
            lat,
            minutes,
            profile: TravelProfile::Walking,
        }
    }

    #[test]
    fn valid_query_passes() {
        assert!(validate_isochrone(&query(112.45, 34.62, 15)).is_ok());
    }

    #[test]
    fn minutes_bounds_are_enforced() {
        assert!(validate_isochrone(&query(112.45, 34.62, 0)).is_err());
        assert!(validate_isochrone(&query(112.45, 34.62, 61)).is_err());
        assert!(validate_isochrone(&query(112.45, 34.62, 60)).is_ok());
    }

    #[test]
    fn coordinates_must_be_finite_and_in_range() {
        assert!(validate_isochrone(&query(f64::NAN, 34.62, 15)).is_err());
        assert!(validate_isochrone(&query(112.45, 91.0, 15)).is_err());
        assert!(validate_isochrone(&query(181.0, 34.62, 15)).is_err());
    }
}
