#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the reading-room map.
//!
//! Serves on-demand gap detection over the feeds, a validated proxy to
//! the Mapbox Isochrone API (so the browser never sees the access
//! token), and the generated `GeoJSON` artifacts plus frontend static
//! files. There is no database; the feeds are re-read per request and
//! stay small enough for that to be free.

mod handlers;

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};

/// Request counters, mirrored into the `/api/status` payload.
#[derive(Debug, Default)]
pub struct RequestStats {
    total: AtomicU64,
    proxied: AtomicU64,
    failed: AtomicU64,
}

impl RequestStats {
    /// Counts one incoming API request.
    pub fn record_request(&self) {
        self.total.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts one successfully proxied isochrone request.
    pub fn record_proxied(&self) {
        self.proxied.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts one request that ended in an error response.
    pub fn record_failed(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Current `(total, proxied, failed)` counts.
    #[must_use]
    pub fn snapshot(&self) -> (u64, u64, u64) {
        (
            self.total.load(Ordering::Relaxed),
            self.proxied.load(Ordering::Relaxed),
            self.failed.load(Ordering::Relaxed),
        )
    }
}

/// Shared application state.
pub struct AppState {
    /// HTTP client for upstream Mapbox calls.
    pub http: reqwest::Client,
    /// Mapbox access token, if configured.
    pub mapbox_token: Option<String>,
    /// Path to the reading-room registry JSON.
    pub rooms_path: PathBuf,
    /// Path to the heat-sample JSON.
    pub heat_path: PathBuf,
    /// Server start time, for the status endpoint.
    pub started_at: Instant,
    /// Request counters.
    pub stats: RequestStats,
}

/// Starts the reading-room map API server.
///
/// Configuration comes from the environment: `MAPBOX_ACCESS_TOKEN`
/// (isochrone proxy; the endpoint answers 503 without it),
/// `ROOMS_FEED_PATH` / `HEAT_FEED_PATH` (feed locations), and
/// `BIND_ADDR` / `PORT`. This is a regular async function; the caller
/// provides the runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind
/// or encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let mapbox_token = std::env::var("MAPBOX_ACCESS_TOKEN").ok();
    if mapbox_token.is_none() {
        log::warn!("MAPBOX_ACCESS_TOKEN not set; /api/isochrone will answer 503");
    }

    let rooms_path = std::env::var("ROOMS_FEED_PATH")
        .map_or_else(|_| PathBuf::from("static/data/reading_rooms.json"), PathBuf::from);
    let heat_path = std::env::var("HEAT_FEED_PATH")
        .map_or_else(|_| PathBuf::from("static/data/heat_samples.json"), PathBuf::from);

    let state = web::Data::new(AppState {
        http: reqwest::Client::new(),
        mapbox_token,
        rooms_path,
        heat_path,
        started_at: Instant::now(),
        stats: RequestStats::default(),
    });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(handlers::health))
                    .route("/status", web::get().to(handlers::status))
                    .route("/gaps", web::get().to(handlers::gaps))
                    .route("/isochrone", web::get().to(handlers::isochrone)),
            )
            // Serve generated GeoJSON artifacts
            .service(Files::new("/data", "data/generated").show_files_listing())
            // Serve frontend static files (production)
            .service(Files::new("/", "app/dist").index_file("index.html"))
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
