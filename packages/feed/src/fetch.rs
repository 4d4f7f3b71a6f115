//! HTTP fetchers for feeds published behind a web server.
//!
//! The production site serves both feeds as static JSON, so these are
//! plain GETs with a status check; no auth, no retries.

use crate::FeedError;
use crate::records::{HeatSample, ReadingRoom, RoomFeed, flatten_rooms};

/// Fetches and flattens the reading-room registry from a URL.
///
/// # Errors
///
/// Returns [`FeedError`] if the request fails, returns a non-success
/// status, or the body cannot be parsed.
pub async fn fetch_rooms(client: &reqwest::Client, url: &str) -> Result<Vec<ReadingRoom>, FeedError> {
    let body = get_text(client, url).await?;
    let feed: RoomFeed = serde_json::from_str(&body)?;
    let rooms = flatten_rooms(&feed);
    if rooms.is_empty() {
        return Err(FeedError::Conversion {
            message: format!("no usable rooms in feed at {url}"),
        });
    }
    log::info!("Fetched {} reading rooms from {url}", rooms.len());
    Ok(rooms)
}

/// Fetches the population heat samples from a URL.
///
/// # Errors
///
/// Returns [`FeedError`] if the request fails, returns a non-success
/// status, or the body cannot be parsed.
pub async fn fetch_heat_samples(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<HeatSample>, FeedError> {
    let body = get_text(client, url).await?;
    let samples: Vec<HeatSample> = serde_json::from_str(&body)?;
    log::info!("Fetched {} heat samples from {url}", samples.len());
    Ok(samples)
}

async fn get_text(client: &reqwest::Client, url: &str) -> Result<String, FeedError> {
    let resp = client.get(url).send().await?;
    if !resp.status().is_success() {
        return Err(FeedError::Conversion {
            message: format!("feed request to {url} failed with status {}", resp.status()),
        });
    }
    Ok(resp.text().await?)
}
