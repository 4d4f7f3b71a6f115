//! Local file loaders for the feeds.

use std::fs;
use std::path::Path;

use crate::FeedError;
use crate::records::{HeatSample, ReadingRoom, RoomFeed, flatten_rooms};

/// Loads and flattens the reading-room registry from a JSON file.
///
/// # Errors
///
/// Returns [`FeedError`] if the file cannot be read or parsed.
pub fn load_rooms(path: &Path) -> Result<Vec<ReadingRoom>, FeedError> {
    let raw = fs::read_to_string(path)?;
    let feed: RoomFeed = serde_json::from_str(&raw)?;
    let rooms = flatten_rooms(&feed);
    if rooms.is_empty() {
        return Err(FeedError::Conversion {
            message: format!("no usable rooms in {}", path.display()),
        });
    }
    log::info!("Loaded {} reading rooms from {}", rooms.len(), path.display());
    Ok(rooms)
}

/// Loads the population heat samples from a JSON file.
///
/// # Errors
///
/// Returns [`FeedError`] if the file cannot be read or parsed.
pub fn load_heat_samples(path: &Path) -> Result<Vec<HeatSample>, FeedError> {
    let raw = fs::read_to_string(path)?;
    let samples: Vec<HeatSample> = serde_json::from_str(&raw)?;
    log::info!(
        "Loaded {} heat samples from {}",
        samples.len(),
        path.display()
    );
    Ok(samples)
}
