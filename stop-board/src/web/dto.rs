//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::StopSelection;

/// Stop selection submitted by the search control or a favourite click.
#[derive(Debug, Deserialize)]
pub struct SelectStopForm {
    /// Stop id (opaque; may list several platforms)
    pub id: String,

    /// Display name; looked up in the catalogue when blank
    #[serde(default)]
    pub name: String,
}

/// Direction filter change.
#[derive(Debug, Deserialize)]
pub struct FilterForm {
    /// "all" or one of the offered directions
    pub direction: String,
}

/// Favourite removal.
#[derive(Debug, Deserialize)]
pub struct RemoveFavouriteForm {
    /// Whether the user confirmed the removal prompt
    #[serde(default)]
    pub confirmed: bool,
}

/// Preview lookup for one favourite's stop.
#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    pub stop_id: String,
}

/// Request to search stops by name.
#[derive(Debug, Deserialize)]
pub struct StopSearchRequest {
    /// Search query (case-insensitive substring)
    #[serde(default)]
    pub q: String,

    /// Maximum results
    pub limit: Option<usize>,
}

/// A stop in search results.
#[derive(Debug, Serialize)]
pub struct StopSearchResult {
    pub id: String,
    pub name: String,
}

impl From<&StopSelection> for StopSearchResult {
    fn from(stop: &StopSelection) -> Self {
        Self {
            id: stop.id.as_str().to_string(),
            name: stop.name.clone(),
        }
    }
}

/// Response for stop search.
#[derive(Debug, Serialize)]
pub struct StopSearchResponse {
    pub stops: Vec<StopSearchResult>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
