//! Stop lookup and search.

use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::domain::{StopId, StopSelection};

use super::error::CatalogueError;

/// Results returned when the caller gives no limit.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Upper bound on results per search.
pub const MAX_SEARCH_LIMIT: usize = 50;

/// A catalogue entry as stored on disk.
#[derive(Debug, Deserialize)]
struct StopDto {
    id: String,
    name: String,
}

/// Searchable list of known stops, sorted by name.
#[derive(Debug, Clone, Default)]
pub struct StopCatalogue {
    stops: Vec<StopSelection>,
}

impl StopCatalogue {
    /// An empty catalogue; every search returns nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a catalogue from known stops.
    pub fn from_stops(mut stops: Vec<StopSelection>) -> Self {
        stops.sort_by(|a, b| a.name.cmp(&b.name));
        Self { stops }
    }

    /// Load a catalogue from a JSON file of `[{"id": ..., "name": ...}]`.
    ///
    /// Entries with a blank id are skipped.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogueError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogueError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let entries: Vec<StopDto> =
            serde_json::from_str(&json).map_err(|e| CatalogueError::Json {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        Ok(Self::from_stops(build_stops(entries)))
    }

    /// Case-insensitive substring search on stop names.
    ///
    /// An empty query lists stops from the start of the catalogue.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&StopSelection> {
        let needle = query.trim().to_lowercase();
        self.stops
            .iter()
            .filter(|s| needle.is_empty() || s.name.to_lowercase().contains(&needle))
            .take(limit.min(MAX_SEARCH_LIMIT))
            .collect()
    }

    /// Look up a stop by id.
    pub fn get(&self, id: &StopId) -> Option<&StopSelection> {
        self.stops.iter().find(|s| &s.id == id)
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

/// Convert raw entries, dropping those with unusable ids.
fn build_stops(entries: Vec<StopDto>) -> Vec<StopSelection> {
    entries
        .into_iter()
        .filter_map(|entry| match StopId::parse(&entry.id) {
            Ok(id) => Some(StopSelection::new(id, entry.name)),
            Err(_) => {
                warn!(name = %entry.name, "skipping catalogue entry without an id");
                None
            }
        })
        .collect()
}
