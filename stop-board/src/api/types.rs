//! Wire types for the transit API.
//!
//! Field names follow the API's JSON (`snake_case`, `countdown` in
//! minutes). Conversion into domain types drops records that cannot be
//! represented rather than failing the whole response.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{Departure, Favourite, FavouriteId, StopId, StopSelection};

/// A departure as returned by `GET /api/departures`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DepartureDto {
    /// The upstream feed occasionally omits the line name
    pub line: Option<String>,
    pub direction: Option<String>,
    /// Minutes; any JSON number, e.g. `3` or `3.0`
    pub countdown: f64,
}

impl From<DepartureDto> for Departure {
    fn from(dto: DepartureDto) -> Self {
        Departure {
            line: dto.line.unwrap_or_default(),
            direction: dto.direction.unwrap_or_default(),
            // Saturating cast: negatives become 0
            countdown: dto.countdown.round() as u32,
        }
    }
}

/// A favourite as returned by `GET /api/favourites`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FavouriteDto {
    pub id: i64,
    pub stop_id: String,
    pub stop_name: String,
}

impl FavouriteDto {
    /// Convert to a domain favourite, or `None` if the stop id is blank.
    pub fn into_favourite(self) -> Option<Favourite> {
        match StopId::parse(&self.stop_id) {
            Ok(stop_id) => Some(Favourite {
                id: FavouriteId(self.id),
                stop_id,
                stop_name: self.stop_name,
            }),
            Err(e) => {
                warn!(favourite = self.id, error = %e, "skipping favourite with invalid stop id");
                None
            }
        }
    }
}

/// Body of `POST /api/favourites`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFavouriteRequest {
    pub stop_id: String,
    pub stop_name: String,
}

impl From<&StopSelection> for CreateFavouriteRequest {
    fn from(stop: &StopSelection) -> Self {
        Self {
            stop_id: stop.id.as_str().to_string(),
            stop_name: stop.name.clone(),
        }
    }
}

/// Status envelope returned by favourite mutations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    /// Status value signalling that a favourite is already saved.
    pub const EXISTS: &'static str = "exists";

    pub fn is_exists(&self) -> bool {
        self.status == Self::EXISTS
    }
}
