//! Favourite stops.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::StopId;

/// Server-assigned identity of a saved favourite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavouriteId(pub i64);

impl fmt::Display for FavouriteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stop the user has saved for quick access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Favourite {
    pub id: FavouriteId,
    pub stop_id: StopId,
    pub stop_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_display() {
        assert_eq!(FavouriteId(7).to_string(), "7");
        let id: FavouriteId = serde_json::from_str("42").unwrap();
        assert_eq!(id, FavouriteId(42));
    }
}
