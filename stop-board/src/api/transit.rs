//! The seam between board controllers and the transit API.

use std::future::Future;

use crate::domain::{Departure, Favourite, FavouriteId, StopId, StopSelection};

use super::error::ApiError;

/// Operations the board needs from the transit API.
///
/// Implementations must not retry: every retry in the widget is initiated
/// by the user (re-selecting a stop, reloading favourites).
pub trait TransitApi: Send + Sync {
    /// Upcoming departures for a stop, in the order the API returns them.
    fn departures(
        &self,
        stop: &StopId,
    ) -> impl Future<Output = Result<Vec<Departure>, ApiError>> + Send;

    /// Departures for a stop, always asking the API.
    ///
    /// Used when the user selects a stop, which is also how they retry.
    /// Wrappers that cache lookups must not answer this from the cache.
    fn fresh_departures(
        &self,
        stop: &StopId,
    ) -> impl Future<Output = Result<Vec<Departure>, ApiError>> + Send {
        self.departures(stop)
    }

    /// The saved favourites, in server order.
    fn favourites(&self) -> impl Future<Output = Result<Vec<Favourite>, ApiError>> + Send;

    /// Save a stop as a favourite.
    ///
    /// Returns [`ApiError::Conflict`] if the stop is already saved.
    fn add_favourite(
        &self,
        stop: &StopSelection,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Delete a saved favourite.
    fn remove_favourite(&self, id: FavouriteId)
    -> impl Future<Output = Result<(), ApiError>> + Send;
}
