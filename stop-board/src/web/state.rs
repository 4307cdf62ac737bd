//! Application state for the web layer.

use std::sync::Arc;

use crate::api::TransitApi;
use crate::board::StopBoard;
use crate::favourites::Favourites;
use crate::stops::StopCatalogue;

/// Shared application state.
///
/// One board session per server: the widget is a single-user dashboard.
pub struct AppState<A> {
    /// Primary departure view
    pub board: StopBoard<A>,

    /// Favourites panel
    pub favourites: Favourites<A>,

    /// Stops offered by the search control
    pub stops: Arc<StopCatalogue>,
}

impl<A> Clone for AppState<A> {
    fn clone(&self) -> Self {
        Self {
            board: self.board.clone(),
            favourites: self.favourites.clone(),
            stops: self.stops.clone(),
        }
    }
}

impl<A: TransitApi> AppState<A> {
    /// Create a new app state; both controllers share `api`.
    pub fn new(api: A, stops: StopCatalogue) -> Self {
        let api = Arc::new(api);
        Self {
            board: StopBoard::new(api.clone()),
            favourites: Favourites::new(api),
            stops: Arc::new(stops),
        }
    }
}
