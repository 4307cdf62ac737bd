//! Stop selection controller.

use std::sync::Arc;

use chrono::Local;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::api::TransitApi;
use crate::domain::StopSelection;

use super::filter::DirectionFilter;
use super::render::ResultsView;
use super::session::BoardSession;

/// Drives the primary departure view.
///
/// Owns the board session and runs the refresh cycle on every selection:
/// show loading, fetch, then commit or fail. The session lock is never
/// held across a fetch, so selections may overlap; the selection token
/// decides which result is shown.
pub struct StopBoard<A> {
    api: Arc<A>,
    session: Arc<RwLock<BoardSession>>,
}

impl<A> Clone for StopBoard<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            session: self.session.clone(),
        }
    }
}

impl<A: TransitApi> StopBoard<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            session: Arc::new(RwLock::new(BoardSession::new())),
        }
    }

    /// Select a stop and load its departures.
    ///
    /// Never fails: a fetch error is logged and shown as an error row.
    /// Returns the panel as it stands once this selection's fetch has
    /// settled, which reflects a newer selection if one superseded it.
    pub async fn select_stop(&self, selection: StopSelection) -> ResultsView {
        let stop = selection.id.clone();
        let token = self.session.write().await.begin_selection(selection);

        let result = self.api.fresh_departures(&stop).await;

        let mut session = self.session.write().await;
        match result {
            Ok(departures) => {
                let count = departures.len();
                if session.commit(token, departures, Local::now()) {
                    info!(%stop, count, "loaded departures");
                } else {
                    debug!(%stop, "discarding departures for superseded selection");
                }
            }
            Err(e) => {
                warn!(
                    %stop,
                    error = %e,
                    network_or_parse = e.is_network_or_parse(),
                    "failed to load departures"
                );
                if !session.fail(token) {
                    debug!(%stop, "ignoring failure for superseded selection");
                }
            }
        }

        session.view()
    }

    /// Switch the direction filter without refetching.
    pub async fn change_filter(&self, value: &str) -> ResultsView {
        let mut session = self.session.write().await;
        session.change_filter(DirectionFilter::parse(value));
        session.view()
    }

    /// Reveal one more page without refetching.
    pub async fn show_more(&self) -> ResultsView {
        let mut session = self.session.write().await;
        session.show_more();
        session.view()
    }

    /// The panel as it currently stands.
    pub async fn view(&self) -> ResultsView {
        self.session.read().await.view()
    }

    /// The stop currently selected, if any.
    pub async fn current_selection(&self) -> Option<StopSelection> {
        self.session.read().await.selection().cloned()
    }
}
