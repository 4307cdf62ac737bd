//! Favourites controller.
//!
//! Loads the saved favourites and, separately, each one's departure
//! preview. The list never waits on a preview: cards start out loading
//! and every preview is fetched on its own, so a slow or failing stop
//! only affects its own card. The list itself is only ever rebuilt from
//! the server's response, never patched optimistically.

use std::sync::Arc;

use tracing::{info, warn};

use crate::api::{ApiError, TransitApi};
use crate::domain::{Favourite, FavouriteId, StopId, StopSelection};

use super::preview::Preview;

/// Question asked before a favourite is deleted.
pub const REMOVE_PROMPT: &str = "Remove this favourite?";

/// Guard for destructive actions.
///
/// Implemented for `bool` (an answer the user already gave) and for
/// closures that ask on demand.
pub trait ConfirmPrompt {
    fn confirm(&self, message: &str) -> bool;
}

impl ConfirmPrompt for bool {
    fn confirm(&self, _message: &str) -> bool {
        *self
    }
}

impl<F: Fn(&str) -> bool> ConfirmPrompt for F {
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

/// A favourite with its preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavouriteCard {
    pub favourite: Favourite,
    pub preview: Preview,
}

/// What the favourites panel shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavouritesPanel {
    /// Nothing saved yet
    Empty,
    /// The favourites themselves could not be loaded
    Failed,
    Listed(Vec<FavouriteCard>),
}

impl FavouritesPanel {
    pub fn cards(&self) -> &[FavouriteCard] {
        match self {
            FavouritesPanel::Listed(cards) => cards,
            FavouritesPanel::Empty | FavouritesPanel::Failed => &[],
        }
    }
}

/// Result of adding the current stop to the favourites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// No stop is selected; nothing was sent
    NoSelection,
    /// Saved; carries the refreshed panel
    Added(FavouritesPanel),
    AlreadyExists,
    Failed,
}

impl AddOutcome {
    /// Notification for the user, if any.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            AddOutcome::NoSelection => None,
            AddOutcome::Added(_) => Some("Added to favourites!"),
            AddOutcome::AlreadyExists => Some("Already in favourites!"),
            AddOutcome::Failed => Some("Failed to add."),
        }
    }
}

/// Result of removing a favourite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The user declined; nothing was sent
    Declined,
    /// Deleted; carries the refreshed panel
    Removed(FavouritesPanel),
    /// The delete request failed; nothing changed
    Failed,
}

/// Favourites controller.
pub struct Favourites<A> {
    api: Arc<A>,
}

impl<A> Clone for Favourites<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
        }
    }
}

impl<A: TransitApi> Favourites<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// Load the favourites. Every card's preview starts out loading.
    pub async fn load(&self) -> FavouritesPanel {
        let favourites = match self.api.favourites().await {
            Ok(favourites) => favourites,
            Err(e) => {
                warn!(error = %e, "failed to load favourites");
                return FavouritesPanel::Failed;
            }
        };

        if favourites.is_empty() {
            return FavouritesPanel::Empty;
        }

        let cards = favourites
            .into_iter()
            .map(|favourite| FavouriteCard {
                favourite,
                preview: Preview::Loading,
            })
            .collect();

        FavouritesPanel::Listed(cards)
    }

    /// Fetch and group one favourite's departures.
    pub async fn preview(&self, stop: &StopId) -> Preview {
        match self.api.departures(stop).await {
            Ok(departures) => Preview::from_departures(&departures),
            Err(e) => {
                warn!(%stop, error = %e, "failed to load favourite preview");
                Preview::Failed
            }
        }
    }

    /// Save `selection` as a favourite.
    ///
    /// Without a selection this is a no-op and no request is sent.
    pub async fn add(&self, selection: Option<&StopSelection>) -> AddOutcome {
        let Some(selection) = selection else {
            return AddOutcome::NoSelection;
        };

        match self.api.add_favourite(selection).await {
            Ok(()) => {
                info!(stop = %selection.id, "added favourite");
                AddOutcome::Added(self.load().await)
            }
            Err(ApiError::Conflict) => AddOutcome::AlreadyExists,
            Err(e) => {
                warn!(stop = %selection.id, error = %e, "failed to add favourite");
                AddOutcome::Failed
            }
        }
    }

    /// Delete a favourite once `prompt` confirms it.
    pub async fn remove(&self, id: FavouriteId, prompt: &impl ConfirmPrompt) -> RemoveOutcome {
        if !prompt.confirm(REMOVE_PROMPT) {
            return RemoveOutcome::Declined;
        }

        match self.api.remove_favourite(id).await {
            Ok(()) => {
                info!(favourite = %id, "removed favourite");
                RemoveOutcome::Removed(self.load().await)
            }
            Err(e) => {
                warn!(favourite = %id, error = %e, "failed to remove favourite");
                RemoveOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::time::Duration;

    use tokio::time::timeout;

    use super::*;
    use crate::api::MockApi;
    use crate::domain::Departure;
    use crate::favourites::DirectionPreview;

    fn stop(id: &str) -> StopId {
        StopId::parse(id).unwrap()
    }

    fn selection(id: &str, name: &str) -> StopSelection {
        StopSelection::new(stop(id), name)
    }

    fn favourites(mock: &MockApi) -> Favourites<MockApi> {
        Favourites::new(Arc::new(mock.clone()))
    }

    #[tokio::test]
    async fn empty_collection() {
        let mock = MockApi::new();
        assert_eq!(favourites(&mock).load().await, FavouritesPanel::Empty);
    }

    #[tokio::test]
    async fn collection_failure() {
        let mock = MockApi::new();
        mock.add_saved(&selection("147", "Schottentor"));
        mock.fail_favourites(true);

        assert_eq!(favourites(&mock).load().await, FavouritesPanel::Failed);
        assert_eq!(mock.departure_requests(), 0);
    }

    #[tokio::test]
    async fn list_renders_before_any_preview() {
        let mock = MockApi::new();
        mock.add_saved(&selection("147", "Schottentor"));
        mock.add_saved(&selection("4911", "Westbahnhof"));

        let panel = favourites(&mock).load().await;
        let cards = panel.cards();

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].favourite.stop_name, "Schottentor");
        assert!(cards.iter().all(|c| c.preview == Preview::Loading));
        assert_eq!(mock.departure_requests(), 0);
    }

    #[tokio::test]
    async fn preview_groups_by_direction() {
        let mock = MockApi::new();
        mock.set_departures(
            &stop("147"),
            vec![
                Departure::new("D", "A", 3),
                Departure::new("1", "B", 5),
                Departure::new("D", "A", 8),
                Departure::new("D", "A", 12),
            ],
        );
        let controller = favourites(&mock);

        assert_eq!(
            controller.preview(&stop("147")).await,
            Preview::Directions(vec![
                DirectionPreview {
                    direction: "A".to_string(),
                    times: "3 min, 8 min".to_string(),
                },
                DirectionPreview {
                    direction: "B".to_string(),
                    times: "5 min".to_string(),
                },
            ])
        );
        assert_eq!(controller.preview(&stop("4911")).await, Preview::Empty);
    }

    #[tokio::test]
    async fn failing_preview_is_contained() {
        let mock = MockApi::new();
        mock.fail_departures(&stop("147"));
        mock.set_departures(&stop("4205"), vec![Departure::new("U1", "Leopoldau", 1)]);
        let controller = favourites(&mock);

        assert_eq!(controller.preview(&stop("147")).await, Preview::Failed);
        assert!(matches!(
            controller.preview(&stop("4205")).await,
            Preview::Directions(ref groups) if groups.len() == 1
        ));
    }

    #[tokio::test]
    async fn held_preview_blocks_nothing_else() {
        let mock = MockApi::new();
        mock.add_saved(&selection("147", "Schottentor"));
        mock.add_saved(&selection("4205", "Karlsplatz"));
        mock.set_departures(&stop("4205"), vec![Departure::new("U1", "Leopoldau", 1)]);
        let _gate = mock.hold_departures(&stop("147"));
        let controller = favourites(&mock);

        let held = tokio::spawn({
            let controller = controller.clone();
            async move { controller.preview(&stop("147")).await }
        });
        tokio::task::yield_now().await;

        let within = Duration::from_millis(500);
        let panel = timeout(within, controller.load()).await.unwrap();
        assert_eq!(panel.cards().len(), 2);

        let other = timeout(within, controller.preview(&stop("4205"))).await.unwrap();
        assert!(matches!(other, Preview::Directions(_)));
        assert!(!held.is_finished());
    }

    #[tokio::test]
    async fn add_without_selection_is_noop() {
        let mock = MockApi::new();
        let outcome = favourites(&mock).add(None).await;

        assert_eq!(outcome, AddOutcome::NoSelection);
        assert_eq!(outcome.message(), None);
        assert_eq!(mock.mutation_requests(), 0);
    }

    #[tokio::test]
    async fn add_refreshes_from_server() {
        let mock = MockApi::new();
        let outcome = favourites(&mock)
            .add(Some(&selection("147", "Schottentor")))
            .await;

        let AddOutcome::Added(panel) = &outcome else {
            panic!("expected Added, got {outcome:?}");
        };
        assert_eq!(panel.cards().len(), 1);
        assert_eq!(outcome.message(), Some("Added to favourites!"));
    }

    #[tokio::test]
    async fn add_existing_reports_conflict() {
        let mock = MockApi::new();
        mock.add_saved(&selection("147", "Schottentor"));

        let outcome = favourites(&mock)
            .add(Some(&selection("147", "Schottentor")))
            .await;

        assert_eq!(outcome, AddOutcome::AlreadyExists);
        assert_eq!(outcome.message(), Some("Already in favourites!"));
        assert_eq!(mock.saved().len(), 1);
    }

    #[tokio::test]
    async fn add_failure_is_generic() {
        let mock = MockApi::new();
        mock.fail_mutations(true);

        let outcome = favourites(&mock)
            .add(Some(&selection("147", "Schottentor")))
            .await;

        assert_eq!(outcome, AddOutcome::Failed);
        assert_eq!(outcome.message(), Some("Failed to add."));
    }

    #[tokio::test]
    async fn declined_removal_sends_nothing() {
        let mock = MockApi::new();
        let id = mock.add_saved(&selection("147", "Schottentor"));
        let asked = Cell::new(None);

        let outcome = favourites(&mock)
            .remove(id, &|message: &str| {
                asked.set(Some(message.to_string()));
                false
            })
            .await;

        assert_eq!(outcome, RemoveOutcome::Declined);
        assert_eq!(asked.take().as_deref(), Some("Remove this favourite?"));
        assert_eq!(mock.mutation_requests(), 0);
        assert_eq!(mock.saved().len(), 1);
    }

    #[tokio::test]
    async fn confirmed_removal_refreshes() {
        let mock = MockApi::new();
        let id = mock.add_saved(&selection("147", "Schottentor"));
        mock.add_saved(&selection("4205", "Karlsplatz"));

        let outcome = favourites(&mock).remove(id, &true).await;

        let RemoveOutcome::Removed(panel) = outcome else {
            panic!("expected Removed");
        };
        assert_eq!(panel.cards().len(), 1);
        assert_eq!(panel.cards()[0].favourite.stop_name, "Karlsplatz");
    }

    #[tokio::test]
    async fn failed_removal_leaves_state() {
        let mock = MockApi::new();
        let id = mock.add_saved(&selection("147", "Schottentor"));
        mock.fail_mutations(true);

        let outcome = favourites(&mock).remove(id, &true).await;

        assert_eq!(outcome, RemoveOutcome::Failed);
        assert_eq!(mock.saved().len(), 1);
        assert_eq!(mock.departure_requests(), 0);
    }
}
