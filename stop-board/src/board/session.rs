//! Board session state.
//!
//! All mutable state of the primary view lives here: the selected stop,
//! the departure store, the direction filter, and the selection
//! generation used to reject stale responses.

use chrono::{DateTime, Local};

use crate::domain::{Departure, StopSelection};

use super::filter::{DirectionFilter, derive_directions, filter_options};
use super::render::{ERROR_MESSAGE, LOADING_MESSAGE, ResultsView, Row, render};
use super::store::DepartureStore;

/// Identifies one selection generation.
///
/// Tokens are handed out in strictly increasing order; only the newest
/// may commit results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SelectionToken(u64);

/// What the results panel is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    /// No stop selected yet
    Hidden,
    /// A fetch for the current selection is in flight
    Loading,
    /// The store holds the current selection's departures
    Loaded,
    /// The fetch for the current selection failed
    Failed,
}

/// State of the primary departure view.
#[derive(Debug, Clone)]
pub struct BoardSession {
    generation: u64,
    selection: Option<StopSelection>,
    store: DepartureStore,
    filter: DirectionFilter,
    directions: Vec<String>,
    panel: PanelState,
}

impl BoardSession {
    pub fn new() -> Self {
        Self {
            generation: 0,
            selection: None,
            store: DepartureStore::new(),
            filter: DirectionFilter::All,
            directions: Vec::new(),
            panel: PanelState::Hidden,
        }
    }

    /// Make `selection` current and start a new generation.
    ///
    /// The panel shows the loading placeholder until the returned token
    /// commits or fails.
    pub fn begin_selection(&mut self, selection: StopSelection) -> SelectionToken {
        self.generation += 1;
        self.selection = Some(selection);
        self.panel = PanelState::Loading;
        SelectionToken(self.generation)
    }

    /// Whether `token` belongs to the latest selection.
    pub fn is_current(&self, token: SelectionToken) -> bool {
        token.0 == self.generation
    }

    /// Store fetched departures for `token`'s selection.
    ///
    /// Resets pagination and the filter and recomputes the direction
    /// options. Returns `false`, changing nothing, if the token is stale.
    pub fn commit(
        &mut self,
        token: SelectionToken,
        departures: Vec<Departure>,
        fetched_at: DateTime<Local>,
    ) -> bool {
        if !self.is_current(token) {
            return false;
        }

        self.store.replace(departures, fetched_at);
        self.directions = derive_directions(self.store.departures());
        self.filter = DirectionFilter::All;
        self.panel = PanelState::Loaded;
        true
    }

    /// Record that the fetch for `token`'s selection failed.
    ///
    /// Returns `false`, changing nothing, if the token is stale.
    pub fn fail(&mut self, token: SelectionToken) -> bool {
        if !self.is_current(token) {
            return false;
        }

        self.store.clear();
        self.directions.clear();
        self.filter = DirectionFilter::All;
        self.panel = PanelState::Failed;
        true
    }

    /// Switch the direction filter and go back to the first page.
    pub fn change_filter(&mut self, filter: DirectionFilter) {
        self.filter = filter;
        self.store.cursor_mut().reset();
    }

    /// Reveal one more page. Does nothing unless departures are loaded.
    pub fn show_more(&mut self) {
        if self.panel == PanelState::Loaded {
            self.store.cursor_mut().advance();
        }
    }

    pub fn selection(&self) -> Option<&StopSelection> {
        self.selection.as_ref()
    }

    pub fn panel(&self) -> PanelState {
        self.panel
    }

    pub fn filter(&self) -> &DirectionFilter {
        &self.filter
    }

    pub fn directions(&self) -> &[String] {
        &self.directions
    }

    pub fn store(&self) -> &DepartureStore {
        &self.store
    }

    /// Build the results panel for the current state.
    pub fn view(&self) -> ResultsView {
        let heading = self
            .selection
            .as_ref()
            .map(|s| format!("Departures for {}", s.name))
            .unwrap_or_default();

        let (rows, show_more) = match self.panel {
            PanelState::Hidden => (Vec::new(), false),
            PanelState::Loading => (vec![Row::placeholder(LOADING_MESSAGE)], false),
            PanelState::Failed => (vec![Row::placeholder(ERROR_MESSAGE)], false),
            PanelState::Loaded => {
                let rendered = render(self.store.departures(), &self.filter, self.store.cursor());
                (rendered.rows, rendered.has_more)
            }
        };

        ResultsView {
            visible: self.panel != PanelState::Hidden,
            heading,
            stop: self.selection.clone(),
            updated_at: self
                .store
                .fetched_at()
                .filter(|_| self.panel == PanelState::Loaded)
                .map(|t| t.format("%H:%M:%S").to_string()),
            options: filter_options(&self.directions, &self.filter),
            rows,
            show_more,
        }
    }
}

impl Default for BoardSession {
    fn default() -> Self {
        Self::new()
    }
}
