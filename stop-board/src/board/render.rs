//! Departure rendering.
//!
//! Turns the store, filter, and cursor into the rows the results table
//! shows. Filtering only ever subsets; rows are always a prefix of the
//! filtered list in the order the API returned it.

use crate::domain::{Departure, StopSelection};

use super::filter::{DirectionFilter, FilterOption};
use super::store::Cursor;

/// Placeholder shown while a selection's departures are being fetched.
pub const LOADING_MESSAGE: &str = "Loading...";

/// Placeholder shown when the fetch for the selected stop failed.
pub const ERROR_MESSAGE: &str = "Error loading data";

/// Placeholder shown when nothing matches the active filter.
pub const NO_DEPARTURES_MESSAGE: &str = "No departures found";

/// A departure formatted for the results table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartureRow {
    pub line: String,
    pub direction: String,
    pub countdown: String,
}

impl From<&Departure> for DepartureRow {
    fn from(departure: &Departure) -> Self {
        Self {
            line: departure.line.clone(),
            direction: departure.direction.clone(),
            countdown: departure.countdown_display(),
        }
    }
}

/// One row of the results table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    Departure(DepartureRow),
    /// Informational row spanning the whole table
    Placeholder(String),
}

impl Row {
    pub fn placeholder(message: &str) -> Self {
        Row::Placeholder(message.to_string())
    }
}

/// Rendered rows plus whether more are available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartureRows {
    pub rows: Vec<Row>,
    pub has_more: bool,
}

/// Render the visible rows for `departures` under `filter` and `cursor`.
pub fn render(departures: &[Departure], filter: &DirectionFilter, cursor: Cursor) -> DepartureRows {
    let filtered: Vec<&Departure> = departures.iter().filter(|d| filter.matches(d)).collect();

    if filtered.is_empty() {
        return DepartureRows {
            rows: vec![Row::placeholder(NO_DEPARTURES_MESSAGE)],
            has_more: false,
        };
    }

    let rows = filtered
        .iter()
        .take(cursor.get())
        .map(|d| Row::Departure(DepartureRow::from(*d)))
        .collect();

    DepartureRows {
        rows,
        has_more: filtered.len() > cursor.get(),
    }
}

/// Everything the results panel displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsView {
    /// Hidden until the first stop is selected
    pub visible: bool,
    pub heading: String,
    pub stop: Option<StopSelection>,
    /// Time of the fetch the rows came from, "HH:MM:SS"
    pub updated_at: Option<String>,
    pub options: Vec<FilterOption>,
    pub rows: Vec<Row>,
    pub show_more: bool,
}

impl ResultsView {
    /// The departure rows, skipping placeholders.
    pub fn departure_rows(&self) -> impl Iterator<Item = &DepartureRow> {
        self.rows.iter().filter_map(|row| match row {
            Row::Departure(d) => Some(d),
            Row::Placeholder(_) => None,
        })
    }

    /// The placeholder message, if the panel shows one.
    pub fn placeholder(&self) -> Option<&str> {
        match self.rows.as_slice() {
            [Row::Placeholder(message)] => Some(message),
            _ => None,
        }
    }
}
