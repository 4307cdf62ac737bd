//! Departure store and pagination cursor.

use chrono::{DateTime, Local};

use crate::domain::Departure;

/// Number of rows revealed per page.
pub const PAGE_SIZE: usize = 10;

/// How many filtered departures are currently revealed.
///
/// Starts at one page and only ever grows by whole pages until reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor(usize);

impl Cursor {
    pub fn new() -> Self {
        Self(PAGE_SIZE)
    }

    /// Number of rows to reveal.
    pub fn get(self) -> usize {
        self.0
    }

    /// Reveal one more page.
    pub fn advance(&mut self) {
        self.0 = self.0.saturating_add(PAGE_SIZE);
    }

    /// Back to the first page.
    pub fn reset(&mut self) {
        self.0 = PAGE_SIZE;
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

/// The last-fetched departure list for the selected stop, plus the
/// pagination cursor over it.
#[derive(Debug, Clone, Default)]
pub struct DepartureStore {
    departures: Vec<Departure>,
    cursor: Cursor,
    fetched_at: Option<DateTime<Local>>,
}

impl DepartureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents wholesale and go back to the first page.
    pub fn replace(&mut self, departures: Vec<Departure>, fetched_at: DateTime<Local>) {
        self.departures = departures;
        self.fetched_at = Some(fetched_at);
        self.cursor.reset();
    }

    /// Forget everything, e.g. after a failed fetch.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn departures(&self) -> &[Departure] {
        &self.departures
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn cursor_mut(&mut self) -> &mut Cursor {
        &mut self.cursor
    }

    /// When the current contents were fetched.
    pub fn fetched_at(&self) -> Option<DateTime<Local>> {
        self.fetched_at
    }
}
