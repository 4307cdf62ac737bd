//! Departure predictions.

/// A predicted departure from a stop.
///
/// Departures are transient: a stop's list is fetched and replaced
/// wholesale, never edited in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    /// Line name (e.g. "U1", "13A")
    pub line: String,

    /// Direction the vehicle is heading, as shown on the vehicle
    pub direction: String,

    /// Minutes until departure
    pub countdown: u32,
}

impl Departure {
    pub fn new(line: impl Into<String>, direction: impl Into<String>, countdown: u32) -> Self {
        Self {
            line: line.into(),
            direction: direction.into(),
            countdown,
        }
    }

    /// Countdown formatted for display, e.g. "5 min".
    pub fn countdown_display(&self) -> String {
        format_minutes(self.countdown)
    }
}

/// Format a minute count with its unit suffix.
pub(crate) fn format_minutes(minutes: u32) -> String {
    format!("{minutes} min")
}
