//! Direction filter derivation.

use std::collections::HashSet;

use crate::domain::Departure;

/// Form value of the "every direction" option.
pub const ALL_DIRECTIONS: &str = "all";

/// Label of the "every direction" option.
const ALL_DIRECTIONS_LABEL: &str = "All Directions";

/// The active direction filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DirectionFilter {
    #[default]
    All,
    Direction(String),
}

impl DirectionFilter {
    /// Interpret a submitted filter value.
    pub fn parse(value: &str) -> Self {
        if value == ALL_DIRECTIONS {
            DirectionFilter::All
        } else {
            DirectionFilter::Direction(value.to_string())
        }
    }

    /// The value submitted for this filter.
    pub fn value(&self) -> &str {
        match self {
            DirectionFilter::All => ALL_DIRECTIONS,
            DirectionFilter::Direction(d) => d,
        }
    }

    pub fn matches(&self, departure: &Departure) -> bool {
        match self {
            DirectionFilter::All => true,
            DirectionFilter::Direction(d) => &departure.direction == d,
        }
    }
}

/// Distinct directions in the order they first appear.
pub fn derive_directions(departures: &[Departure]) -> Vec<String> {
    let mut seen = HashSet::new();
    departures
        .iter()
        .filter(|d| seen.insert(d.direction.as_str()))
        .map(|d| d.direction.clone())
        .collect()
}

/// One entry of the direction dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Dropdown entries: "all" first, then each direction.
pub fn filter_options(directions: &[String], active: &DirectionFilter) -> Vec<FilterOption> {
    let all = FilterOption {
        value: ALL_DIRECTIONS.to_string(),
        label: ALL_DIRECTIONS_LABEL.to_string(),
        selected: *active == DirectionFilter::All,
    };

    std::iter::once(all)
        .chain(directions.iter().map(|d| FilterOption {
            value: d.clone(),
            label: d.clone(),
            selected: matches!(active, DirectionFilter::Direction(a) if a == d),
        }))
        .collect()
}
