//! Compact per-direction departure previews.

use crate::domain::{Departure, format_minutes};

/// Countdowns shown per direction.
pub const PREVIEW_TIMES: usize = 2;

/// The next departures in one direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectionPreview {
    pub direction: String,
    /// e.g. "3 min, 8 min"
    pub times: String,
}

/// What a favourite's preview area shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    /// Not fetched yet
    Loading,
    Directions(Vec<DirectionPreview>),
    /// The stop has no upcoming departures
    Empty,
    /// The lookup for this stop failed
    Failed,
}

impl Preview {
    /// Build the preview for a fetched departure list.
    pub fn from_departures(departures: &[Departure]) -> Self {
        if departures.is_empty() {
            Preview::Empty
        } else {
            Preview::Directions(group_by_direction(departures))
        }
    }
}

/// Group departures by direction.
///
/// Directions keep their first-seen order and each keeps its first
/// [`PREVIEW_TIMES`] countdowns in arrival order.
pub fn group_by_direction(departures: &[Departure]) -> Vec<DirectionPreview> {
    let mut groups: Vec<(&str, Vec<u32>)> = Vec::new();

    for departure in departures {
        let direction = departure.direction.as_str();
        match groups.iter_mut().find(|(d, _)| *d == direction) {
            Some((_, times)) => times.push(departure.countdown),
            None => groups.push((direction, vec![departure.countdown])),
        }
    }

    groups
        .into_iter()
        .map(|(direction, times)| DirectionPreview {
            direction: direction.to_string(),
            times: times
                .into_iter()
                .take(PREVIEW_TIMES)
                .map(format_minutes)
                .collect::<Vec<_>>()
                .join(", "),
        })
        .collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn departures_strategy() -> impl Strategy<Value = Vec<Departure>> {
        prop::collection::vec(
            (0usize..4, 0u32..60).prop_map(|(d, c)| Departure::new("5", format!("Dir{d}"), c)),
            0..40,
        )
    }

    proptest! {
        #[test]
        fn one_group_per_direction_in_first_seen_order(departures in departures_strategy()) {
            let groups = group_by_direction(&departures);
            let directions: Vec<&str> = groups.iter().map(|g| g.direction.as_str()).collect();

            let mut expected: Vec<&str> = Vec::new();
            for d in &departures {
                if !expected.contains(&d.direction.as_str()) {
                    expected.push(&d.direction);
                }
            }
            prop_assert_eq!(directions, expected);
        }

        #[test]
        fn groups_never_exceed_cap(departures in departures_strategy()) {
            for group in group_by_direction(&departures) {
                let count = group.times.split(", ").count();
                prop_assert!(count >= 1 && count <= PREVIEW_TIMES);
                prop_assert!(group.times.split(", ").all(|t| t.ends_with(" min")));
            }
        }
    }
}
