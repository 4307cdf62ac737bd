//! In-memory transit API for development and tests.
//!
//! Serves configurable departure lists and keeps favourites in memory,
//! mimicking the real API's conflict and failure behaviour. Individual
//! stops can be made to fail or to hold their response until released,
//! which is how overlapping-fetch races are reproduced.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::Notify;

use crate::domain::{Departure, Favourite, FavouriteId, StopId, StopSelection};

use super::error::ApiError;
use super::transit::TransitApi;

/// Lines served by the demo data: (stop, line, direction, first countdown, headway).
const DEMO_LINES: &[(&str, &str, &str, u32, u32)] = &[
    ("4205", "U1", "Leopoldau", 1, 4),
    ("4205", "U1", "Oberlaa", 2, 4),
    ("4205", "U4", "Heiligenstadt", 0, 5),
    ("4205", "U4", "Hütteldorf", 3, 5),
    ("4205", "U2", "Seestadt", 4, 8),
    ("147", "D", "Nußdorf", 2, 7),
    ("147", "1", "Prater Hauptallee", 5, 9),
    ("147", "71", "Kaiserebersdorf", 1, 12),
];

/// Stops known to the demo data, including one with no service.
const DEMO_STOPS: &[(&str, &str)] = &[
    ("4205", "Karlsplatz"),
    ("147", "Schottentor"),
    ("4911", "Westbahnhof (Nachtbetrieb)"),
];

/// Countdowns beyond this are not generated for the demo.
const DEMO_HORIZON_MINS: u32 = 45;

/// Handle that releases a held departure lookup.
#[derive(Debug, Clone)]
pub struct MockGate(Arc<Notify>);

impl MockGate {
    /// Let the held lookup complete.
    pub fn release(&self) {
        self.0.notify_one();
    }
}

#[derive(Default)]
struct MockState {
    departures: HashMap<StopId, Vec<Departure>>,
    failing_stops: HashSet<StopId>,
    gates: HashMap<StopId, Arc<Notify>>,
    favourites: Vec<Favourite>,
    next_favourite_id: i64,
    fail_favourites: bool,
    fail_mutations: bool,
    departure_requests: usize,
    mutation_requests: usize,
}

/// In-memory transit API.
///
/// Unknown stops have no departures, matching the real API.
#[derive(Clone, Default)]
pub struct MockApi {
    state: Arc<Mutex<MockState>>,
}

impl MockApi {
    /// Create an empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock populated with a handful of Vienna stops and one
    /// saved favourite.
    pub fn demo() -> Self {
        let mock = Self::new();

        let mut by_stop: HashMap<&str, Vec<Departure>> = HashMap::new();
        for &(stop, line, direction, first, headway) in DEMO_LINES {
            let departures = by_stop.entry(stop).or_default();
            departures.extend(
                (first..=DEMO_HORIZON_MINS)
                    .step_by(headway as usize)
                    .map(|countdown| Departure::new(line, direction, countdown)),
            );
        }

        for &(stop, _) in DEMO_STOPS {
            let Ok(id) = StopId::parse(stop) else {
                continue;
            };
            let mut departures = by_stop.remove(stop).unwrap_or_default();
            departures.sort_by_key(|d| d.countdown);
            mock.set_departures(&id, departures);
        }

        if let Some(karlsplatz) = mock.known_stops().into_iter().next() {
            mock.add_saved(&karlsplatz);
        }

        mock
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stops the demo data knows about.
    pub fn known_stops(&self) -> Vec<StopSelection> {
        DEMO_STOPS
            .iter()
            .filter_map(|&(id, name)| {
                StopId::parse(id)
                    .ok()
                    .map(|id| StopSelection::new(id, name))
            })
            .collect()
    }

    /// Serve `departures` for `stop`, clearing any configured failure.
    pub fn set_departures(&self, stop: &StopId, departures: Vec<Departure>) {
        let mut state = self.lock();
        state.failing_stops.remove(stop);
        state.departures.insert(stop.clone(), departures);
    }

    /// Make lookups for `stop` fail as if the response could not be decoded.
    pub fn fail_departures(&self, stop: &StopId) {
        self.lock().failing_stops.insert(stop.clone());
    }

    /// Hold the next lookup for `stop` until the returned gate is released.
    pub fn hold_departures(&self, stop: &StopId) -> MockGate {
        let notify = Arc::new(Notify::new());
        self.lock().gates.insert(stop.clone(), notify.clone());
        MockGate(notify)
    }

    /// Save a favourite directly, bypassing conflict checks and counters.
    pub fn add_saved(&self, stop: &StopSelection) -> FavouriteId {
        let mut state = self.lock();
        state.next_favourite_id += 1;
        let id = FavouriteId(state.next_favourite_id);
        state.favourites.push(Favourite {
            id,
            stop_id: stop.id.clone(),
            stop_name: stop.name.clone(),
        });
        id
    }

    /// Make `GET /api/favourites` fail.
    pub fn fail_favourites(&self, fail: bool) {
        self.lock().fail_favourites = fail;
    }

    /// Make favourite creation and deletion fail with a server error.
    pub fn fail_mutations(&self, fail: bool) {
        self.lock().fail_mutations = fail;
    }

    /// Currently saved favourites.
    pub fn saved(&self) -> Vec<Favourite> {
        self.lock().favourites.clone()
    }

    /// Number of departure lookups received.
    pub fn departure_requests(&self) -> usize {
        self.lock().departure_requests
    }

    /// Number of favourite create/delete requests received.
    pub fn mutation_requests(&self) -> usize {
        self.lock().mutation_requests
    }
}

fn mock_parse_error() -> ApiError {
    ApiError::Json {
        message: "expected value at line 1 column 1".to_string(),
        body: None,
    }
}

fn mock_server_error() -> ApiError {
    ApiError::Api {
        status: 500,
        message: "mock failure".to_string(),
    }
}

impl TransitApi for MockApi {
    async fn departures(&self, stop: &StopId) -> Result<Vec<Departure>, ApiError> {
        let gate = {
            let mut state = self.lock();
            state.departure_requests += 1;
            state.gates.remove(stop)
        };

        if let Some(gate) = gate {
            gate.notified().await;
        }

        let state = self.lock();
        if state.failing_stops.contains(stop) {
            return Err(mock_parse_error());
        }
        Ok(state.departures.get(stop).cloned().unwrap_or_default())
    }

    async fn favourites(&self) -> Result<Vec<Favourite>, ApiError> {
        let state = self.lock();
        if state.fail_favourites {
            return Err(mock_parse_error());
        }
        Ok(state.favourites.clone())
    }

    async fn add_favourite(&self, stop: &StopSelection) -> Result<(), ApiError> {
        {
            let mut state = self.lock();
            state.mutation_requests += 1;
            if state.fail_mutations {
                return Err(mock_server_error());
            }
            if state.favourites.iter().any(|f| f.stop_id == stop.id) {
                return Err(ApiError::Conflict);
            }
        }
        self.add_saved(stop);
        Ok(())
    }

    async fn remove_favourite(&self, id: FavouriteId) -> Result<(), ApiError> {
        let mut state = self.lock();
        state.mutation_requests += 1;
        if state.fail_mutations {
            return Err(mock_server_error());
        }

        let before = state.favourites.len();
        state.favourites.retain(|f| f.id != id);
        if state.favourites.len() == before {
            return Err(ApiError::Api {
                status: 404,
                message: format!("favourite {id} not found"),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(id: &str) -> StopId {
        StopId::parse(id).unwrap()
    }

    #[tokio::test]
    async fn demo_data_is_sorted_by_countdown() {
        let mock = MockApi::demo();
        let departures = mock.departures(&stop("4205")).await.unwrap();

        assert!(departures.len() > 20);
        assert!(departures.windows(2).all(|w| w[0].countdown <= w[1].countdown));
    }

    #[tokio::test]
    async fn demo_has_stop_without_service() {
        let mock = MockApi::demo();
        let departures = mock.departures(&stop("4911")).await.unwrap();
        assert!(departures.is_empty());
        assert_eq!(mock.known_stops().len(), 3);
        assert_eq!(mock.saved().len(), 1);
    }

    #[tokio::test]
    async fn unknown_stop_has_no_departures() {
        let mock = MockApi::new();
        let departures = mock.departures(&stop("nowhere")).await.unwrap();
        assert!(departures.is_empty());
    }

    #[tokio::test]
    async fn failing_stop_returns_parse_error() {
        let mock = MockApi::new();
        mock.fail_departures(&stop("147"));

        let err = mock.departures(&stop("147")).await.unwrap_err();
        assert!(err.is_network_or_parse());
    }

    #[tokio::test]
    async fn duplicate_favourite_conflicts() {
        let mock = MockApi::new();
        let selection = StopSelection::new(stop("147"), "Schottentor");

        mock.add_favourite(&selection).await.unwrap();
        let err = mock.add_favourite(&selection).await.unwrap_err();

        assert!(matches!(err, ApiError::Conflict));
        assert_eq!(mock.saved().len(), 1);
        assert_eq!(mock.mutation_requests(), 2);
    }

    #[tokio::test]
    async fn remove_unknown_favourite_fails() {
        let mock = MockApi::new();
        let err = mock.remove_favourite(FavouriteId(5)).await.unwrap_err();
        assert!(matches!(err, ApiError::Api { status: 404, .. }));
    }

    #[tokio::test]
    async fn held_lookup_waits_for_release() {
        let mock = MockApi::new();
        mock.set_departures(&stop("147"), vec![Departure::new("D", "Nußdorf", 2)]);
        let gate = mock.hold_departures(&stop("147"));

        let lookup = tokio::spawn({
            let mock = mock.clone();
            async move { mock.departures(&stop("147")).await }
        });

        tokio::task::yield_now().await;
        assert!(!lookup.is_finished());

        gate.release();
        let departures = lookup.await.unwrap().unwrap();
        assert_eq!(departures.len(), 1);
    }
}
