//! The primary departure board.
//!
//! Holds the selected stop's departures, derives the direction filter,
//! paginates the filtered list, and guards against stale responses from
//! superseded selections.

mod controller;
mod filter;
mod render;
mod session;
mod store;

pub use controller::StopBoard;
pub use filter::{ALL_DIRECTIONS, DirectionFilter, FilterOption, derive_directions, filter_options};
pub use render::{
    DepartureRow, DepartureRows, ERROR_MESSAGE, LOADING_MESSAGE, NO_DEPARTURES_MESSAGE, ResultsView,
    Row, render,
};
pub use session::{BoardSession, PanelState, SelectionToken};
pub use store::{Cursor, DepartureStore, PAGE_SIZE};
