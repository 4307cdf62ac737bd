//! Stop catalogue backing the stop search control.
//!
//! Maps stop ids to display names, loaded from a JSON file at startup.

mod catalogue;
mod error;

pub use catalogue::{DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT, StopCatalogue};
pub use error::CatalogueError;
