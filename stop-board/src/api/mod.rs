//! Client for the transit HTTP API.
//!
//! The API is an external collaborator: it looks up departures for a stop
//! and stores the user's favourites. Everything the board needs from it
//! goes through the [`TransitApi`] trait so controllers can run against
//! the real HTTP client, the caching wrapper, or the in-memory mock.

mod cache;
mod client;
mod error;
mod mock;
mod transit;
mod types;

pub use cache::{CacheConfig, CachedApi};
pub use client::{ApiClient, ApiConfig};
pub use error::ApiError;
pub use mock::{MockApi, MockGate};
pub use transit::TransitApi;
pub use types::{CreateFavouriteRequest, DepartureDto, FavouriteDto, StatusResponse};
