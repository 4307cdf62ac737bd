//! Core domain types for the departure board.
//!
//! These types are independent of the transit API's wire format and of
//! the rendering layer.

mod departure;
mod error;
mod favourite;
mod stop;

pub use departure::Departure;
pub(crate) use departure::format_minutes;
pub use error::DomainError;
pub use favourite::{Favourite, FavouriteId};
pub use stop::{StopId, StopSelection};
