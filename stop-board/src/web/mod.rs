//! Web layer for the departure board.
//!
//! Serves the widget page and the HTML fragments its forms swap in.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
