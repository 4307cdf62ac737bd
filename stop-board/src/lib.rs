//! Transit departure board.
//!
//! A small server-rendered widget: pick a stop, page through its upcoming
//! departures filtered by direction, and keep a list of favourite stops
//! with a short departure preview for each.

pub mod api;
pub mod board;
pub mod config;
pub mod domain;
pub mod favourites;
pub mod stops;
pub mod web;
