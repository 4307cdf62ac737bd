//! Favourite stops with inline departure previews.

mod controller;
mod preview;

pub use controller::{
    AddOutcome, ConfirmPrompt, FavouriteCard, Favourites, FavouritesPanel, REMOVE_PROMPT,
    RemoveOutcome,
};
pub use preview::{DirectionPreview, PREVIEW_TIMES, Preview, group_by_direction};
