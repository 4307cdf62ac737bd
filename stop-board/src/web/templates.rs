//! Askama templates for the widget.
//!
//! Templates only bind view models; every decision about what to show is
//! made by the board and favourites controllers.

use askama::Template;

use crate::board::{ResultsView, Row};
use crate::favourites::{FavouritesPanel, Preview};

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// The widget page: search control, results, favourites.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub results: ResultsView,
    pub favourites: FavouritesPanel,
}

// ============================================================================
// Fragment Templates (swapped into the page, no base.html)
// ============================================================================

/// Results panel fragment.
#[derive(Template)]
#[template(path = "results.html")]
pub struct ResultsTemplate {
    pub results: ResultsView,
}

/// Favourites panel fragment.
#[derive(Template)]
#[template(path = "favourites.html")]
pub struct FavouritesTemplate {
    pub favourites: FavouritesPanel,
}

/// One favourite's departure preview, swapped into its card.
#[derive(Template)]
#[template(path = "preview.html")]
pub struct PreviewTemplate {
    pub preview: Preview,
}

/// One-line user notification.
#[derive(Template)]
#[template(path = "notice.html")]
pub struct NoticeTemplate {
    pub message: String,
    pub success: bool,
}
