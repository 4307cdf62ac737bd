//! HTTP route handlers.

use std::path::Path;

use askama::Template;
use axum::{
    Form, Json, Router,
    extract::{Path as UrlPath, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::api::TransitApi;
use crate::domain::{FavouriteId, StopId, StopSelection};
use crate::favourites::{AddOutcome, RemoveOutcome};
use crate::stops::DEFAULT_SEARCH_LIMIT;

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router<A: TransitApi + 'static>(
    state: AppState<A>,
    static_dir: impl AsRef<Path>,
) -> Router {
    Router::new()
        .route("/", get(index_page::<A>))
        .route("/health", get(health))
        .route("/api/stops/search", get(search_stops::<A>))
        .route("/board", get(board_view::<A>))
        .route("/board/select", post(select_stop::<A>))
        .route("/board/filter", post(change_filter::<A>))
        .route("/board/more", post(show_more::<A>))
        .route("/favourites", get(favourites_view::<A>))
        .route("/favourites/preview", get(favourite_preview::<A>))
        .route("/favourites/add", post(add_favourite::<A>))
        .route("/favourites/:id/remove", post(remove_favourite::<A>))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn render(template: &impl Template) -> Result<String, AppError> {
    template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {e}"),
    })
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// The widget page.
async fn index_page<A: TransitApi>(
    State(state): State<AppState<A>>,
) -> Result<Html<String>, AppError> {
    let (results, favourites) = tokio::join!(state.board.view(), state.favourites.load());
    Ok(Html(render(&IndexTemplate {
        results,
        favourites,
    })?))
}

/// Search stops by name.
async fn search_stops<A>(
    State(state): State<AppState<A>>,
    Query(req): Query<StopSearchRequest>,
) -> Json<StopSearchResponse> {
    let limit = req.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
    let stops = state
        .stops
        .search(&req.q, limit)
        .into_iter()
        .map(StopSearchResult::from)
        .collect();

    Json(StopSearchResponse { stops })
}

/// Current results panel.
async fn board_view<A: TransitApi>(
    State(state): State<AppState<A>>,
) -> Result<Html<String>, AppError> {
    let results = state.board.view().await;
    Ok(Html(render(&ResultsTemplate { results })?))
}

/// Select a stop from the search control or a favourite card.
async fn select_stop<A: TransitApi>(
    State(state): State<AppState<A>>,
    Form(form): Form<SelectStopForm>,
) -> Result<Html<String>, AppError> {
    let id = StopId::parse(&form.id).map_err(|_| AppError::BadRequest {
        message: format!("Invalid stop id: {:?}", form.id),
    })?;

    let name = match form.name.trim() {
        "" => state
            .stops
            .get(&id)
            .map(|stop| stop.name.clone())
            .unwrap_or_else(|| id.to_string()),
        name => name.to_string(),
    };

    let results = state.board.select_stop(StopSelection::new(id, name)).await;
    Ok(Html(render(&ResultsTemplate { results })?))
}

/// Change the direction filter.
async fn change_filter<A: TransitApi>(
    State(state): State<AppState<A>>,
    Form(form): Form<FilterForm>,
) -> Result<Html<String>, AppError> {
    let results = state.board.change_filter(&form.direction).await;
    Ok(Html(render(&ResultsTemplate { results })?))
}

/// Reveal the next page of departures.
async fn show_more<A: TransitApi>(
    State(state): State<AppState<A>>,
) -> Result<Html<String>, AppError> {
    let results = state.board.show_more().await;
    Ok(Html(render(&ResultsTemplate { results })?))
}

/// Favourites panel.
async fn favourites_view<A: TransitApi>(
    State(state): State<AppState<A>>,
) -> Result<Html<String>, AppError> {
    let favourites = state.favourites.load().await;
    Ok(Html(render(&FavouritesTemplate { favourites })?))
}

/// One favourite's departure preview.
///
/// Each card fetches its own, so a slow stop holds up only its card.
async fn favourite_preview<A: TransitApi>(
    State(state): State<AppState<A>>,
    Query(req): Query<PreviewRequest>,
) -> Result<Html<String>, AppError> {
    let stop = StopId::parse(&req.stop_id).map_err(|_| AppError::BadRequest {
        message: format!("Invalid stop id: {:?}", req.stop_id),
    })?;

    let preview = state.favourites.preview(&stop).await;
    Ok(Html(render(&PreviewTemplate { preview })?))
}

/// Save the current stop as a favourite.
///
/// Responds with a notice and, once saved, the refreshed favourites panel.
async fn add_favourite<A: TransitApi>(
    State(state): State<AppState<A>>,
) -> Result<Html<String>, AppError> {
    let selection = state.board.current_selection().await;
    let outcome = state.favourites.add(selection.as_ref()).await;

    let Some(message) = outcome.message() else {
        return Ok(Html(String::new()));
    };

    let mut body = render(&NoticeTemplate {
        message: message.to_string(),
        success: !matches!(outcome, AddOutcome::Failed),
    })?;
    if let AddOutcome::Added(favourites) = outcome {
        body.push_str(&render(&FavouritesTemplate { favourites })?);
    }

    Ok(Html(body))
}

/// Remove a favourite once the user has confirmed.
async fn remove_favourite<A: TransitApi>(
    State(state): State<AppState<A>>,
    UrlPath(id): UrlPath<i64>,
    Form(form): Form<RemoveFavouriteForm>,
) -> Result<Html<String>, AppError> {
    let body = match state.favourites.remove(FavouriteId(id), &form.confirmed).await {
        RemoveOutcome::Declined => String::new(),
        RemoveOutcome::Removed(favourites) => render(&FavouritesTemplate { favourites })?,
        RemoveOutcome::Failed => render(&NoticeTemplate {
            message: "Failed to remove.".to_string(),
            success: false,
        })?,
    };

    Ok(Html(body))
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => {
                warn!(%message, "bad request");
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::Internal { message } => {
                error!(%message, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
