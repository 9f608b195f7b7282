//! # API Endpoint Handlers
//!
//! Every handler that touches the browser context runs on the blocking
//! pool: navigation may perform a blocking HTTP fetch, and the store is a
//! synchronous database.

use super::{
    AppState,
    shell::shell_page,
    types::{
        FavoritesResponse, HealthResponse, StatusResponse, ToggleRequest, ToggleResponse,
        ViewQuery, ViewResponse,
    },
};
use crate::browser::Browser;
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
};
use holocron_core::HolocronError;
use std::sync::Arc;

/// Run `f` with exclusive access to the browser, off the async workers.
async fn with_browser<F, R>(state: &AppState, f: F) -> Result<R, String>
where
    F: FnOnce(&mut Browser) -> R + Send + 'static,
    R: Send + 'static,
{
    let browser = Arc::clone(&state.browser);
    tokio::task::spawn_blocking(move || {
        let mut guard = browser.blocking_lock();
        f(&mut guard)
    })
    .await
    .map_err(|e| format!("Worker failed: {}", e))
}

// =============================================================================
// SHELL & HEALTH
// =============================================================================

/// The single page.
pub async fn shell_handler() -> impl IntoResponse {
    Html(shell_page())
}

pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// STATUS HANDLER
// =============================================================================

/// Cache and favorites counts.
pub async fn status_handler(State(state): State<AppState>) -> impl IntoResponse {
    let result = with_browser(&state, |browser| -> Result<StatusResponse, HolocronError> {
        Ok(StatusResponse {
            cache_entries: browser.cache().entries()?.len(),
            favorites: browser.favorites().list()?.len(),
        })
    })
    .await;

    match result {
        Ok(Ok(status)) => (StatusCode::OK, Json(status)).into_response(),
        Ok(Err(e)) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e).into_response(),
    }
}

// =============================================================================
// VIEW HANDLER
// =============================================================================

/// Navigate to `fragment` and return the resulting view.
///
/// View failures are already rendered into `html`, so this answers 200 for
/// every fragment.
pub async fn view_handler(
    State(state): State<AppState>,
    Query(query): Query<ViewQuery>,
) -> impl IntoResponse {
    let result = with_browser(&state, move |browser| {
        browser.viewport_mut().clear();
        let route = browser.navigate(&query.fragment);
        ViewResponse::from_viewport(&route, browser.viewport())
    })
    .await;

    match result {
        Ok(view) => (StatusCode::OK, Json(view)),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, Json(ViewResponse::error(e))),
    }
}

// =============================================================================
// FAVORITES HANDLERS
// =============================================================================

pub async fn favorites_handler(State(state): State<AppState>) -> impl IntoResponse {
    let result = with_browser(&state, |browser| browser.favorites().list()).await;

    match result {
        Ok(Ok(records)) => (StatusCode::OK, Json(FavoritesResponse::success(records))),
        Ok(Err(e)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(FavoritesResponse::error(format!("Cannot read favorites: {}", e))),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(FavoritesResponse::error(e)),
        ),
    }
}

/// Flip the favorite state of one entity and return the new control.
pub async fn toggle_handler(
    State(state): State<AppState>,
    Json(request): Json<ToggleRequest>,
) -> impl IntoResponse {
    let (category, id) = match request.target() {
        Ok(target) => target,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ToggleResponse::error(format!("Invalid favorite: {}", e))),
            );
        }
    };
    let name = request.name;

    let result = with_browser(&state, move |browser| {
        let favorite = browser.toggle_favorite(category, id, &name)?;
        let control = browser
            .viewport()
            .favorite_control()
            .unwrap_or_default()
            .to_string();
        Ok::<_, HolocronError>((favorite, control))
    })
    .await;

    match result {
        Ok(Ok((favorite, control))) => (
            StatusCode::OK,
            Json(ToggleResponse::success(favorite, control)),
        ),
        Ok(Err(e)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ToggleResponse::error(format!("Toggle failed: {}", e))),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ToggleResponse::error(e)),
        ),
    }
}
