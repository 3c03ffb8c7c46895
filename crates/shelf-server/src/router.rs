use axum::{routing::get, routing::post, Router};
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{handler, pages};

/// Build the axum router with all Shelf pages and endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::library_page))
        .route("/add", get(pages::add_page).post(pages::add_submit))
        .route("/remove", get(pages::remove_page).post(pages::remove_submit))
        .route("/toggle", get(pages::toggle_page).post(pages::toggle_submit))
        .route("/search", get(pages::search_page))
        .route("/genre", get(pages::genre_page))
        .route("/stats", get(pages::stats_page))
        .route("/reset", post(pages::reset_submit))
        .route("/v1/health", get(handler::health_handler))
        .route("/v1/info", get(handler::info_handler))
        .route("/v1/books", get(handler::books_handler))
        .route("/v1/stats", get(handler::stats_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
