use crate::handlers::{self, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Dashboard pages and JSON API. `/health` is mounted separately in `main`
/// so it stays outside the rate limiter.
pub fn app_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Dashboard pages
        .route("/", get(handlers::index))
        .route(
            "/instagram",
            get(handlers::instagram_form).post(handlers::instagram_verify),
        )
        .route(
            "/twitter",
            get(handlers::twitter_form).post(handlers::twitter_verify),
        )
        .route("/search", get(handlers::search_form).post(handlers::search))
        .route("/report", post(handlers::report))
        // JSON API
        .route(
            "/api/v1/verify/instagram",
            post(handlers::api_verify_instagram),
        )
        .route("/api/v1/verify/twitter", post(handlers::api_verify_twitter))
        .route("/api/v1/search", post(handlers::api_search))
        .fallback(handlers::not_found)
}
