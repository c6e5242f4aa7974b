use crate::config::Config;
use crate::errors::AppError;
use crate::forms::{
    FormError, InstagramVerificationForm, Phase, SearchHit, TwitterVerificationForm,
    UniversalSearch, ViewState,
};
use crate::handoff::{ReportForm, ReportHandoff, TwitterHandoff};
use crate::models::{QueryRequest, UsernameRequest};
use crate::prediction_client::PredictionClient;
use crate::verification::{InstagramVerification, TwitterVerification};
use crate::views;
use axum::{
    extract::{Query, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Client for the prediction/search service.
    pub client: PredictionClient,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, AppError> {
        let client = PredictionClient::from_config(&config)?;
        Ok(Self { config, client })
    }
}

#[derive(Debug, Deserialize)]
pub struct UsernameForm {
    #[serde(default)]
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct QueryForm {
    #[serde(default)]
    pub query: String,
}

/// Health check endpoint.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "rust-verify-dashboard",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// GET /
pub async fn index() -> Html<String> {
    Html(views::index_page())
}

/// Fallback for unknown routes. API paths get the JSON error body.
pub async fn not_found(uri: Uri) -> Response {
    tracing::debug!("No route for {}", uri.path());
    if uri.path().starts_with("/api/") {
        return AppError::NotFound(format!("No API route for {}", uri.path())).into_response();
    }
    (StatusCode::NOT_FOUND, Html(views::not_found_page(uri.path()))).into_response()
}

/// GET /instagram
pub async fn instagram_form() -> Html<String> {
    Html(views::instagram_page("", &ViewState::default()))
}

/// POST /instagram
pub async fn instagram_verify(
    State(state): State<Arc<AppState>>,
    Form(form): Form<UsernameForm>,
) -> Html<String> {
    tracing::info!("POST /instagram - username: {:?}", form.username);
    let verifier = InstagramVerificationForm::new(state.client.clone());
    let view = verifier.submit(&form.username).await;
    Html(views::instagram_page(&form.username, &view))
}

/// GET /twitter
///
/// Also the target of the search hand-off, which pre-fills the username.
pub async fn twitter_form(Query(handoff): Query<TwitterHandoff>) -> Html<String> {
    let prefill = handoff.prefill().unwrap_or_default();
    Html(views::twitter_page(prefill, &ViewState::default()))
}

/// POST /twitter
pub async fn twitter_verify(
    State(state): State<Arc<AppState>>,
    Form(form): Form<UsernameForm>,
) -> Html<String> {
    tracing::info!("POST /twitter - username: {:?}", form.username);
    let verifier = TwitterVerificationForm::new(state.client.clone());
    let view = verifier.submit(&form.username).await;
    Html(views::twitter_page(&form.username, &view))
}

/// GET /search
pub async fn search_form() -> Html<String> {
    Html(views::search_page("", &ViewState::default()))
}

/// POST /search
pub async fn search(
    State(state): State<Arc<AppState>>,
    Form(form): Form<QueryForm>,
) -> Html<String> {
    tracing::info!("POST /search - query: {:?}", form.query);
    let search = UniversalSearch::new(state.client.clone());
    let view = search.submit(&form.query).await;
    Html(views::search_page(&form.query, &view))
}

/// POST /report
///
/// Receives the profile handed off by a verification page.
pub async fn report(Form(form): Form<ReportForm>) -> (StatusCode, Html<String>) {
    match ReportHandoff::from_form(&form) {
        Ok(handoff) => {
            tracing::info!(
                "Report hand-off received for {} account {}",
                handoff.platform(),
                handoff.identity()
            );
            (StatusCode::OK, Html(views::report_page(&handoff)))
        }
        Err(e) => {
            tracing::warn!("Rejected report hand-off: {}", e);
            (
                StatusCode::BAD_REQUEST,
                Html(views::report_error_page(&e.to_string())),
            )
        }
    }
}

/// Converts a view state into the JSON API contract.
///
/// A validation error is a 400 and a failed primary request is a 502. A
/// social-links failure alone still returns the verdict.
fn api_response<T: Serialize>(view: ViewState<T>) -> Result<Json<ViewState<T>>, AppError> {
    let failure = match (&view.error, view.phase) {
        (Some(FormError::Validation(msg)), _) => Some(AppError::BadRequest(msg.clone())),
        (Some(FormError::Request(msg)), Phase::Error) => {
            Some(AppError::ExternalApiError(msg.clone()))
        }
        _ => None,
    };

    match failure {
        Some(err) => Err(err),
        None => Ok(Json(view)),
    }
}

/// POST /api/v1/verify/instagram
pub async fn api_verify_instagram(
    State(state): State<Arc<AppState>>,
    Json(request): Json<UsernameRequest>,
) -> Result<Json<ViewState<InstagramVerification>>, AppError> {
    let verifier = InstagramVerificationForm::new(state.client.clone());
    api_response(verifier.submit(&request.username).await)
}

/// POST /api/v1/verify/twitter
pub async fn api_verify_twitter(
    State(state): State<Arc<AppState>>,
    Json(request): Json<UsernameRequest>,
) -> Result<Json<ViewState<TwitterVerification>>, AppError> {
    let verifier = TwitterVerificationForm::new(state.client.clone());
    api_response(verifier.submit(&request.username).await)
}

/// POST /api/v1/search
pub async fn api_search(
    State(state): State<Arc<AppState>>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<ViewState<Vec<SearchHit>>>, AppError> {
    let search = UniversalSearch::new(state.client.clone());
    api_response(search.submit(&request.query).await)
}
