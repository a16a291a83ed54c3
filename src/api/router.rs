//! Route handlers and router assembly.

use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;

use crate::config::Config;
use crate::formulary;
use crate::report::{CheckRequest, CheckResponse, InteractionChecker};

use super::error::ApiError;
use super::page::INDEX_PAGE_HTML;

/// Shared state for all handlers.
#[derive(Clone)]
pub struct ApiContext {
    pub checker: Arc<InteractionChecker>,
    pub config: Arc<Config>,
}

impl ApiContext {
    pub fn new(checker: InteractionChecker, config: Config) -> Self {
        Self {
            checker: Arc::new(checker),
            config: Arc::new(config),
        }
    }
}

/// Build the API router: the check endpoint, two lookup endpoints, and
/// the static front page.
pub fn api_router(ctx: ApiContext) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/check", post(check))
        .route("/api/drugs", get(drugs))
        .route("/api/health", get(health))
        .with_state(ctx)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE_HTML)
}

/// `POST /api/check` — run one interaction check.
///
/// The pipeline makes blocking HTTP calls, so it runs on the blocking
/// thread pool; the handler just awaits the result.
async fn check(
    State(ctx): State<ApiContext>,
    Json(request): Json<CheckRequest>,
) -> Result<Json<CheckResponse>, ApiError> {
    let checker = ctx.checker.clone();
    let response = tokio::task::spawn_blocking(move || checker.check(&request.medications))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    Ok(Json(response))
}

#[derive(Serialize)]
struct DrugListResponse {
    drugs: Vec<String>,
    note: &'static str,
}

/// `GET /api/drugs` — formulary names for autocomplete.
async fn drugs() -> Json<DrugListResponse> {
    Json(DrugListResponse {
        drugs: formulary::drug_list(),
        note: "You can also type any drug name — the app will query FDA data even for drugs \
not in this list.",
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    model: String,
    api_configured: bool,
    nvidia_endpoint: String,
}

/// `GET /api/health` — service status and upstream configuration.
async fn health(State(ctx): State<ApiContext>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        model: ctx.config.model.clone(),
        api_configured: ctx.config.api_configured(),
        nvidia_endpoint: ctx.config.nim_base_url.clone(),
    })
}
