//! Route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::header,
    response::IntoResponse,
    routing::{get, post},
};
use menu_forecast::models::recommendation::RecommendationRow;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{error::ApiError, state::AppState};

/// Routes served by the forecast API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/recommendations", get(all_recommendations))
        .route("/recommendations/{day}", get(recommendations_for_day))
        .route("/predict", post(predict))
        .route("/export", get(export))
}

/// Health probe payload.
#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` once the server is listening.
    pub status: String,
}

#[tracing::instrument(name = "GET /health")]
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

#[tracing::instrument(name = "GET /recommendations", skip(state))]
async fn all_recommendations(State(state): State<AppState>) -> Json<Vec<RecommendationRow>> {
    Json(state.all_recommendations().to_vec())
}

#[tracing::instrument(name = "GET /recommendations/{day}", skip(state))]
async fn recommendations_for_day(
    State(state): State<AppState>,
    Path(day): Path<String>,
) -> Result<Json<Vec<RecommendationRow>>, ApiError> {
    Ok(Json(state.recommendations(&day)?))
}

#[tracing::instrument(name = "POST /predict", skip(state, payload))]
async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Vec<f64>>, ApiError> {
    let Json(body) = payload?;
    Ok(Json(state.predict(&body)?))
}

/// Query string of `GET /export`.
#[derive(Debug, Deserialize)]
pub struct ExportParams {
    /// `"All"` (default) or an open day name.
    pub day: Option<String>,
}

#[tracing::instrument(name = "GET /export", skip(state))]
async fn export(
    State(state): State<AppState>,
    Query(params): Query<ExportParams>,
) -> Result<impl IntoResponse, ApiError> {
    let requested = params.day.as_deref().unwrap_or("All");
    let (selection, body) = state.export_csv(requested)?;
    let disposition = format!(
        "attachment; filename=\"production_recommendations_{}.csv\"",
        selection.file_tag()
    );
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}
