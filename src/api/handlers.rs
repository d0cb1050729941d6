use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{EnrichedResult, RecommendationOutcome},
};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub query: String,
    pub results: Vec<EnrichedResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// All selectable titles, in catalog order
pub async fn list_titles(State(state): State<AppState>) -> Json<Vec<String>> {
    let titles = state
        .recommender
        .titles()
        .into_iter()
        .map(str::to_string)
        .collect();
    Json(titles)
}

/// Recommends movies similar to the `title` query parameter
///
/// An unknown title answers 404 with an empty result list so the client can
/// simply pick another title.
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<RecommendationQuery>,
) -> AppResult<(StatusCode, Json<RecommendationResponse>)> {
    if params.title.trim().is_empty() {
        return Err(AppError::InvalidInput("Title cannot be empty".to_string()));
    }

    tracing::info!(
        request_id = %request_id,
        title = %params.title,
        "Processing recommendation request"
    );

    let outcome = state.recommender.recommend(&params.title).await?;

    let response = match outcome {
        RecommendationOutcome::Found(results) => (
            StatusCode::OK,
            Json(RecommendationResponse {
                query: params.title,
                results,
                error: None,
            }),
        ),
        RecommendationOutcome::NotFound { title } => (
            StatusCode::NOT_FOUND,
            Json(RecommendationResponse {
                error: Some(format!("Movie '{}' not found in the dataset", title)),
                query: title,
                results: Vec::new(),
            }),
        ),
    };

    tracing::info!(
        request_id = %request_id,
        status = %response.0,
        results = response.1.results.len(),
        "Recommendation request completed"
    );

    Ok(response)
}
