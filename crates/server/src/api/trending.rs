use axum::{extract::State, http::StatusCode, Json};
use reelsmith_core::{top_category, Candidate};
use serde::Serialize;
use std::sync::Arc;
use tracing::error;

use super::handlers::ErrorResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct TrendingResponse {
    pub videos: Vec<Candidate>,
    pub top_category: Option<String>,
}

/// Current trending candidates and their dominant category.
pub async fn get_trending(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TrendingResponse>, (StatusCode, Json<ErrorResponse>)> {
    let videos = state.discovery().fetch_candidates().await.map_err(|e| {
        error!("Failed to fetch trending videos: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(format!(
                "Failed to fetch trending videos: {}",
                e
            ))),
        )
    })?;

    Ok(Json(TrendingResponse {
        top_category: top_category(&videos),
        videos,
    }))
}
