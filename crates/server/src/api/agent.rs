//! Pipeline agent endpoints.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use reelsmith_core::{AgentError, AgentStatus, OutcomeRecord, RunSummary};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::state::AppState;

/// Body for `POST /agent/run`.
#[derive(Debug, Default, Deserialize)]
pub struct RunRequest {
    /// Number of candidates to process (defaults to `agent.default_limit`).
    pub limit: Option<usize>,
}

/// Body for `POST /agent/process`.
#[derive(Debug, Default, Deserialize)]
pub struct ProcessRequest {
    /// Position in the discovery list (defaults to 0).
    pub index: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RunReport {
    pub results: Vec<OutcomeRecord>,
    pub summary: RunSummary,
}

#[derive(Debug, Serialize)]
pub struct RunResponse {
    pub success: bool,
    pub run: RunReport,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub success: bool,
    pub result: OutcomeRecord,
}

#[derive(Debug, Serialize)]
pub struct CancelResponse {
    pub cancelled: bool,
}

/// Error body for agent endpoints.
#[derive(Debug, Serialize)]
pub struct AgentErrorResponse {
    pub success: bool,
    pub error: String,
}

fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(AgentErrorResponse {
            success: false,
            error: error.into(),
        }),
    )
        .into_response()
}

fn agent_error_response(err: AgentError) -> Response {
    let status = match &err {
        AgentError::AlreadyRunning => StatusCode::CONFLICT,
        AgentError::InvalidLimit(_) => StatusCode::BAD_REQUEST,
        AgentError::CandidateNotFound { .. } => StatusCode::NOT_FOUND,
        AgentError::Discovery(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error_response(status, err.to_string())
}

/// Parse an optional JSON body; an empty body yields the default.
fn parse_body<T: DeserializeOwned + Default>(body: &Bytes) -> Result<T, Response> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|e| {
        error_response(
            StatusCode::BAD_REQUEST,
            format!("Invalid request body: {}", e),
        )
    })
}

/// Run the pipeline over the first `limit` trending candidates.
pub async fn run_pipeline(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let request: RunRequest = match parse_body(&body) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let agent_config = state.agent().config();
    let limit = request.limit.unwrap_or(agent_config.default_limit);
    if limit == 0 || limit > agent_config.max_limit {
        return error_response(
            StatusCode::BAD_REQUEST,
            format!(
                "limit must be between 1 and {} (got {})",
                agent_config.max_limit, limit
            ),
        );
    }

    match state.agent().run_full_pipeline(limit).await {
        Ok(results) => {
            let summary = RunSummary::from_records(&results);
            info!(
                "Run finished: {} success, {} partial, {} failed",
                summary.success, summary.partial, summary.failed
            );
            Json(RunResponse {
                success: true,
                message: format!("Processed {} videos", results.len()),
                run: RunReport { results, summary },
            })
            .into_response()
        }
        Err(e) => {
            warn!("Run request rejected: {}", e);
            agent_error_response(e)
        }
    }
}

/// Process a single candidate chosen by index.
pub async fn process_single(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let request: ProcessRequest = match parse_body(&body) {
        Ok(request) => request,
        Err(response) => return response,
    };

    match state
        .agent()
        .process_single(request.index.unwrap_or(0))
        .await
    {
        Ok(result) => Json(ProcessResponse {
            success: true,
            result,
        })
        .into_response(),
        Err(e) => {
            warn!("Process request rejected: {}", e);
            agent_error_response(e)
        }
    }
}

pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<AgentStatus> {
    Json(state.agent().status())
}

pub async fn cancel(State(state): State<Arc<AppState>>) -> Json<CancelResponse> {
    Json(CancelResponse {
        cancelled: state.agent().cancel(),
    })
}
