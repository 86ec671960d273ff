use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use reelsmith_core::{render_document, AuditFilter, LogRecord, LogStatus};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::handlers::ErrorResponse;
use crate::state::AppState;

/// Maximum allowed limit for run log queries
const MAX_LIMIT: i64 = 1000;

/// Default limit for run log queries
const DEFAULT_LIMIT: i64 = 100;

/// Query parameters for the run log endpoints
#[derive(Debug, Default, Deserialize)]
pub struct AuditQueryParams {
    /// Filter by run ID
    pub run_id: Option<String>,
    /// Filter by status (`prompt_generated` or `uploaded`)
    pub status: Option<String>,
    /// Filter entries after this timestamp (ISO 8601)
    pub from: Option<DateTime<Utc>>,
    /// Filter entries before this timestamp (ISO 8601)
    pub to: Option<DateTime<Utc>>,
    /// Maximum number of entries to return (default 100, max 1000)
    pub limit: Option<i64>,
    /// Pagination offset (default 0)
    pub offset: Option<i64>,
}

/// Response for run log query endpoint
#[derive(Debug, Serialize)]
pub struct AuditQueryResponse {
    /// Matching entries, newest first
    pub records: Vec<LogRecord>,
    /// Total number of matching entries
    pub total: i64,
    /// Limit used for this query
    pub limit: i64,
    /// Offset used for this query
    pub offset: i64,
}

type ErrorReply = (StatusCode, Json<ErrorResponse>);

fn bad_request(message: String) -> ErrorReply {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message)))
}

fn internal_error(message: String) -> ErrorReply {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(message)),
    )
}

/// Build the filter without pagination.
fn base_filter(params: &AuditQueryParams) -> Result<AuditFilter, ErrorReply> {
    let mut filter = AuditFilter::new();

    if let Some(ref run_id) = params.run_id {
        filter = filter.with_run_id(run_id);
    }

    if let Some(ref status) = params.status {
        let status = LogStatus::parse(status)
            .ok_or_else(|| bad_request(format!("Unknown status: {}", status)))?;
        filter = filter.with_status(status);
    }

    if params.from.is_some() || params.to.is_some() {
        filter = filter.with_time_range(params.from, params.to);
    }

    Ok(filter)
}

/// Query run log entries
pub async fn query_audit(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AuditQueryParams>,
) -> Result<Json<AuditQueryResponse>, ErrorReply> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let offset = params.offset.unwrap_or(0).max(0);

    let base = base_filter(&params)?;
    let query_filter = base.clone().with_limit(limit).with_offset(offset);

    let records = state
        .audit()
        .query(&query_filter)
        .await
        .map_err(|e| internal_error(format!("Failed to query run log: {}", e)))?;

    let total = state
        .audit()
        .count(&base)
        .await
        .map_err(|e| internal_error(format!("Failed to count run log entries: {}", e)))?;

    Ok(Json(AuditQueryResponse {
        records,
        total,
        limit,
        offset,
    }))
}

/// Render matching entries as the plain-text run log document.
///
/// Accepts the same filters as [`query_audit`]; the limit defaults to the
/// maximum so an unfiltered call returns the whole recent log.
pub async fn get_document(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AuditQueryParams>,
) -> Result<Response, ErrorReply> {
    let limit = params.limit.unwrap_or(MAX_LIMIT).clamp(1, MAX_LIMIT);
    let offset = params.offset.unwrap_or(0).max(0);

    let filter = base_filter(&params)?.with_limit(limit).with_offset(offset);
    let records = state
        .audit()
        .query(&filter)
        .await
        .map_err(|e| internal_error(format!("Failed to query run log: {}", e)))?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        render_document(&records),
    )
        .into_response())
}
