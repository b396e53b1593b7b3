use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use std::sync::Arc;
use tracing::info;

use crate::app_state::AppState;
use crate::dto::{ClearHistoryResponse, HistoryQuery, HistoryResponse};
use crate::error::Result;

/// List a session's calculations, newest first
///
/// @route GET /api/history/{session_id}?limit=50
#[utoipa::path(
    get,
    path = "/api/history/{session_id}",
    params(
        ("session_id" = String, Path, description = "Session identifier", example = "default"),
        HistoryQuery
    ),
    responses(
        (status = 200, description = "Session history", body = HistoryResponse),
        (status = 500, description = "Store failure", body = common::ErrorResponse)
    ),
    tag = "calcsrv"
)]
pub async fn get_history(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>> {
    let limit = state.history_limit(query.limit);
    let history = state.store.query(&session_id, limit).await?;
    let count = history.len();
    Ok(Json(HistoryResponse {
        session_id,
        history,
        count,
    }))
}

/// Delete every calculation in a session
///
/// @route DELETE /api/history/{session_id}
#[utoipa::path(
    delete,
    path = "/api/history/{session_id}",
    params(
        ("session_id" = String, Path, description = "Session identifier")
    ),
    responses(
        (status = 200, description = "History cleared", body = ClearHistoryResponse),
        (status = 500, description = "Store failure", body = common::ErrorResponse)
    ),
    tag = "calcsrv"
)]
pub async fn clear_history(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<ClearHistoryResponse>> {
    let deleted_count = state.store.clear(&session_id).await?;
    info!("Cleared {} history records for session {}", deleted_count, session_id);
    Ok(Json(ClearHistoryResponse {
        session_id,
        deleted_count,
    }))
}
