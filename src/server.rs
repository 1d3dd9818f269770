//! HTTP glue: a single query endpoint over the pipeline.
//!
//! Initialization failures are absorbed at startup rather than crashing the
//! server; the state then carries no pipeline and every query gets a fixed
//! not-ready response in the normal response shape, so the UI collaborator
//! never sees a protocol-level fault.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{info_span, Instrument};
use uuid::Uuid;

use crate::domain::models::QueryResult;
use crate::services::Pipeline;

/// Answer returned while the pipeline is unavailable.
pub const NOT_READY_ANSWER: &str = "Backend pipeline is not ready. Please check logs.";

/// Shared request handler state.
#[derive(Clone)]
pub struct AppState {
    /// `None` when startup initialization failed; the service stays up and
    /// answers every query with the not-ready response.
    pub pipeline: Option<Arc<Pipeline>>,
}

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/query", post(handle_query))
        .with_state(state)
}

async fn handle_query(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Json<QueryResult> {
    let Some(pipeline) = state.pipeline else {
        return Json(QueryResult::degraded(NOT_READY_ANSWER));
    };

    let span = info_span!("query", request_id = %Uuid::new_v4());
    Json(pipeline.query(&request.query).instrument(span).await)
}
