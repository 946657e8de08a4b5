//! API route handlers
//!
//! - `/api/v1/fortune` - full report for a page query
//! - `/api/v1/identifier/encode` and `/decode` - token codec
//! - `/health` - liveness

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::envelope::ApiErrorResponse;
use crate::identifier::{decode, encode_data, encode_fortune, Identifier, PageQuery};
use crate::pipeline::FortunePipeline;
use crate::types::FortuneReport;

// ============================================================================
// API State
// ============================================================================

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub pipeline: Arc<FortunePipeline>,
}

impl ApiState {
    pub fn new(pipeline: FortunePipeline) -> Self {
        Self { pipeline: Arc::new(pipeline) }
    }
}

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct EncodeQuery {
    pub headband: Option<i64>,
    pub run: Option<i64>,
    pub timestamp: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct DecodeQuery {
    pub id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/v1/fortune
pub async fn get_fortune(
    State(state): State<ApiState>,
    Query(query): Query<PageQuery>,
) -> Json<FortuneReport> {
    Json(state.pipeline.report_for_query(&query).await)
}

/// GET /api/v1/identifier/encode
///
/// A complete `headband` + `run` pair wins over `timestamp`.
pub async fn encode_identifier(Query(query): Query<EncodeQuery>) -> Response {
    let id = match (query.headband, query.run, query.timestamp) {
        (Some(headband), Some(run), _) => encode_data(headband, run),
        (_, _, Some(timestamp)) => encode_fortune(timestamp),
        _ => {
            return ApiErrorResponse::bad_request(
                "expected headband and run, or timestamp",
            )
        }
    };
    Json(TokenResponse { id }).into_response()
}

/// GET /api/v1/identifier/decode
pub async fn decode_identifier(Query(query): Query<DecodeQuery>) -> Response {
    let Some(token) = query.id else {
        return ApiErrorResponse::bad_request("missing id");
    };
    match decode(&token) {
        Some(identifier) => Json::<Identifier>(identifier).into_response(),
        None => ApiErrorResponse::not_found(format!("'{token}' is not a valid identifier")),
    }
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
