//! API route definitions

use axum::{routing::get, Router};

use super::handlers::{self, ApiState};

/// Routes nested under `/api/v1`.
pub fn api_routes(state: ApiState) -> Router {
    Router::new()
        .route("/fortune", get(handlers::get_fortune))
        .route("/identifier/encode", get(handlers::encode_identifier))
        .route("/identifier/decode", get(handlers::decode_identifier))
        .with_state(state)
}

/// Root-level health endpoint.
pub fn health_routes() -> Router {
    Router::new().route("/health", get(handlers::health_check))
}
