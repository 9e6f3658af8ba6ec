//! Liveness probe

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

/// Ping response
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PingResponse {
    /// Always `pong`
    pub message: String,
}

/// Liveness probe, no identity required
///
/// Always returns 200 OK while the process is serving.
pub async fn ping() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(PingResponse {
            message: "pong".to_string(),
        }),
    )
}
