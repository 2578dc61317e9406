//! Liveness endpoint.

use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckResponse {
    pub ready: bool,
    pub response_timestamp: DateTime<Utc>,
}

pub async fn healthcheck() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        ready: true,
        response_timestamp: Utc::now(),
    })
}
