/// API Request Handlers

use axum::{http::StatusCode, Json};
use chrono::Utc;
use rand::Rng;
use serde_json::{json, Value};

use crate::core::nodes::{mock_nodes, ClusterNode};
use crate::core::{Sample, SampleDto};
use crate::utils::{MOCK_CLOSE_MAX, MOCK_CLOSE_MIN};

/// Current time and a random close in `[MOCK_CLOSE_MIN, MOCK_CLOSE_MAX)`
pub async fn get_sample() -> Json<SampleDto> {
    let close = rand::thread_rng().gen_range(MOCK_CLOSE_MIN..MOCK_CLOSE_MAX);
    Json(SampleDto::from_sample(&Sample::new(Utc::now(), close)))
}

pub async fn get_nodes() -> Json<Vec<ClusterNode>> {
    Json(mock_nodes())
}

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

pub async fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Not found" })),
    )
}
