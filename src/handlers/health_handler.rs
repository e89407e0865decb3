use axum::{
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};

use crate::models::AboutResponse;

pub async fn health_check() -> Result<Json<Value>, StatusCode> {
    let timestamp = chrono::Utc::now().timestamp();

    let health_data = json!({
        "status": "healthy",
        "timestamp": timestamp,
        "service": "mobile-client-service",
        "version": env!("CARGO_PKG_VERSION")
    });

    Ok(Json(health_data))
}

pub async fn about() -> Json<AboutResponse> {
    Json(AboutResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
