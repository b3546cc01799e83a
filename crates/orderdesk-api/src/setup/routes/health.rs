//! Health check handlers and response types.

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

/// Fixed-message probe payload.
#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Liveness probe - process is running and routing requests.
#[utoipa::path(
    get,
    path = "/api/hello",
    tag = "health",
    responses((status = 200, description = "Service is responsive", body = MessageResponse))
)]
pub async fn hello() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Hello from the backend!".to_string(),
    })
}

/// Order-subsystem probe. Reports healthy without touching storage or the
/// database.
#[utoipa::path(
    get,
    path = "/api/custom-order",
    tag = "health",
    responses((status = 200, description = "Order endpoint is reachable", body = MessageResponse))
)]
pub async fn custom_order_health() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Custom order endpoint is healthy.".to_string(),
    })
}
