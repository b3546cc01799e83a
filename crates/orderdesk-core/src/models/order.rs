use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// One persisted custom-order submission.
///
/// The identifier is assigned by the store on insert and never changes;
/// orders are never updated or deleted by this service.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub project_description: String,
    /// Public reference paths of the uploaded images, in submission order.
    pub image_paths: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Scalar fields and image references for an order about to be inserted.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub project_description: String,
    pub image_paths: Vec<String>,
}

/// Success body returned by the submit endpoint.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderSubmissionResponse {
    pub status: String,
    pub message: String,
    pub order_id: i64,
    pub image_paths: Vec<String>,
}
