use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use orderdesk_core::config::MAX_IMAGES_PER_ORDER;
use orderdesk_core::models::{NewOrder, OrderSubmissionResponse};
use orderdesk_core::AppError;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::{sanitize_filename, unique_filename, validate_image_size};

/// One accepted image part, held in memory until the whole form is validated.
struct ImagePart {
    original_name: String,
    data: Vec<u8>,
}

/// Collected fields from the multipart body, in whatever order they arrived.
#[derive(Default)]
struct OrderForm {
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    project_description: Option<String>,
    images: Vec<ImagePart>,
}

impl OrderForm {
    fn default_with_capacity() -> Self {
        Self {
            images: Vec::with_capacity(MAX_IMAGES_PER_ORDER),
            ..Self::default()
        }
    }
}

async fn read_text_field(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read form field: {}", e)))
}

/// Drain the multipart body into an [`OrderForm`].
///
/// Every part is validated here, before anything reaches disk: an oversized
/// image or a sixth file rejects the whole submission with no side effects.
async fn read_order_form(
    mut multipart: Multipart,
    max_image_bytes: usize,
) -> Result<OrderForm, AppError> {
    let mut form = OrderForm::default_with_capacity();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart body: {}", e)))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        match field_name.as_str() {
            "name" => form.name = Some(read_text_field(field).await?),
            "email" => form.email = Some(read_text_field(field).await?),
            "phone" => form.phone = Some(read_text_field(field).await?),
            "projectDescription" => {
                form.project_description = Some(read_text_field(field).await?)
            }
            "images" => {
                if form.images.len() >= MAX_IMAGES_PER_ORDER {
                    return Err(AppError::InvalidInput(format!(
                        "At most {} images are accepted per order",
                        MAX_IMAGES_PER_ORDER
                    )));
                }

                let original_name = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "image".to_string());

                let data = field.bytes().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read image data: {}", e))
                })?;

                validate_image_size(data.len(), max_image_bytes)?;

                form.images.push(ImagePart {
                    original_name,
                    data: data.to_vec(),
                });
            }
            // Unknown fields are ignored
            _ => {}
        }
    }

    Ok(form)
}

fn require_field(value: Option<String>, field: &str) -> Result<String, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::InvalidInput(format!(
            "Missing required field: {}",
            field
        ))),
    }
}

/// Submit a custom order.
///
/// Sequences the submit flow: multipart intake and validation, image writes,
/// the order insert, and best-effort notification dispatch. Upload rejection
/// and store failure abort the request before any later step runs;
/// notification failures never affect the response.
#[utoipa::path(
    post,
    path = "/api/custom-order",
    tag = "orders",
    responses(
        (status = 200, description = "Order received and stored", body = OrderSubmissionResponse),
        (status = 400, description = "Invalid submission or image over the size limit", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "submit_order"))]
pub async fn submit_order(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<OrderSubmissionResponse>, HttpAppError> {
    let form = read_order_form(multipart, state.config.max_image_size_bytes).await?;

    let name = require_field(form.name, "name")?;
    let email = require_field(form.email, "email")?;
    let project_description = require_field(form.project_description, "projectDescription")?;
    let phone = form.phone.filter(|p| !p.trim().is_empty());

    // Whole form validated; only now do files reach disk.
    let mut image_paths = Vec::with_capacity(form.images.len());
    for image in form.images {
        let filename = unique_filename(&sanitize_filename(&image.original_name)?);
        let path = state.storage.store(&filename, image.data).await?;
        image_paths.push(path);
    }

    let order = state
        .orders
        .create_order(NewOrder {
            name,
            email,
            phone,
            project_description,
            image_paths,
        })
        .await?;

    tracing::info!(
        order_id = order.id,
        image_count = order.image_paths.len(),
        "Order stored"
    );

    // Best effort from here on: the order is durable, the response is 200
    // whatever happens to the two sends.
    match &state.notifier {
        Some(notifier) => notifier.order_submitted(&order).await,
        None => tracing::warn!(
            order_id = order.id,
            "Email transport not configured, skipping order notifications"
        ),
    }

    Ok(Json(OrderSubmissionResponse {
        status: "success".to_string(),
        message: "Order received and stored.".to_string(),
        order_id: order.id,
        image_paths: order.image_paths,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_field_accepts_present_values() {
        assert_eq!(
            require_field(Some("Ada".to_string()), "name").unwrap(),
            "Ada"
        );
    }

    #[test]
    fn require_field_rejects_missing_and_blank_values() {
        assert!(require_field(None, "name").is_err());
        assert!(require_field(Some("   ".to_string()), "email").is_err());
    }
}
