//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use crate::setup::routes::health;
use orderdesk_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Orderdesk API",
        version = "0.1.0",
        description = "Custom-order submission backend: accepts a contact form with up to five images, stores the order, and notifies the shop owner and the customer by email."
    ),
    paths(
        handlers::order_submit::submit_order,
        health::custom_order_health,
        health::hello,
    ),
    components(schemas(
        models::OrderSubmissionResponse,
        error::ErrorResponse,
        health::MessageResponse,
    )),
    tags(
        (name = "orders", description = "Custom order submission"),
        (name = "health", description = "Liveness probes"),
    )
)]
pub struct ApiDoc;
