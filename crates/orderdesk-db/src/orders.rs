use async_trait::async_trait;
use orderdesk_core::models::{NewOrder, Order};
use orderdesk_core::AppError;
use sqlx::{PgPool, Postgres};

/// Persistence seam for order records.
///
/// The handler holds this as a trait object so tests can substitute an
/// in-memory store or force deterministic failure.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Insert one order atomically and return it with its assigned
    /// identifier. No identifier returned means no order exists.
    async fn create_order(&self, order: NewOrder) -> Result<Order, AppError>;
}

/// Postgres-backed order store.
#[derive(Clone)]
pub struct PgOrderStore {
    pool: PgPool,
}

impl PgOrderStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderStore for PgOrderStore {
    #[tracing::instrument(
        skip(self, order),
        fields(db.table = "custom_orders", db.operation = "insert")
    )]
    async fn create_order(&self, order: NewOrder) -> Result<Order, AppError> {
        let row = sqlx::query_as::<Postgres, Order>(
            r#"
            INSERT INTO custom_orders
            (name, email, phone, project_description, image_paths)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, phone, project_description, image_paths, created_at
            "#,
        )
        .bind(&order.name)
        .bind(&order.email)
        .bind(&order.phone)
        .bind(&order.project_description)
        .bind(&order.image_paths)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }
}
