use async_trait::async_trait;
use order_core::{Order, OrderStore, StoreError};
use sqlx::PgPool;

/// Postgres-backed order lookup. The `orders` table is owned by an external
/// system; this store only reads it.
#[derive(Clone)]
pub struct PgOrderStore {
    pool: PgPool,
}

impl PgOrderStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    order_id: String,
    current_location: String,
    last_location: String,
    status: String,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Order {
            order_id: row.order_id,
            current_location: row.current_location,
            last_location: row.last_location,
            status: row.status,
        }
    }
}

#[async_trait]
impl OrderStore for PgOrderStore {
    async fn find_by_order_id(&self, order_id: &str) -> Result<Option<Order>, StoreError> {
        // Parameterized equality keeps the match exact and case-sensitive.
        let row = sqlx::query_as::<_, OrderRow>(
            "SELECT order_id, current_location, last_location, status \
             FROM orders WHERE order_id = $1",
        )
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(row.map(Order::from))
    }
}
