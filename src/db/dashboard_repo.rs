// src/db/dashboard_repo.rs

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{common::error::AppError, models::dashboard::PaidOrderItemRow};

#[derive(Clone)]
pub struct DashboardRepository {
    pool: SqlitePool,
}

impl DashboardRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Todos os itens de pedidos PAGOS da loja, com o preço do produto e a
    /// data de criação do pedido. A agregação em si acontece no service,
    /// sobre estas linhas.
    pub async fn paid_order_items(
        &self,
        store_id: Uuid,
    ) -> Result<Vec<PaidOrderItemRow>, AppError> {
        let rows = sqlx::query_as::<_, PaidOrderItemRow>(
            "SELECT o.id AS order_id, o.created_at AS order_created_at, p.price
             FROM orders o
             JOIN order_items oi ON oi.order_id = o.id
             JOIN products p ON p.id = oi.product_id
             WHERE o.store_id = ? AND o.is_paid = 1",
        )
        .bind(store_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Produtos em estoque = não arquivados.
    pub async fn stock_count(&self, store_id: Uuid) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM products WHERE store_id = ? AND is_archived = 0",
        )
        .bind(store_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
