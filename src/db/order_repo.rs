// src/db/order_repo.rs

use chrono::Utc;
use sqlx::{Executor, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::order::{Order, OrderItemDetail},
};

#[derive(Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self, store_id: Uuid) -> Result<Vec<Order>, AppError> {
        let orders = sqlx::query_as::<_, Order>(
            "SELECT id, store_id, is_paid, phone, address, created_at, updated_at
             FROM orders WHERE store_id = ?
             ORDER BY created_at DESC",
        )
        .bind(store_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, AppError> {
        let order = sqlx::query_as::<_, Order>(
            "SELECT id, store_id, is_paid, phone, address, created_at, updated_at
             FROM orders WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    /// Itens de um pedido com o nome e o preço atual do produto.
    pub async fn find_items(&self, order_id: Uuid) -> Result<Vec<OrderItemDetail>, AppError> {
        let items = sqlx::query_as::<_, OrderItemDetail>(
            "SELECT oi.id, oi.product_id, p.name AS product_name, p.price
             FROM order_items oi
             JOIN products p ON p.id = oi.product_id
             WHERE oi.order_id = ?",
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    // O pedido e os seus itens são gravados numa única transação pelo
    // service; por isso as escritas aceitam um executor.

    pub async fn insert<'e, E>(&self, executor: E, order: &Order) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            "INSERT INTO orders (id, store_id, is_paid, phone, address, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(order.id)
        .bind(order.store_id)
        .bind(order.is_paid)
        .bind(&order.phone)
        .bind(&order.address)
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn insert_item<'e, E>(
        &self,
        executor: E,
        order_id: Uuid,
        product_id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query("INSERT INTO order_items (id, order_id, product_id) VALUES (?, ?, ?)")
            .bind(Uuid::new_v4())
            .bind(order_id)
            .bind(product_id)
            .execute(executor)
            .await?;

        Ok(())
    }

    /// Marca o pedido como pago. Repetir a chamada é inócuo: o flag já
    /// está em `true` e a linha continua sendo afetada.
    pub async fn mark_paid(&self, order_id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("UPDATE orders SET is_paid = 1, updated_at = ? WHERE id = ?")
            .bind(Utc::now())
            .bind(order_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
