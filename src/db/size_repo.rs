// src/db/size_repo.rs

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{common::error::AppError, models::size::Size};

#[derive(Clone)]
pub struct SizeRepository {
    pool: SqlitePool,
}

impl SizeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self, store_id: Uuid) -> Result<Vec<Size>, AppError> {
        let sizes = sqlx::query_as::<_, Size>(
            "SELECT id, store_id, name, value, created_at, updated_at
             FROM sizes WHERE store_id = ?",
        )
        .bind(store_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(sizes)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Size>, AppError> {
        let size = sqlx::query_as::<_, Size>(
            "SELECT id, store_id, name, value, created_at, updated_at
             FROM sizes WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(size)
    }

    pub async fn create(
        &self,
        store_id: Uuid,
        name: &str,
        value: &str,
    ) -> Result<Size, AppError> {
        let size = Size {
            id: Uuid::new_v4(),
            store_id,
            name: name.to_string(),
            value: value.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO sizes (id, store_id, name, value, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(size.id)
        .bind(size.store_id)
        .bind(&size.name)
        .bind(&size.value)
        .bind(size.created_at)
        .bind(size.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(size)
    }

    pub async fn update(&self, id: Uuid, name: &str, value: &str) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE sizes SET name = ?, value = ?, updated_at = ? WHERE id = ?",
        )
        .bind(name)
        .bind(value)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM sizes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
