// src/db/color_repo.rs

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{common::error::AppError, models::color::Color};

#[derive(Clone)]
pub struct ColorRepository {
    pool: SqlitePool,
}

impl ColorRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self, store_id: Uuid) -> Result<Vec<Color>, AppError> {
        let colors = sqlx::query_as::<_, Color>(
            "SELECT id, store_id, name, value, created_at, updated_at
             FROM colors WHERE store_id = ?",
        )
        .bind(store_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(colors)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Color>, AppError> {
        let color = sqlx::query_as::<_, Color>(
            "SELECT id, store_id, name, value, created_at, updated_at
             FROM colors WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(color)
    }

    pub async fn create(
        &self,
        store_id: Uuid,
        name: &str,
        value: &str,
    ) -> Result<Color, AppError> {
        let color = Color {
            id: Uuid::new_v4(),
            store_id,
            name: name.to_string(),
            value: value.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO colors (id, store_id, name, value, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(color.id)
        .bind(color.store_id)
        .bind(&color.name)
        .bind(&color.value)
        .bind(color.created_at)
        .bind(color.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(color)
    }

    pub async fn update(&self, id: Uuid, name: &str, value: &str) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE colors SET name = ?, value = ?, updated_at = ? WHERE id = ?",
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
        let result = sqlx::query("DELETE FROM colors WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
