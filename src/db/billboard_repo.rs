// src/db/billboard_repo.rs

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{common::error::AppError, models::billboard::Billboard};

#[derive(Clone)]
pub struct BillboardRepository {
    pool: SqlitePool,
}

impl BillboardRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self, store_id: Uuid) -> Result<Vec<Billboard>, AppError> {
        let billboards = sqlx::query_as::<_, Billboard>(
            "SELECT id, store_id, label, image_url, created_at, updated_at
             FROM billboards WHERE store_id = ?",
        )
        .bind(store_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(billboards)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Billboard>, AppError> {
        let billboard = sqlx::query_as::<_, Billboard>(
            "SELECT id, store_id, label, image_url, created_at, updated_at
             FROM billboards WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(billboard)
    }

    pub async fn create(
        &self,
        store_id: Uuid,
        label: &str,
        image_url: &str,
    ) -> Result<Billboard, AppError> {
        let billboard = Billboard {
            id: Uuid::new_v4(),
            store_id,
            label: label.to_string(),
            image_url: image_url.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO billboards (id, store_id, label, image_url, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(billboard.id)
        .bind(billboard.store_id)
        .bind(&billboard.label)
        .bind(&billboard.image_url)
        .bind(billboard.created_at)
        .bind(billboard.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(billboard)
    }

    pub async fn update(
        &self,
        id: Uuid,
        label: &str,
        image_url: &str,
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE billboards SET label = ?, image_url = ?, updated_at = ? WHERE id = ?",
        )
        .bind(label)
        .bind(image_url)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM billboards WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
