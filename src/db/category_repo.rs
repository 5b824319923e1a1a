// src/db/category_repo.rs

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{common::error::AppError, models::category::Category};

#[derive(Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self, store_id: Uuid) -> Result<Vec<Category>, AppError> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, store_id, billboard_id, name, created_at, updated_at
             FROM categories WHERE store_id = ?",
        )
        .bind(store_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, AppError> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, store_id, billboard_id, name, created_at, updated_at
             FROM categories WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    pub async fn create(
        &self,
        store_id: Uuid,
        billboard_id: Uuid,
        name: &str,
    ) -> Result<Category, AppError> {
        let category = Category {
            id: Uuid::new_v4(),
            store_id,
            billboard_id,
            name: name.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO categories (id, store_id, billboard_id, name, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(category.id)
        .bind(category.store_id)
        .bind(category.billboard_id)
        .bind(&category.name)
        .bind(category.created_at)
        .bind(category.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(category)
    }

    pub async fn update(
        &self,
        id: Uuid,
        billboard_id: Uuid,
        name: &str,
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE categories SET name = ?, billboard_id = ?, updated_at = ? WHERE id = ?",
        )
        .bind(name)
        .bind(billboard_id)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
