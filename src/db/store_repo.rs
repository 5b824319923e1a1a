// src/db/store_repo.rs

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{common::error::AppError, models::store::Store};

#[derive(Clone)]
pub struct StoreRepository {
    pool: SqlitePool,
}

impl StoreRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Verifica se a loja pertence ao utilizador.
    /// Esta é a verificação de autorização mais importante do sistema.
    pub async fn exists_for_user(
        &self,
        store_id: Uuid,
        user_id: &str,
    ) -> Result<bool, AppError> {
        // SELECT EXISTS é a consulta mais barata possível para isto.
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM stores WHERE id = ? AND user_id = ?)",
        )
        .bind(store_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    pub async fn create(&self, name: &str, user_id: &str) -> Result<Store, AppError> {
        let store = Store {
            id: Uuid::new_v4(),
            name: name.to_string(),
            user_id: user_id.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO stores (id, name, user_id, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(store.id)
        .bind(&store.name)
        .bind(&store.user_id)
        .bind(store.created_at)
        .bind(store.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(store)
    }

    pub async fn find_by_id(&self, store_id: Uuid) -> Result<Option<Store>, AppError> {
        let store = sqlx::query_as::<_, Store>(
            "SELECT id, name, user_id, created_at, updated_at FROM stores WHERE id = ?",
        )
        .bind(store_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(store)
    }

    /// Renomeia a loja, sempre com o escopo (id, user_id). Devolve quantas
    /// linhas mudaram: zero significa "não existe ou não é sua".
    pub async fn rename(
        &self,
        store_id: Uuid,
        user_id: &str,
        name: &str,
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE stores SET name = ?, updated_at = ? WHERE id = ? AND user_id = ?",
        )
        .bind(name)
        .bind(Utc::now())
        .bind(store_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete(&self, store_id: Uuid, user_id: &str) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM stores WHERE id = ? AND user_id = ?")
            .bind(store_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
