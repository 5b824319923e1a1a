// src/db/product_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Executor, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        color::Color,
        product::{Product, ProductImage},
        size::Size,
    },
};

// Filtros opcionais da listagem (query string da rota pública).
#[derive(Debug, Default, Clone, Copy)]
pub struct ProductFilter {
    pub category_id: Option<Uuid>,
    pub is_featured: Option<bool>,
    pub is_archived: Option<bool>,
}

#[derive(Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_all(
        &self,
        store_id: Uuid,
        filter: ProductFilter,
    ) -> Result<Vec<Product>, AppError> {
        // Monta o WHERE conforme os filtros presentes; os binds seguem a
        // mesma ordem das cláusulas.
        let mut sql = String::from(
            "SELECT id, store_id, category_id, name, price, is_featured, is_archived,
                    created_at, updated_at
             FROM products WHERE store_id = ?",
        );
        if filter.category_id.is_some() {
            sql.push_str(" AND category_id = ?");
        }
        if filter.is_featured.is_some() {
            sql.push_str(" AND is_featured = ?");
        }
        if filter.is_archived.is_some() {
            sql.push_str(" AND is_archived = ?");
        }
        sql.push_str(" ORDER BY created_at DESC");

        let mut query = sqlx::query_as::<_, Product>(&sql).bind(store_id);
        if let Some(category_id) = filter.category_id {
            query = query.bind(category_id);
        }
        if let Some(is_featured) = filter.is_featured {
            query = query.bind(is_featured);
        }
        if let Some(is_archived) = filter.is_archived {
            query = query.bind(is_archived);
        }

        Ok(query.fetch_all(&self.pool).await?)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, store_id, category_id, name, price, is_featured, is_archived,
                    created_at, updated_at
             FROM products WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    pub async fn find_images(&self, product_id: Uuid) -> Result<Vec<ProductImage>, AppError> {
        let images = sqlx::query_as::<_, ProductImage>(
            "SELECT id, product_id, url FROM product_images WHERE product_id = ?",
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(images)
    }

    pub async fn find_sizes(&self, product_id: Uuid) -> Result<Vec<Size>, AppError> {
        let sizes = sqlx::query_as::<_, Size>(
            "SELECT s.id, s.store_id, s.name, s.value, s.created_at, s.updated_at
             FROM sizes s
             JOIN product_sizes ps ON ps.size_id = s.id
             WHERE ps.product_id = ?",
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(sizes)
    }

    pub async fn find_colors(&self, product_id: Uuid) -> Result<Vec<Color>, AppError> {
        let colors = sqlx::query_as::<_, Color>(
            "SELECT c.id, c.store_id, c.name, c.value, c.created_at, c.updated_at
             FROM colors c
             JOIN product_colors pc ON pc.color_id = c.id
             WHERE pc.product_id = ?",
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(colors)
    }

    // ---
    // Escritas: aceitam um executor (pool ou transação), porque o produto
    // e as suas relações são gravados numa única transação pelo service.
    // ---

    pub async fn insert<'e, E>(
        &self,
        executor: E,
        product: &Product,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            "INSERT INTO products
                 (id, store_id, category_id, name, price, is_featured, is_archived,
                  created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(product.id)
        .bind(product.store_id)
        .bind(product.category_id)
        .bind(&product.name)
        .bind(product.price)
        .bind(product.is_featured)
        .bind(product.is_archived)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(executor)
        .await?;

        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        category_id: Uuid,
        name: &str,
        price: f64,
        is_featured: bool,
        is_archived: bool,
        updated_at: DateTime<Utc>,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            "UPDATE products
             SET category_id = ?, name = ?, price = ?, is_featured = ?, is_archived = ?,
                 updated_at = ?
             WHERE id = ?",
        )
        .bind(category_id)
        .bind(name)
        .bind(price)
        .bind(is_featured)
        .bind(is_archived)
        .bind(updated_at)
        .bind(id)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn insert_image<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
        url: &str,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query("INSERT INTO product_images (id, product_id, url) VALUES (?, ?, ?)")
            .bind(Uuid::new_v4())
            .bind(product_id)
            .bind(url)
            .execute(executor)
            .await?;

        Ok(())
    }

    pub async fn clear_images<'e, E>(&self, executor: E, product_id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query("DELETE FROM product_images WHERE product_id = ?")
            .bind(product_id)
            .execute(executor)
            .await?;

        Ok(())
    }

    pub async fn link_size<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
        size_id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query("INSERT INTO product_sizes (product_id, size_id) VALUES (?, ?)")
            .bind(product_id)
            .bind(size_id)
            .execute(executor)
            .await?;

        Ok(())
    }

    pub async fn clear_sizes<'e, E>(&self, executor: E, product_id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query("DELETE FROM product_sizes WHERE product_id = ?")
            .bind(product_id)
            .execute(executor)
            .await?;

        Ok(())
    }

    pub async fn link_color<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
        color_id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query("INSERT INTO product_colors (product_id, color_id) VALUES (?, ?)")
            .bind(product_id)
            .bind(color_id)
            .execute(executor)
            .await?;

        Ok(())
    }

    pub async fn clear_colors<'e, E>(&self, executor: E, product_id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query("DELETE FROM product_colors WHERE product_id = ?")
            .bind(product_id)
            .execute(executor)
            .await?;

        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64, AppError> {
        // As imagens e os vínculos caem junto via ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
