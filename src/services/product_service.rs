// src/services/product_service.rs

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{product_repo::ProductFilter, CategoryRepository, ProductRepository},
    models::product::{Product, ProductDetail},
};

// Dados de um produto vindos do formulário (criação e atualização usam o
// mesmo conjunto de campos).
#[derive(Debug, Clone)]
pub struct ProductInput {
    pub name: String,
    pub price: f64,
    pub category_id: Uuid,
    pub size_ids: Vec<Uuid>,
    pub color_ids: Vec<Uuid>,
    pub image_urls: Vec<String>,
    pub is_featured: bool,
    pub is_archived: bool,
}

#[derive(Clone)]
pub struct ProductService {
    product_repo: ProductRepository,
    category_repo: CategoryRepository,
    pool: SqlitePool, // Usamos a pool para iniciar transações
}

impl ProductService {
    pub fn new(
        product_repo: ProductRepository,
        category_repo: CategoryRepository,
        pool: SqlitePool,
    ) -> Self {
        Self {
            product_repo,
            category_repo,
            pool,
        }
    }

    pub async fn list_products(
        &self,
        store_id: Uuid,
        filter: ProductFilter,
    ) -> Result<Vec<ProductDetail>, AppError> {
        let products = self.product_repo.find_all(store_id, filter).await?;

        let mut detailed = Vec::with_capacity(products.len());
        for product in products {
            detailed.push(self.load_relations(product).await?);
        }

        Ok(detailed)
    }

    pub async fn get_product(&self, id: Uuid) -> Result<ProductDetail, AppError> {
        let product = self
            .product_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Produto"))?;

        self.load_relations(product).await
    }

    /// Cria o produto com imagens e vínculos de tamanho/cor numa única
    /// transação: ou grava tudo, ou nada.
    pub async fn create_product(
        &self,
        store_id: Uuid,
        input: ProductInput,
    ) -> Result<Product, AppError> {
        let product = Product {
            id: Uuid::new_v4(),
            store_id,
            category_id: input.category_id,
            name: input.name.clone(),
            price: input.price,
            is_featured: input.is_featured,
            is_archived: input.is_archived,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let mut tx = self.pool.begin().await?;

        self.product_repo.insert(&mut *tx, &product).await?;

        for url in &input.image_urls {
            self.product_repo
                .insert_image(&mut *tx, product.id, url)
                .await?;
        }
        for size_id in &input.size_ids {
            self.product_repo
                .link_size(&mut *tx, product.id, *size_id)
                .await?;
        }
        for color_id in &input.color_ids {
            self.product_repo
                .link_color(&mut *tx, product.id, *color_id)
                .await?;
        }

        tx.commit().await?;

        Ok(product)
    }

    /// Atualiza o produto substituindo o conjunto de imagens e refazendo os
    /// vínculos de tamanho/cor, tudo na mesma transação.
    pub async fn update_product(
        &self,
        id: Uuid,
        input: ProductInput,
    ) -> Result<ProductDetail, AppError> {
        let mut tx = self.pool.begin().await?;

        let affected = self
            .product_repo
            .update(
                &mut *tx,
                id,
                input.category_id,
                &input.name,
                input.price,
                input.is_featured,
                input.is_archived,
                Utc::now(),
            )
            .await?;

        if affected == 0 {
            // Nada a desfazer; o rollback acontece no drop da transação.
            return Err(AppError::NotFound("Produto"));
        }

        self.product_repo.clear_images(&mut *tx, id).await?;
        for url in &input.image_urls {
            self.product_repo.insert_image(&mut *tx, id, url).await?;
        }

        self.product_repo.clear_sizes(&mut *tx, id).await?;
        for size_id in &input.size_ids {
            self.product_repo.link_size(&mut *tx, id, *size_id).await?;
        }

        self.product_repo.clear_colors(&mut *tx, id).await?;
        for color_id in &input.color_ids {
            self.product_repo
                .link_color(&mut *tx, id, *color_id)
                .await?;
        }

        tx.commit().await?;

        self.get_product(id).await
    }

    pub async fn delete_product(&self, id: Uuid) -> Result<(), AppError> {
        let affected = self.product_repo.delete(id).await?;
        if affected == 0 {
            return Err(AppError::NotFound("Produto"));
        }
        Ok(())
    }

    async fn load_relations(&self, product: Product) -> Result<ProductDetail, AppError> {
        let category = self
            .category_repo
            .find_by_id(product.category_id)
            .await?
            .ok_or(AppError::NotFound("Categoria"))?;
        let sizes = self.product_repo.find_sizes(product.id).await?;
        let colors = self.product_repo.find_colors(product.id).await?;
        let images = self.product_repo.find_images(product.id).await?;

        Ok(ProductDetail {
            product,
            category,
            sizes,
            colors,
            images,
        })
    }
}
