// src/services/catalog_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{BillboardRepository, CategoryRepository, ColorRepository, SizeRepository},
    models::{billboard::Billboard, category::Category, color::Color, size::Size},
};

// Um único service para o catálogo da loja: billboards, categorias,
// tamanhos e cores. São quatro CRUDs gêmeos; a regra de negócio (o portão
// de autorização) mora no handler, antes de qualquer chamada daqui.
#[derive(Clone)]
pub struct CatalogService {
    billboard_repo: BillboardRepository,
    category_repo: CategoryRepository,
    size_repo: SizeRepository,
    color_repo: ColorRepository,
}

impl CatalogService {
    pub fn new(
        billboard_repo: BillboardRepository,
        category_repo: CategoryRepository,
        size_repo: SizeRepository,
        color_repo: ColorRepository,
    ) -> Self {
        Self {
            billboard_repo,
            category_repo,
            size_repo,
            color_repo,
        }
    }

    // --- Billboards ---

    pub async fn list_billboards(&self, store_id: Uuid) -> Result<Vec<Billboard>, AppError> {
        self.billboard_repo.find_all(store_id).await
    }

    pub async fn get_billboard(&self, id: Uuid) -> Result<Billboard, AppError> {
        self.billboard_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Billboard"))
    }

    pub async fn create_billboard(
        &self,
        store_id: Uuid,
        label: &str,
        image_url: &str,
    ) -> Result<Billboard, AppError> {
        self.billboard_repo.create(store_id, label, image_url).await
    }

    pub async fn update_billboard(
        &self,
        id: Uuid,
        label: &str,
        image_url: &str,
    ) -> Result<Billboard, AppError> {
        let affected = self.billboard_repo.update(id, label, image_url).await?;
        if affected == 0 {
            return Err(AppError::NotFound("Billboard"));
        }
        self.get_billboard(id).await
    }

    pub async fn delete_billboard(&self, id: Uuid) -> Result<(), AppError> {
        let affected = self.billboard_repo.delete(id).await?;
        if affected == 0 {
            return Err(AppError::NotFound("Billboard"));
        }
        Ok(())
    }

    // --- Categorias ---

    pub async fn list_categories(&self, store_id: Uuid) -> Result<Vec<Category>, AppError> {
        self.category_repo.find_all(store_id).await
    }

    pub async fn get_category(&self, id: Uuid) -> Result<Category, AppError> {
        self.category_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Categoria"))
    }

    pub async fn create_category(
        &self,
        store_id: Uuid,
        billboard_id: Uuid,
        name: &str,
    ) -> Result<Category, AppError> {
        self.category_repo.create(store_id, billboard_id, name).await
    }

    pub async fn update_category(
        &self,
        id: Uuid,
        billboard_id: Uuid,
        name: &str,
    ) -> Result<Category, AppError> {
        let affected = self.category_repo.update(id, billboard_id, name).await?;
        if affected == 0 {
            return Err(AppError::NotFound("Categoria"));
        }
        self.get_category(id).await
    }

    pub async fn delete_category(&self, id: Uuid) -> Result<(), AppError> {
        let affected = self.category_repo.delete(id).await?;
        if affected == 0 {
            return Err(AppError::NotFound("Categoria"));
        }
        Ok(())
    }

    // --- Tamanhos ---

    pub async fn list_sizes(&self, store_id: Uuid) -> Result<Vec<Size>, AppError> {
        self.size_repo.find_all(store_id).await
    }

    pub async fn get_size(&self, id: Uuid) -> Result<Size, AppError> {
        self.size_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Tamanho"))
    }

    pub async fn create_size(
        &self,
        store_id: Uuid,
        name: &str,
        value: &str,
    ) -> Result<Size, AppError> {
        self.size_repo.create(store_id, name, value).await
    }

    pub async fn update_size(&self, id: Uuid, name: &str, value: &str) -> Result<Size, AppError> {
        let affected = self.size_repo.update(id, name, value).await?;
        if affected == 0 {
            return Err(AppError::NotFound("Tamanho"));
        }
        self.get_size(id).await
    }

    pub async fn delete_size(&self, id: Uuid) -> Result<(), AppError> {
        let affected = self.size_repo.delete(id).await?;
        if affected == 0 {
            return Err(AppError::NotFound("Tamanho"));
        }
        Ok(())
    }

    // --- Cores ---

    pub async fn list_colors(&self, store_id: Uuid) -> Result<Vec<Color>, AppError> {
        self.color_repo.find_all(store_id).await
    }

    pub async fn get_color(&self, id: Uuid) -> Result<Color, AppError> {
        self.color_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Cor"))
    }

    pub async fn create_color(
        &self,
        store_id: Uuid,
        name: &str,
        value: &str,
    ) -> Result<Color, AppError> {
        self.color_repo.create(store_id, name, value).await
    }

    pub async fn update_color(&self, id: Uuid, name: &str, value: &str) -> Result<Color, AppError> {
        let affected = self.color_repo.update(id, name, value).await?;
        if affected == 0 {
            return Err(AppError::NotFound("Cor"));
        }
        self.get_color(id).await
    }

    pub async fn delete_color(&self, id: Uuid) -> Result<(), AppError> {
        let affected = self.color_repo.delete(id).await?;
        if affected == 0 {
            return Err(AppError::NotFound("Cor"));
        }
        Ok(())
    }
}
