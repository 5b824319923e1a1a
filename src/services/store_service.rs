// src/services/store_service.rs

use uuid::Uuid;

use crate::{common::error::AppError, db::StoreRepository, models::store::Store};

#[derive(Clone)]
pub struct StoreService {
    repo: StoreRepository,
}

impl StoreService {
    pub fn new(repo: StoreRepository) -> Self {
        Self { repo }
    }

    /// O portão de autorização: confirma que a loja pertence ao utilizador
    /// ANTES de qualquer escrita em entidade filha. A recusa é sempre
    /// `StoreNotFound` (404) para não revelar a existência da loja a quem
    /// não é dono. Nada é cacheado entre requisições.
    pub async fn ensure_owner(&self, user_id: &str, store_id: Uuid) -> Result<(), AppError> {
        let owns = self.repo.exists_for_user(store_id, user_id).await?;
        if !owns {
            return Err(AppError::StoreNotFound);
        }
        Ok(())
    }

    pub async fn create_store(&self, name: &str, user_id: &str) -> Result<Store, AppError> {
        self.repo.create(name, user_id).await
    }

    pub async fn rename_store(
        &self,
        store_id: Uuid,
        user_id: &str,
        name: &str,
    ) -> Result<Store, AppError> {
        let affected = self.repo.rename(store_id, user_id, name).await?;
        if affected == 0 {
            return Err(AppError::StoreNotFound);
        }

        self.repo
            .find_by_id(store_id)
            .await?
            .ok_or(AppError::StoreNotFound)
    }

    pub async fn delete_store(&self, store_id: Uuid, user_id: &str) -> Result<(), AppError> {
        let affected = self.repo.delete(store_id, user_id).await?;
        if affected == 0 {
            return Err(AppError::StoreNotFound);
        }
        Ok(())
    }
}
