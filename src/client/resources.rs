// src/client/resources.rs

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

use crate::client::{
    cache::{QueryClient, ResourceKind},
    http::ApiClient,
    mutations::CachedResource,
};
use crate::models::{
    billboard::Billboard, category::Category, color::Color, product::ProductDetail, size::Size,
};

/// Um recurso endereçável do catálogo: sabe o próprio caminho na API e o
/// próprio id dentro do JSON.
pub trait Resource: DeserializeOwned + Serialize + Clone + Send + Sync {
    const KIND: ResourceKind;

    fn id(&self) -> Uuid;
}

impl Resource for Billboard {
    const KIND: ResourceKind = ResourceKind::Billboards;

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Resource for Category {
    const KIND: ResourceKind = ResourceKind::Categories;

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Resource for Size {
    const KIND: ResourceKind = ResourceKind::Sizes;

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Resource for Color {
    const KIND: ResourceKind = ResourceKind::Colors;

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Resource for ProductDetail {
    const KIND: ResourceKind = ResourceKind::Products;

    fn id(&self) -> Uuid {
        self.product.id
    }
}

// ---
// Rascunhos: o que os formulários enviam. Espelham os payloads da API.
// ---

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillboardDraft {
    pub label: String,
    pub image_url: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDraft {
    pub name: String,
    pub billboard_id: Uuid,
}

#[derive(Debug, Clone, Serialize)]
pub struct SizeDraft {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColorDraft {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub price: f64,
    pub category_id: Uuid,
    pub size_ids: Vec<Uuid>,
    pub color_ids: Vec<Uuid>,
    pub images: Vec<String>,
    pub is_featured: bool,
    pub is_archived: bool,
}

/// A porta de entrada do painel para uma loja: um acessor cacheado por
/// tipo de recurso, todos compartilhando o mesmo QueryClient.
#[derive(Clone)]
pub struct StoreClient {
    api: ApiClient,
    cache: Arc<QueryClient>,
    store_id: Uuid,
}

impl StoreClient {
    pub fn new(api: ApiClient, store_id: Uuid) -> Self {
        Self {
            api,
            cache: Arc::new(QueryClient::new()),
            store_id,
        }
    }

    pub fn cache(&self) -> &Arc<QueryClient> {
        &self.cache
    }

    pub fn billboards(&self) -> CachedResource<Billboard> {
        CachedResource::new(self.api.clone(), Arc::clone(&self.cache), self.store_id)
    }

    pub fn categories(&self) -> CachedResource<Category> {
        CachedResource::new(self.api.clone(), Arc::clone(&self.cache), self.store_id)
    }

    pub fn sizes(&self) -> CachedResource<Size> {
        CachedResource::new(self.api.clone(), Arc::clone(&self.cache), self.store_id)
    }

    pub fn colors(&self) -> CachedResource<Color> {
        CachedResource::new(self.api.clone(), Arc::clone(&self.cache), self.store_id)
    }

    pub fn products(&self) -> CachedResource<ProductDetail> {
        CachedResource::new(self.api.clone(), Arc::clone(&self.cache), self.store_id)
    }
}
