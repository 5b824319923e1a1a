// src/handlers/products.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    db::product_repo::ProductFilter,
    middleware::auth::AuthIdentity,
    models::product::{Product, ProductDetail},
    services::product_service::ProductInput,
};

// ---
// Payload: criação/atualização (o formulário manda o conjunto completo)
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    #[validate(
        required(message = "O campo 'name' é obrigatório."),
        length(min = 1, message = "O nome é obrigatório.")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "O campo 'price' é obrigatório."),
        range(min = 0.0, message = "O preço não pode ser negativo.")
    )]
    pub price: Option<f64>,

    #[validate(required(message = "O campo 'categoryId' é obrigatório."))]
    pub category_id: Option<Uuid>,

    #[validate(required(message = "O campo 'sizeIds' é obrigatório."))]
    pub size_ids: Option<Vec<Uuid>>,

    #[validate(required(message = "O campo 'colorIds' é obrigatório."))]
    pub color_ids: Option<Vec<Uuid>>,

    #[validate(required(message = "O campo 'images' é obrigatório."))]
    pub images: Option<Vec<String>>,

    #[serde(default)]
    pub is_featured: bool,

    #[serde(default)]
    pub is_archived: bool,
}

impl ProductPayload {
    // Só chamar depois de validate(): os required garantem os Some.
    fn into_input(self) -> ProductInput {
        ProductInput {
            name: self.name.unwrap(),
            price: self.price.unwrap(),
            category_id: self.category_id.unwrap(),
            size_ids: self.size_ids.unwrap(),
            color_ids: self.color_ids.unwrap(),
            image_urls: self.images.unwrap(),
            is_featured: self.is_featured,
            is_archived: self.is_archived,
        }
    }
}

// Filtros da listagem pública (a vitrine pede destaque/categoria).
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ProductListQuery {
    pub category_id: Option<Uuid>,
    pub is_featured: Option<bool>,
    pub is_archived: Option<bool>,
}

// GET /api/stores/{store_id}/products
#[utoipa::path(
    get,
    path = "/api/stores/{store_id}/products",
    tag = "Products",
    params(
        ("store_id" = Uuid, Path, description = "ID da Loja"),
        ProductListQuery
    ),
    responses((status = 200, description = "Produtos da loja, mais recentes primeiro", body = Vec<ProductDetail>))
)]
pub async fn list_products(
    State(app_state): State<AppState>,
    Path(store_id): Path<Uuid>,
    Query(query): Query<ProductListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filter = ProductFilter {
        category_id: query.category_id,
        is_featured: query.is_featured,
        is_archived: query.is_archived,
    };

    let products = app_state
        .product_service
        .list_products(store_id, filter)
        .await?;

    Ok((StatusCode::OK, Json(products)))
}

// GET /api/stores/{store_id}/products/{product_id}
#[utoipa::path(
    get,
    path = "/api/stores/{store_id}/products/{product_id}",
    tag = "Products",
    params(
        ("store_id" = Uuid, Path, description = "ID da Loja"),
        ("product_id" = Uuid, Path, description = "ID do Produto")
    ),
    responses(
        (status = 200, description = "Produto com relações", body = ProductDetail),
        (status = 404, description = "Produto não encontrado")
    )
)]
pub async fn get_product(
    State(app_state): State<AppState>,
    Path((_store_id, product_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let product = app_state.product_service.get_product(product_id).await?;

    Ok((StatusCode::OK, Json(product)))
}

// POST /api/stores/{store_id}/products
#[utoipa::path(
    post,
    path = "/api/stores/{store_id}/products",
    tag = "Products",
    request_body = ProductPayload,
    params(("store_id" = Uuid, Path, description = "ID da Loja")),
    responses(
        (status = 201, description = "Produto criado", body = Product),
        (status = 400, description = "Payload inválido"),
        (status = 404, description = "Loja não encontrada ou não é sua")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    identity: AuthIdentity,
    Path(store_id): Path<Uuid>,
    Json(payload): Json<ProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    app_state
        .store_service
        .ensure_owner(&identity.user_id, store_id)
        .await?;

    let product = app_state
        .product_service
        .create_product(store_id, payload.into_input())
        .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

// PATCH /api/stores/{store_id}/products/{product_id}
#[utoipa::path(
    patch,
    path = "/api/stores/{store_id}/products/{product_id}",
    tag = "Products",
    request_body = ProductPayload,
    params(
        ("store_id" = Uuid, Path, description = "ID da Loja"),
        ("product_id" = Uuid, Path, description = "ID do Produto")
    ),
    responses(
        (status = 200, description = "Produto atualizado", body = ProductDetail),
        (status = 404, description = "Loja/produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_product(
    State(app_state): State<AppState>,
    identity: AuthIdentity,
    Path((store_id, product_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<ProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    app_state
        .store_service
        .ensure_owner(&identity.user_id, store_id)
        .await?;

    let product = app_state
        .product_service
        .update_product(product_id, payload.into_input())
        .await?;

    Ok((StatusCode::OK, Json(product)))
}

// DELETE /api/stores/{store_id}/products/{product_id}
#[utoipa::path(
    delete,
    path = "/api/stores/{store_id}/products/{product_id}",
    tag = "Products",
    params(
        ("store_id" = Uuid, Path, description = "ID da Loja"),
        ("product_id" = Uuid, Path, description = "ID do Produto")
    ),
    responses(
        (status = 200, description = "Produto removido"),
        (status = 404, description = "Loja/produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_product(
    State(app_state): State<AppState>,
    identity: AuthIdentity,
    Path((store_id, product_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .store_service
        .ensure_owner(&identity.user_id, store_id)
        .await?;

    app_state.product_service.delete_product(product_id).await?;

    Ok((StatusCode::OK, Json(json!({ "deleted": true }))))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;
    use uuid::Uuid;

    use crate::{
        config::AppState,
        testing::{bearer, body_json, seed_store, send, test_state},
    };

    const OWNER: &str = "user_dono";

    // Catálogo mínimo: billboard → categoria + um tamanho e uma cor.
    async fn seed_catalog(state: &AppState, store_id: Uuid) -> (Uuid, Uuid, Uuid) {
        let billboard = state
            .catalog_service
            .create_billboard(store_id, "Base", "https://x/base.png")
            .await
            .expect("billboard");
        let category = state
            .catalog_service
            .create_category(store_id, billboard.id, "Camisetas")
            .await
            .expect("categoria");
        let size = state
            .catalog_service
            .create_size(store_id, "Médio", "M")
            .await
            .expect("tamanho");
        let color = state
            .catalog_service
            .create_color(store_id, "Preto", "#000000")
            .await
            .expect("cor");

        (category.id, size.id, color.id)
    }

    #[tokio::test]
    async fn criacao_grava_produto_imagens_e_vinculos() {
        let state = test_state().await;
        let store = seed_store(&state, OWNER).await;
        let (category_id, size_id, color_id) = seed_catalog(&state, store.id).await;
        let token = bearer(&state, OWNER);

        let response = send(
            &state,
            Method::POST,
            &format!("/api/stores/{}/products", store.id),
            Some(&token),
            Some(json!({
                "name": "Camiseta básica",
                "price": 25.0,
                "categoryId": category_id,
                "sizeIds": [size_id],
                "colorIds": [color_id],
                "images": ["https://x/camiseta-frente.png", "https://x/camiseta-verso.png"],
                "isFeatured": true
            })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;
        let product_id = created["id"].as_str().expect("id").to_string();

        // O detalhe devolve as relações aninhadas.
        let response = send(
            &state,
            Method::GET,
            &format!("/api/stores/{}/products/{}", store.id, product_id),
            None,
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let detail = body_json(response).await;
        assert_eq!(detail["name"], "Camiseta básica");
        assert_eq!(detail["category"]["name"], "Camisetas");
        assert_eq!(detail["sizes"].as_array().expect("sizes").len(), 1);
        assert_eq!(detail["colors"].as_array().expect("colors").len(), 1);
        assert_eq!(detail["images"].as_array().expect("images").len(), 2);
    }

    #[tokio::test]
    async fn atualizacao_substitui_o_conjunto_de_imagens() {
        let state = test_state().await;
        let store = seed_store(&state, OWNER).await;
        let (category_id, size_id, color_id) = seed_catalog(&state, store.id).await;
        let token = bearer(&state, OWNER);

        let response = send(
            &state,
            Method::POST,
            &format!("/api/stores/{}/products", store.id),
            Some(&token),
            Some(json!({
                "name": "Caneca",
                "price": 10.0,
                "categoryId": category_id,
                "sizeIds": [size_id],
                "colorIds": [color_id],
                "images": ["https://x/a.png", "https://x/b.png"]
            })),
        )
        .await;
        let product_id = body_json(response).await["id"]
            .as_str()
            .expect("id")
            .to_string();

        let response = send(
            &state,
            Method::PATCH,
            &format!("/api/stores/{}/products/{}", store.id, product_id),
            Some(&token),
            Some(json!({
                "name": "Caneca grande",
                "price": 12.5,
                "categoryId": category_id,
                "sizeIds": [size_id],
                "colorIds": [color_id],
                "images": ["https://x/c.png"]
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let updated = body_json(response).await;
        assert_eq!(updated["name"], "Caneca grande");
        assert_eq!(updated["price"], 12.5);
        let images = updated["images"].as_array().expect("images");
        assert_eq!(images.len(), 1);
        assert_eq!(images[0]["url"], "https://x/c.png");
    }

    #[tokio::test]
    async fn filtro_is_featured_na_listagem() {
        let state = test_state().await;
        let store = seed_store(&state, OWNER).await;
        let (category_id, size_id, color_id) = seed_catalog(&state, store.id).await;
        let token = bearer(&state, OWNER);

        for (name, featured) in [("Destaque", true), ("Comum", false)] {
            let response = send(
                &state,
                Method::POST,
                &format!("/api/stores/{}/products", store.id),
                Some(&token),
                Some(json!({
                    "name": name,
                    "price": 5.0,
                    "categoryId": category_id,
                    "sizeIds": [size_id],
                    "colorIds": [color_id],
                    "images": ["https://x/p.png"],
                    "isFeatured": featured
                })),
            )
            .await;
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let response = send(
            &state,
            Method::GET,
            &format!("/api/stores/{}/products?isFeatured=true", store.id),
            None,
            None,
        )
        .await;
        let list = body_json(response).await;
        let names: Vec<&str> = list
            .as_array()
            .expect("lista")
            .iter()
            .filter_map(|product| product["name"].as_str())
            .collect();
        assert_eq!(names, vec!["Destaque"]);
    }

    #[tokio::test]
    async fn nao_dono_nao_cria_produto() {
        let state = test_state().await;
        let store = seed_store(&state, OWNER).await;
        let (category_id, size_id, color_id) = seed_catalog(&state, store.id).await;
        let token = bearer(&state, "user_intruso");

        let response = send(
            &state,
            Method::POST,
            &format!("/api/stores/{}/products", store.id),
            Some(&token),
            Some(json!({
                "name": "Invasão",
                "price": 1.0,
                "categoryId": category_id,
                "sizeIds": [size_id],
                "colorIds": [color_id],
                "images": ["https://x/i.png"]
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&state.db_pool)
            .await
            .expect("count");
        assert_eq!(count, 0);
    }
}
