// src/handlers/categories.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError, config::AppState, middleware::auth::AuthIdentity,
    models::category::Category,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPayload {
    #[validate(
        required(message = "O campo 'name' é obrigatório."),
        length(min = 1, message = "O nome é obrigatório.")
    )]
    pub name: Option<String>,

    #[validate(required(message = "O campo 'billboardId' é obrigatório."))]
    pub billboard_id: Option<Uuid>,
}

// GET /api/stores/{store_id}/categories
#[utoipa::path(
    get,
    path = "/api/stores/{store_id}/categories",
    tag = "Categories",
    params(("store_id" = Uuid, Path, description = "ID da Loja")),
    responses((status = 200, description = "Categorias da loja", body = Vec<Category>))
)]
pub async fn list_categories(
    State(app_state): State<AppState>,
    Path(store_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let categories = app_state.catalog_service.list_categories(store_id).await?;

    Ok((StatusCode::OK, Json(categories)))
}

// GET /api/stores/{store_id}/categories/{category_id}
#[utoipa::path(
    get,
    path = "/api/stores/{store_id}/categories/{category_id}",
    tag = "Categories",
    params(
        ("store_id" = Uuid, Path, description = "ID da Loja"),
        ("category_id" = Uuid, Path, description = "ID da Categoria")
    ),
    responses(
        (status = 200, description = "Detalhe da categoria", body = Category),
        (status = 404, description = "Categoria não encontrada")
    )
)]
pub async fn get_category(
    State(app_state): State<AppState>,
    Path((_store_id, category_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let category = app_state.catalog_service.get_category(category_id).await?;

    Ok((StatusCode::OK, Json(category)))
}

// POST /api/stores/{store_id}/categories
#[utoipa::path(
    post,
    path = "/api/stores/{store_id}/categories",
    tag = "Categories",
    request_body = CategoryPayload,
    params(("store_id" = Uuid, Path, description = "ID da Loja")),
    responses(
        (status = 201, description = "Categoria criada", body = Category),
        (status = 400, description = "Payload inválido"),
        (status = 404, description = "Loja não encontrada ou não é sua")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_category(
    State(app_state): State<AppState>,
    identity: AuthIdentity,
    Path(store_id): Path<Uuid>,
    Json(payload): Json<CategoryPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    app_state
        .store_service
        .ensure_owner(&identity.user_id, store_id)
        .await?;

    let category = app_state
        .catalog_service
        .create_category(store_id, payload.billboard_id.unwrap(), &payload.name.unwrap())
        .await?;

    Ok((StatusCode::CREATED, Json(category)))
}

// PATCH /api/stores/{store_id}/categories/{category_id}
#[utoipa::path(
    patch,
    path = "/api/stores/{store_id}/categories/{category_id}",
    tag = "Categories",
    request_body = CategoryPayload,
    params(
        ("store_id" = Uuid, Path, description = "ID da Loja"),
        ("category_id" = Uuid, Path, description = "ID da Categoria")
    ),
    responses(
        (status = 200, description = "Categoria atualizada", body = Category),
        (status = 404, description = "Loja/categoria não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_category(
    State(app_state): State<AppState>,
    identity: AuthIdentity,
    Path((store_id, category_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<CategoryPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    app_state
        .store_service
        .ensure_owner(&identity.user_id, store_id)
        .await?;

    let category = app_state
        .catalog_service
        .update_category(
            category_id,
            payload.billboard_id.unwrap(),
            &payload.name.unwrap(),
        )
        .await?;

    Ok((StatusCode::OK, Json(category)))
}

// DELETE /api/stores/{store_id}/categories/{category_id}
#[utoipa::path(
    delete,
    path = "/api/stores/{store_id}/categories/{category_id}",
    tag = "Categories",
    params(
        ("store_id" = Uuid, Path, description = "ID da Loja"),
        ("category_id" = Uuid, Path, description = "ID da Categoria")
    ),
    responses(
        (status = 200, description = "Categoria removida"),
        (status = 404, description = "Loja/categoria não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_category(
    State(app_state): State<AppState>,
    identity: AuthIdentity,
    Path((store_id, category_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .store_service
        .ensure_owner(&identity.user_id, store_id)
        .await?;

    app_state
        .catalog_service
        .delete_category(category_id)
        .await?;

    Ok((StatusCode::OK, Json(json!({ "deleted": true }))))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::testing::{bearer, body_json, seed_store, send, test_state};

    #[tokio::test]
    async fn categoria_referencia_um_billboard_da_loja() {
        let state = test_state().await;
        let store = seed_store(&state, "user_dono").await;
        let token = bearer(&state, "user_dono");

        let billboard = state
            .catalog_service
            .create_billboard(store.id, "Inverno", "https://x/inverno.png")
            .await
            .expect("billboard");

        let response = send(
            &state,
            Method::POST,
            &format!("/api/stores/{}/categories", store.id),
            Some(&token),
            Some(json!({ "name": "Casacos", "billboardId": billboard.id })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;
        assert_eq!(created["name"], "Casacos");
        assert_eq!(created["billboardId"], billboard.id.to_string());
    }

    #[tokio::test]
    async fn sem_billboard_id_e_400() {
        let state = test_state().await;
        let store = seed_store(&state, "user_dono").await;
        let token = bearer(&state, "user_dono");

        let response = send(
            &state,
            Method::POST,
            &format!("/api/stores/{}/categories", store.id),
            Some(&token),
            Some(json!({ "name": "Casacos" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
