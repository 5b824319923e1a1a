// src/handlers/sizes.rs

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
    models::size::Size,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SizePayload {
    #[validate(
        required(message = "O campo 'name' é obrigatório."),
        length(min = 1, message = "O nome é obrigatório.")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "O campo 'value' é obrigatório."),
        length(min = 1, message = "O valor é obrigatório.")
    )]
    pub value: Option<String>,
}

// GET /api/stores/{store_id}/sizes
#[utoipa::path(
    get,
    path = "/api/stores/{store_id}/sizes",
    tag = "Sizes",
    params(("store_id" = Uuid, Path, description = "ID da Loja")),
    responses((status = 200, description = "Tamanhos da loja", body = Vec<Size>))
)]
pub async fn list_sizes(
    State(app_state): State<AppState>,
    Path(store_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let sizes = app_state.catalog_service.list_sizes(store_id).await?;

    Ok((StatusCode::OK, Json(sizes)))
}

// GET /api/stores/{store_id}/sizes/{size_id}
#[utoipa::path(
    get,
    path = "/api/stores/{store_id}/sizes/{size_id}",
    tag = "Sizes",
    params(
        ("store_id" = Uuid, Path, description = "ID da Loja"),
        ("size_id" = Uuid, Path, description = "ID do Tamanho")
    ),
    responses(
        (status = 200, description = "Detalhe do tamanho", body = Size),
        (status = 404, description = "Tamanho não encontrado")
    )
)]
pub async fn get_size(
    State(app_state): State<AppState>,
    Path((_store_id, size_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let size = app_state.catalog_service.get_size(size_id).await?;

    Ok((StatusCode::OK, Json(size)))
}

// POST /api/stores/{store_id}/sizes
#[utoipa::path(
    post,
    path = "/api/stores/{store_id}/sizes",
    tag = "Sizes",
    request_body = SizePayload,
    params(("store_id" = Uuid, Path, description = "ID da Loja")),
    responses(
        (status = 201, description = "Tamanho criado", body = Size),
        (status = 400, description = "Payload inválido"),
        (status = 404, description = "Loja não encontrada ou não é sua")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_size(
    State(app_state): State<AppState>,
    identity: AuthIdentity,
    Path(store_id): Path<Uuid>,
    Json(payload): Json<SizePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    app_state
        .store_service
        .ensure_owner(&identity.user_id, store_id)
        .await?;

    let size = app_state
        .catalog_service
        .create_size(store_id, &payload.name.unwrap(), &payload.value.unwrap())
        .await?;

    Ok((StatusCode::CREATED, Json(size)))
}

// PATCH /api/stores/{store_id}/sizes/{size_id}
#[utoipa::path(
    patch,
    path = "/api/stores/{store_id}/sizes/{size_id}",
    tag = "Sizes",
    request_body = SizePayload,
    params(
        ("store_id" = Uuid, Path, description = "ID da Loja"),
        ("size_id" = Uuid, Path, description = "ID do Tamanho")
    ),
    responses(
        (status = 200, description = "Tamanho atualizado", body = Size),
        (status = 404, description = "Loja/tamanho não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_size(
    State(app_state): State<AppState>,
    identity: AuthIdentity,
    Path((store_id, size_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<SizePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    app_state
        .store_service
        .ensure_owner(&identity.user_id, store_id)
        .await?;

    let size = app_state
        .catalog_service
        .update_size(size_id, &payload.name.unwrap(), &payload.value.unwrap())
        .await?;

    Ok((StatusCode::OK, Json(size)))
}

// DELETE /api/stores/{store_id}/sizes/{size_id}
#[utoipa::path(
    delete,
    path = "/api/stores/{store_id}/sizes/{size_id}",
    tag = "Sizes",
    params(
        ("store_id" = Uuid, Path, description = "ID da Loja"),
        ("size_id" = Uuid, Path, description = "ID do Tamanho")
    ),
    responses(
        (status = 200, description = "Tamanho removido"),
        (status = 404, description = "Loja/tamanho não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_size(
    State(app_state): State<AppState>,
    identity: AuthIdentity,
    Path((store_id, size_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .store_service
        .ensure_owner(&identity.user_id, store_id)
        .await?;

    app_state.catalog_service.delete_size(size_id).await?;

    Ok((StatusCode::OK, Json(json!({ "deleted": true }))))
}
