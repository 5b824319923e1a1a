// src/handlers/colors.rs

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
    models::color::Color,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ColorPayload {
    #[validate(
        required(message = "O campo 'name' é obrigatório."),
        length(min = 1, message = "O nome é obrigatório.")
    )]
    pub name: Option<String>,

    // O formulário manda o código hex escolhido no seletor de cor.
    #[validate(
        required(message = "O campo 'value' é obrigatório."),
        length(min = 1, message = "O valor é obrigatório.")
    )]
    pub value: Option<String>,
}

// GET /api/stores/{store_id}/colors
#[utoipa::path(
    get,
    path = "/api/stores/{store_id}/colors",
    tag = "Colors",
    params(("store_id" = Uuid, Path, description = "ID da Loja")),
    responses((status = 200, description = "Cores da loja", body = Vec<Color>))
)]
pub async fn list_colors(
    State(app_state): State<AppState>,
    Path(store_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let colors = app_state.catalog_service.list_colors(store_id).await?;

    Ok((StatusCode::OK, Json(colors)))
}

// GET /api/stores/{store_id}/colors/{color_id}
#[utoipa::path(
    get,
    path = "/api/stores/{store_id}/colors/{color_id}",
    tag = "Colors",
    params(
        ("store_id" = Uuid, Path, description = "ID da Loja"),
        ("color_id" = Uuid, Path, description = "ID da Cor")
    ),
    responses(
        (status = 200, description = "Detalhe da cor", body = Color),
        (status = 404, description = "Cor não encontrada")
    )
)]
pub async fn get_color(
    State(app_state): State<AppState>,
    Path((_store_id, color_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let color = app_state.catalog_service.get_color(color_id).await?;

    Ok((StatusCode::OK, Json(color)))
}

// POST /api/stores/{store_id}/colors
#[utoipa::path(
    post,
    path = "/api/stores/{store_id}/colors",
    tag = "Colors",
    request_body = ColorPayload,
    params(("store_id" = Uuid, Path, description = "ID da Loja")),
    responses(
        (status = 201, description = "Cor criada", body = Color),
        (status = 400, description = "Payload inválido"),
        (status = 404, description = "Loja não encontrada ou não é sua")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_color(
    State(app_state): State<AppState>,
    identity: AuthIdentity,
    Path(store_id): Path<Uuid>,
    Json(payload): Json<ColorPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    app_state
        .store_service
        .ensure_owner(&identity.user_id, store_id)
        .await?;

    let color = app_state
        .catalog_service
        .create_color(store_id, &payload.name.unwrap(), &payload.value.unwrap())
        .await?;

    Ok((StatusCode::CREATED, Json(color)))
}

// PATCH /api/stores/{store_id}/colors/{color_id}
#[utoipa::path(
    patch,
    path = "/api/stores/{store_id}/colors/{color_id}",
    tag = "Colors",
    request_body = ColorPayload,
    params(
        ("store_id" = Uuid, Path, description = "ID da Loja"),
        ("color_id" = Uuid, Path, description = "ID da Cor")
    ),
    responses(
        (status = 200, description = "Cor atualizada", body = Color),
        (status = 404, description = "Loja/cor não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_color(
    State(app_state): State<AppState>,
    identity: AuthIdentity,
    Path((store_id, color_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<ColorPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    app_state
        .store_service
        .ensure_owner(&identity.user_id, store_id)
        .await?;

    let color = app_state
        .catalog_service
        .update_color(color_id, &payload.name.unwrap(), &payload.value.unwrap())
        .await?;

    Ok((StatusCode::OK, Json(color)))
}

// DELETE /api/stores/{store_id}/colors/{color_id}
#[utoipa::path(
    delete,
    path = "/api/stores/{store_id}/colors/{color_id}",
    tag = "Colors",
    params(
        ("store_id" = Uuid, Path, description = "ID da Loja"),
        ("color_id" = Uuid, Path, description = "ID da Cor")
    ),
    responses(
        (status = 200, description = "Cor removida"),
        (status = 404, description = "Loja/cor não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_color(
    State(app_state): State<AppState>,
    identity: AuthIdentity,
    Path((store_id, color_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .store_service
        .ensure_owner(&identity.user_id, store_id)
        .await?;

    app_state.catalog_service.delete_color(color_id).await?;

    Ok((StatusCode::OK, Json(json!({ "deleted": true }))))
}
