// src/handlers/stores.rs

use axum::{extract::Path, extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError, config::AppState, middleware::auth::AuthIdentity,
    models::store::Store,
};

// ---
// Payload: criação/renomeação da loja
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct StorePayload {
    #[validate(
        required(message = "O campo 'name' é obrigatório."),
        length(min = 1, message = "O nome da loja é obrigatório.")
    )]
    pub name: Option<String>,
}

// POST /api/stores
#[utoipa::path(
    post,
    path = "/api/stores",
    tag = "Stores",
    request_body = StorePayload,
    responses(
        (status = 201, description = "Loja criada", body = Store),
        (status = 400, description = "Payload inválido"),
        (status = 401, description = "Não autenticado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_store(
    State(app_state): State<AppState>,
    identity: AuthIdentity,
    Json(payload): Json<StorePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let store = app_state
        .store_service
        .create_store(&payload.name.unwrap(), &identity.user_id)
        .await?;

    Ok((StatusCode::CREATED, Json(store)))
}

// PATCH /api/stores/{store_id}
#[utoipa::path(
    patch,
    path = "/api/stores/{store_id}",
    tag = "Stores",
    request_body = StorePayload,
    params(("store_id" = Uuid, Path, description = "ID da Loja")),
    responses(
        (status = 200, description = "Loja renomeada", body = Store),
        (status = 404, description = "Loja não encontrada ou não é sua")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_store(
    State(app_state): State<AppState>,
    identity: AuthIdentity,
    Path(store_id): Path<Uuid>,
    Json(payload): Json<StorePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let store = app_state
        .store_service
        .rename_store(store_id, &identity.user_id, &payload.name.unwrap())
        .await?;

    Ok((StatusCode::OK, Json(store)))
}

// DELETE /api/stores/{store_id}
#[utoipa::path(
    delete,
    path = "/api/stores/{store_id}",
    tag = "Stores",
    params(("store_id" = Uuid, Path, description = "ID da Loja")),
    responses(
        (status = 200, description = "Loja removida"),
        (status = 404, description = "Loja não encontrada ou não é sua")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_store(
    State(app_state): State<AppState>,
    identity: AuthIdentity,
    Path(store_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .store_service
        .delete_store(store_id, &identity.user_id)
        .await?;

    Ok((StatusCode::OK, Json(json!({ "deleted": true }))))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::testing::{bearer, body_json, seed_store, send, test_state};

    #[tokio::test]
    async fn criar_loja_devolve_201_com_o_dono() {
        let state = test_state().await;
        let token = bearer(&state, "user_dono");

        let response = send(
            &state,
            Method::POST,
            "/api/stores",
            Some(&token),
            Some(json!({ "name": "Minha Loja" })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;
        assert_eq!(created["name"], "Minha Loja");
        assert_eq!(created["userId"], "user_dono");
    }

    #[tokio::test]
    async fn criar_loja_sem_token_e_401() {
        let state = test_state().await;

        let response = send(
            &state,
            Method::POST,
            "/api/stores",
            None,
            Some(json!({ "name": "Minha Loja" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn renomear_loja_de_outro_usuario_e_404() {
        let state = test_state().await;
        let store = seed_store(&state, "user_dono").await;
        let token = bearer(&state, "user_intruso");

        let response = send(
            &state,
            Method::PATCH,
            &format!("/api/stores/{}", store.id),
            Some(&token),
            Some(json!({ "name": "Tomada" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let name: String = sqlx::query_scalar("SELECT name FROM stores WHERE id = ?")
            .bind(store.id)
            .fetch_one(&state.db_pool)
            .await
            .expect("nome");
        assert_eq!(name, "Loja de Teste");
    }

    #[tokio::test]
    async fn excluir_loja_cascateia_para_as_filhas() {
        let state = test_state().await;
        let store = seed_store(&state, "user_dono").await;
        state
            .catalog_service
            .create_billboard(store.id, "Some junto", "https://x/c.png")
            .await
            .expect("billboard");

        let token = bearer(&state, "user_dono");
        let response = send(
            &state,
            Method::DELETE,
            &format!("/api/stores/{}", store.id),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let billboards: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM billboards")
            .fetch_one(&state.db_pool)
            .await
            .expect("count");
        assert_eq!(billboards, 0);
    }
}
