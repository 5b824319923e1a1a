// src/handlers/billboards.rs

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
    models::billboard::Billboard,
};

// ---
// Payload: criação/atualização (o formulário manda sempre os dois campos)
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BillboardPayload {
    #[validate(
        required(message = "O campo 'label' é obrigatório."),
        length(min = 1, message = "O label é obrigatório.")
    )]
    pub label: Option<String>,

    #[validate(
        required(message = "O campo 'imageUrl' é obrigatório."),
        length(min = 1, message = "A URL da imagem é obrigatória.")
    )]
    pub image_url: Option<String>,
}

// GET /api/stores/{store_id}/billboards (rota pública: a vitrine lê daqui)
#[utoipa::path(
    get,
    path = "/api/stores/{store_id}/billboards",
    tag = "Billboards",
    params(("store_id" = Uuid, Path, description = "ID da Loja")),
    responses((status = 200, description = "Billboards da loja", body = Vec<Billboard>))
)]
pub async fn list_billboards(
    State(app_state): State<AppState>,
    Path(store_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let billboards = app_state.catalog_service.list_billboards(store_id).await?;

    Ok((StatusCode::OK, Json(billboards)))
}

// GET /api/stores/{store_id}/billboards/{billboard_id}
#[utoipa::path(
    get,
    path = "/api/stores/{store_id}/billboards/{billboard_id}",
    tag = "Billboards",
    params(
        ("store_id" = Uuid, Path, description = "ID da Loja"),
        ("billboard_id" = Uuid, Path, description = "ID do Billboard")
    ),
    responses(
        (status = 200, description = "Detalhe do billboard", body = Billboard),
        (status = 404, description = "Billboard não encontrado")
    )
)]
pub async fn get_billboard(
    State(app_state): State<AppState>,
    Path((_store_id, billboard_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let billboard = app_state.catalog_service.get_billboard(billboard_id).await?;

    Ok((StatusCode::OK, Json(billboard)))
}

// POST /api/stores/{store_id}/billboards
#[utoipa::path(
    post,
    path = "/api/stores/{store_id}/billboards",
    tag = "Billboards",
    request_body = BillboardPayload,
    params(("store_id" = Uuid, Path, description = "ID da Loja")),
    responses(
        (status = 201, description = "Billboard criado", body = Billboard),
        (status = 400, description = "Payload inválido"),
        (status = 401, description = "Não autenticado"),
        (status = 404, description = "Loja não encontrada ou não é sua")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_billboard(
    State(app_state): State<AppState>,
    identity: AuthIdentity,
    Path(store_id): Path<Uuid>,
    Json(payload): Json<BillboardPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    // O portão de autorização roda ANTES de qualquer escrita.
    app_state
        .store_service
        .ensure_owner(&identity.user_id, store_id)
        .await?;

    let billboard = app_state
        .catalog_service
        .create_billboard(store_id, &payload.label.unwrap(), &payload.image_url.unwrap())
        .await?;

    Ok((StatusCode::CREATED, Json(billboard)))
}

// PATCH /api/stores/{store_id}/billboards/{billboard_id}
#[utoipa::path(
    patch,
    path = "/api/stores/{store_id}/billboards/{billboard_id}",
    tag = "Billboards",
    request_body = BillboardPayload,
    params(
        ("store_id" = Uuid, Path, description = "ID da Loja"),
        ("billboard_id" = Uuid, Path, description = "ID do Billboard")
    ),
    responses(
        (status = 200, description = "Billboard atualizado", body = Billboard),
        (status = 404, description = "Loja/billboard não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_billboard(
    State(app_state): State<AppState>,
    identity: AuthIdentity,
    Path((store_id, billboard_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<BillboardPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    app_state
        .store_service
        .ensure_owner(&identity.user_id, store_id)
        .await?;

    let billboard = app_state
        .catalog_service
        .update_billboard(
            billboard_id,
            &payload.label.unwrap(),
            &payload.image_url.unwrap(),
        )
        .await?;

    Ok((StatusCode::OK, Json(billboard)))
}

// DELETE /api/stores/{store_id}/billboards/{billboard_id}
#[utoipa::path(
    delete,
    path = "/api/stores/{store_id}/billboards/{billboard_id}",
    tag = "Billboards",
    params(
        ("store_id" = Uuid, Path, description = "ID da Loja"),
        ("billboard_id" = Uuid, Path, description = "ID do Billboard")
    ),
    responses(
        (status = 200, description = "Billboard removido"),
        (status = 404, description = "Loja/billboard não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_billboard(
    State(app_state): State<AppState>,
    identity: AuthIdentity,
    Path((store_id, billboard_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .store_service
        .ensure_owner(&identity.user_id, store_id)
        .await?;

    app_state
        .catalog_service
        .delete_billboard(billboard_id)
        .await?;

    Ok((StatusCode::OK, Json(json!({ "deleted": true }))))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::testing::{bearer, body_json, seed_store, send, test_state};

    const OWNER: &str = "user_dono";
    const STRANGER: &str = "user_intruso";

    #[tokio::test]
    async fn criar_billboard_e_listar_exatamente_uma_vez() {
        let state = test_state().await;
        let store = seed_store(&state, OWNER).await;
        let token = bearer(&state, OWNER);

        let response = send(
            &state,
            Method::POST,
            &format!("/api/stores/{}/billboards", store.id),
            Some(&token),
            Some(json!({ "label": "Summer Sale", "imageUrl": "https://x/y.png" })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;
        assert_eq!(created["label"], "Summer Sale");
        assert_eq!(created["imageUrl"], "https://x/y.png");
        assert!(created["id"].is_string());

        // A listagem pública da loja contém o billboard exatamente uma vez.
        let response = send(
            &state,
            Method::GET,
            &format!("/api/stores/{}/billboards", store.id),
            None,
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let list = body_json(response).await;
        let matching = list
            .as_array()
            .expect("lista")
            .iter()
            .filter(|billboard| billboard["label"] == "Summer Sale")
            .count();
        assert_eq!(matching, 1);
    }

    #[tokio::test]
    async fn sem_token_e_401_e_nada_e_gravado() {
        let state = test_state().await;
        let store = seed_store(&state, OWNER).await;

        let response = send(
            &state,
            Method::POST,
            &format!("/api/stores/{}/billboards", store.id),
            None,
            Some(json!({ "label": "Promo", "imageUrl": "https://x/z.png" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM billboards")
            .fetch_one(&state.db_pool)
            .await
            .expect("count");
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn loja_de_outro_usuario_e_404_antes_de_qualquer_escrita() {
        let state = test_state().await;
        let store = seed_store(&state, OWNER).await;
        let token = bearer(&state, STRANGER);

        let response = send(
            &state,
            Method::POST,
            &format!("/api/stores/{}/billboards", store.id),
            Some(&token),
            Some(json!({ "label": "Invasão", "imageUrl": "https://x/w.png" })),
        )
        .await;

        // "Não existe" e "não é sua" são indistinguíveis de propósito.
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM billboards")
            .fetch_one(&state.db_pool)
            .await
            .expect("count");
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn atualizacao_por_nao_dono_nao_altera_linha() {
        let state = test_state().await;
        let store = seed_store(&state, OWNER).await;
        let billboard = state
            .catalog_service
            .create_billboard(store.id, "Original", "https://x/a.png")
            .await
            .expect("billboard");

        let token = bearer(&state, STRANGER);
        let response = send(
            &state,
            Method::PATCH,
            &format!("/api/stores/{}/billboards/{}", store.id, billboard.id),
            Some(&token),
            Some(json!({ "label": "Alterado", "imageUrl": "https://x/b.png" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let label: String = sqlx::query_scalar("SELECT label FROM billboards WHERE id = ?")
            .bind(billboard.id)
            .fetch_one(&state.db_pool)
            .await
            .expect("label");
        assert_eq!(label, "Original");
    }

    #[tokio::test]
    async fn payload_sem_label_e_400_com_detalhes() {
        let state = test_state().await;
        let store = seed_store(&state, OWNER).await;
        let token = bearer(&state, OWNER);

        let response = send(
            &state,
            Method::POST,
            &format!("/api/stores/{}/billboards", store.id),
            Some(&token),
            Some(json!({ "imageUrl": "https://x/y.png" })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["details"]["label"].is_array());
    }

    #[tokio::test]
    async fn detalhe_inexistente_e_404() {
        let state = test_state().await;
        let store = seed_store(&state, OWNER).await;

        let response = send(
            &state,
            Method::GET,
            &format!(
                "/api/stores/{}/billboards/{}",
                store.id,
                uuid::Uuid::new_v4()
            ),
            None,
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
