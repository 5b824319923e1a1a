// src/handlers/webhook.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{ValidationError, ValidationErrors};

use crate::{common::error::AppError, config::AppState};

// O gateway manda `success` ora como booleano, ora como a string "true".
// O `orderId` chega como string; validamos o formato nós mesmos para
// responder 400 (e não um erro de desserialização) quando vier lixo.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload {
    #[serde(default)]
    #[schema(value_type = Object)]
    pub success: Option<Value>,
    #[serde(default)]
    pub order_id: Option<String>,
}

fn is_success(flag: &Option<Value>) -> bool {
    match flag {
        Some(Value::Bool(value)) => *value,
        Some(Value::String(text)) => text == "true",
        _ => false,
    }
}

fn missing_order_id() -> AppError {
    let mut errors = ValidationErrors::new();
    let mut error = ValidationError::new("required");
    error.message = Some("O campo 'orderId' é obrigatório.".into());
    errors.add("orderId", error);
    AppError::ValidationError(errors)
}

// POST /api/stores/{store_id}/webhook
//
// Callback do gateway de pagamento. Rota pública e SEM verificação de
// assinatura: o contrato do gateway não expõe um segredo para conferir.
// Quem conhece a URL e um id de pedido consegue marcá-lo como pago.
#[utoipa::path(
    post,
    path = "/api/stores/{store_id}/webhook",
    tag = "Checkout",
    request_body = WebhookPayload,
    params(("store_id" = Uuid, Path, description = "ID da Loja")),
    responses(
        (status = 200, description = "Webhook recebido"),
        (status = 400, description = "orderId ausente ou malformado")
    )
)]
pub async fn handle_webhook(
    State(app_state): State<AppState>,
    Path(_store_id): Path<Uuid>,
    Json(payload): Json<WebhookPayload>,
) -> Result<impl IntoResponse, AppError> {
    if is_success(&payload.success) {
        let raw_order_id = payload.order_id.ok_or_else(missing_order_id)?;
        let order_id = Uuid::parse_str(&raw_order_id).map_err(|_| missing_order_id())?;

        app_state.order_service.mark_order_paid(order_id).await?;
    } else {
        tracing::warn!("webhook sem flag de sucesso; nada a fazer");
    }

    Ok((StatusCode::OK, Json(json!({ "received": true }))))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::testing::{body_json, seed_order, seed_product, seed_store, send, test_state};

    const OWNER: &str = "user_dono";

    #[tokio::test]
    async fn webhook_marca_pedido_como_pago_e_e_idempotente() {
        let state = test_state().await;
        let store = seed_store(&state, OWNER).await;
        let product = seed_product(&state, store.id, "Caneca", 10.0).await;
        let order_id = seed_order(&state, store.id, &[product], false).await;

        let uri = format!("/api/stores/{}/webhook", store.id);

        // Primeira chamada: transição CREATED → PAID.
        let response = send(
            &state,
            Method::POST,
            &uri,
            None,
            Some(json!({ "success": "true", "orderId": order_id })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "received": true }));

        let is_paid: bool = sqlx::query_scalar("SELECT is_paid FROM orders WHERE id = ?")
            .bind(order_id)
            .fetch_one(&state.db_pool)
            .await
            .expect("is_paid");
        assert!(is_paid);

        // Segunda chamada idêntica: sem erro, flag continua true.
        let response = send(
            &state,
            Method::POST,
            &uri,
            None,
            Some(json!({ "success": "true", "orderId": order_id })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let is_paid: bool = sqlx::query_scalar("SELECT is_paid FROM orders WHERE id = ?")
            .bind(order_id)
            .fetch_one(&state.db_pool)
            .await
            .expect("is_paid");
        assert!(is_paid);
    }

    #[tokio::test]
    async fn success_booleano_tambem_conta() {
        let state = test_state().await;
        let store = seed_store(&state, OWNER).await;
        let product = seed_product(&state, store.id, "Caneca", 10.0).await;
        let order_id = seed_order(&state, store.id, &[product], false).await;

        let response = send(
            &state,
            Method::POST,
            &format!("/api/stores/{}/webhook", store.id),
            None,
            Some(json!({ "success": true, "orderId": order_id })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let is_paid: bool = sqlx::query_scalar("SELECT is_paid FROM orders WHERE id = ?")
            .bind(order_id)
            .fetch_one(&state.db_pool)
            .await
            .expect("is_paid");
        assert!(is_paid);
    }

    #[tokio::test]
    async fn sem_order_id_e_400() {
        let state = test_state().await;
        let store = seed_store(&state, OWNER).await;

        let response = send(
            &state,
            Method::POST,
            &format!("/api/stores/{}/webhook", store.id),
            None,
            Some(json!({ "success": "true" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn sem_sucesso_nao_toca_no_pedido() {
        let state = test_state().await;
        let store = seed_store(&state, OWNER).await;
        let product = seed_product(&state, store.id, "Caneca", 10.0).await;
        let order_id = seed_order(&state, store.id, &[product], false).await;

        let response = send(
            &state,
            Method::POST,
            &format!("/api/stores/{}/webhook", store.id),
            None,
            Some(json!({ "success": "false", "orderId": order_id })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let is_paid: bool = sqlx::query_scalar("SELECT is_paid FROM orders WHERE id = ?")
            .bind(order_id)
            .fetch_one(&state.db_pool)
            .await
            .expect("is_paid");
        assert!(!is_paid);
    }

    #[tokio::test]
    async fn pedido_desconhecido_e_erro_interno() {
        let state = test_state().await;
        let store = seed_store(&state, OWNER).await;

        let response = send(
            &state,
            Method::POST,
            &format!("/api/stores/{}/webhook", store.id),
            None,
            Some(json!({ "success": "true", "orderId": uuid::Uuid::new_v4() })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
