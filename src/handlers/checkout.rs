// src/handlers/checkout.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{common::error::AppError, config::AppState};

// Dados de cobrança no formato que o gateway espera (por isso snake_case).
// Campos extras (nome, e-mail...) passam adiante intactos via `extra`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct BillingData {
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub building: String,
    #[serde(default)]
    pub apartment: String,
    #[serde(default)]
    pub floor: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub country: String,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutPayload {
    #[validate(
        required(message = "O campo 'productIds' é obrigatório."),
        length(min = 1, message = "Informe ao menos um produto.")
    )]
    pub product_ids: Option<Vec<Uuid>>,

    #[serde(rename = "billing_data")]
    #[validate(required(message = "O campo 'billing_data' é obrigatório."))]
    pub billing_data: Option<BillingData>,

    // Tudo o mais (valor, moeda, itens de exibição...) vai direto para o
    // gateway, sem interpretação nossa.
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub payment_data: Map<String, Value>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub payment_url: String,
    pub order_id: Uuid,
}

// POST /api/stores/{store_id}/checkout
//
// Rota pública: é o comprador da vitrine que chega aqui, não o dono.
#[utoipa::path(
    post,
    path = "/api/stores/{store_id}/checkout",
    tag = "Checkout",
    request_body = CheckoutPayload,
    params(("store_id" = Uuid, Path, description = "ID da Loja")),
    responses(
        (status = 200, description = "URL do checkout hospedado e id do pedido", body = CheckoutResponse),
        (status = 400, description = "Lista de produtos ausente ou vazia"),
        (status = 500, description = "Falha na intenção de pagamento")
    )
)]
pub async fn checkout(
    State(app_state): State<AppState>,
    Path(store_id): Path<Uuid>,
    Json(payload): Json<CheckoutPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let product_ids = payload.product_ids.unwrap();
    let billing = payload.billing_data.unwrap();

    // O endereço é achatado numa única linha, do jeito que o painel exibe.
    let address = format!(
        "Street: {}, Building: {}, Apartment: {}, Floor: {}, {}, {}",
        billing.street, billing.building, billing.apartment, billing.floor, billing.state,
        billing.country
    );

    // Remonta o corpo repassado ao gateway: tudo menos a lista de produtos.
    let mut payment_data = payload.payment_data;
    payment_data.insert(
        "billing_data".to_string(),
        serde_json::to_value(&billing).map_err(anyhow::Error::from)?,
    );

    let outcome = app_state
        .order_service
        .checkout(
            store_id,
            &product_ids,
            &billing.phone_number,
            &address,
            &payment_data,
        )
        .await?;

    Ok((
        StatusCode::OK,
        Json(CheckoutResponse {
            payment_url: outcome.payment_url,
            order_id: outcome.order_id,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use axum::{http::{Method, StatusCode}, routing::post, Json as AxumJson, Router};
    use serde_json::json;

    use crate::testing::{
        body_json, seed_product, seed_store, send, test_state, test_state_with_gateway,
    };

    const OWNER: &str = "user_dono";

    // Um gateway de mentira que devolve sempre o mesmo client_secret.
    async fn spawn_fake_gateway() -> String {
        let app = Router::new().route(
            "/v1/intention/",
            post(|| async { AxumJson(json!({ "client_secret": "cs_teste" })) }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("porta livre");
        let addr = listener.local_addr().expect("addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("gateway de teste");
        });

        format!("http://{addr}")
    }

    #[tokio::test]
    async fn checkout_cria_pedido_nao_pago_e_devolve_url() {
        let gateway_url = spawn_fake_gateway().await;
        let state = test_state_with_gateway(&gateway_url).await;
        let store = seed_store(&state, OWNER).await;
        let caneca = seed_product(&state, store.id, "Caneca", 10.0).await;
        let camiseta = seed_product(&state, store.id, "Camiseta", 25.0).await;

        let response = send(
            &state,
            Method::POST,
            &format!("/api/stores/{}/checkout", store.id),
            None,
            Some(json!({
                "productIds": [caneca, camiseta],
                "amount": 3500,
                "currency": "EGP",
                "billing_data": {
                    "phone_number": "+201000000000",
                    "street": "Rua A",
                    "building": "10",
                    "apartment": "3",
                    "floor": "2",
                    "state": "Cairo",
                    "country": "EG"
                }
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        let payment_url = body["paymentUrl"].as_str().expect("paymentUrl");
        assert!(payment_url.contains("clientSecret=cs_teste"));
        assert!(payment_url.contains("unifiedcheckout"));

        let order_id = body["orderId"].as_str().expect("orderId");
        let (is_paid, phone): (bool, String) =
            sqlx::query_as("SELECT is_paid, phone FROM orders WHERE id = ?")
                .bind(uuid::Uuid::parse_str(order_id).expect("uuid"))
                .fetch_one(&state.db_pool)
                .await
                .expect("pedido");
        assert!(!is_paid); // nasce não-pago, sempre
        assert_eq!(phone, "+201000000000");

        let items: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM order_items")
            .fetch_one(&state.db_pool)
            .await
            .expect("itens");
        assert_eq!(items, 2);
    }

    #[tokio::test]
    async fn gateway_fora_do_ar_nao_cria_pedido() {
        // O estado padrão aponta o gateway para uma porta morta.
        let state = test_state().await;
        let store = seed_store(&state, OWNER).await;
        let caneca = seed_product(&state, store.id, "Caneca", 10.0).await;

        let response = send(
            &state,
            Method::POST,
            &format!("/api/stores/{}/checkout", store.id),
            None,
            Some(json!({
                "productIds": [caneca],
                "billing_data": { "phone_number": "+200" }
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let orders: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&state.db_pool)
            .await
            .expect("pedidos");
        assert_eq!(orders, 0);
    }

    #[tokio::test]
    async fn lista_de_produtos_vazia_e_400() {
        let state = test_state().await;
        let store = seed_store(&state, OWNER).await;

        let response = send(
            &state,
            Method::POST,
            &format!("/api/stores/{}/checkout", store.id),
            None,
            Some(json!({
                "productIds": [],
                "billing_data": { "phone_number": "+200" }
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
