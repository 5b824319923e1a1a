// src/handlers/orders.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    common::error::AppError, config::AppState, middleware::auth::AuthIdentity,
    models::order::OrderDetail,
};

// GET /api/stores/{store_id}/orders
//
// Listagem administrativa: só o dono da loja enxerga os pedidos.
#[utoipa::path(
    get,
    path = "/api/stores/{store_id}/orders",
    tag = "Orders",
    params(("store_id" = Uuid, Path, description = "ID da Loja")),
    responses(
        (status = 200, description = "Pedidos da loja com itens e total", body = Vec<OrderDetail>),
        (status = 401, description = "Não autenticado"),
        (status = 404, description = "Loja não encontrada ou não é sua")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_orders(
    State(app_state): State<AppState>,
    identity: AuthIdentity,
    Path(store_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .store_service
        .ensure_owner(&identity.user_id, store_id)
        .await?;

    let orders = app_state.order_service.list_orders(store_id).await?;

    Ok((StatusCode::OK, Json(orders)))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};

    use crate::testing::{
        bearer, body_json, seed_order, seed_product, seed_store, send, test_state,
    };

    const OWNER: &str = "user_dono";

    #[tokio::test]
    async fn lista_pedidos_com_itens_e_total() {
        let state = test_state().await;
        let store = seed_store(&state, OWNER).await;
        let product_a = seed_product(&state, store.id, "Caneca", 10.0).await;
        let product_b = seed_product(&state, store.id, "Camiseta", 25.0).await;
        seed_order(&state, store.id, &[product_a, product_b], true).await;

        let token = bearer(&state, OWNER);
        let response = send(
            &state,
            Method::GET,
            &format!("/api/stores/{}/orders", store.id),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let orders = body_json(response).await;
        let order = &orders.as_array().expect("lista")[0];
        assert_eq!(order["isPaid"], true);
        assert_eq!(order["items"].as_array().expect("itens").len(), 2);
        assert_eq!(order["total"], 35.0);
    }

    #[tokio::test]
    async fn pedidos_sao_so_do_dono() {
        let state = test_state().await;
        let store = seed_store(&state, OWNER).await;

        let token = bearer(&state, "user_intruso");
        let response = send(
            &state,
            Method::GET,
            &format!("/api/stores/{}/orders", store.id),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
