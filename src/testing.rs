// src/testing.rs
//
// Apoio aos testes de integração: estado com SQLite em memória, tokens
// assinados com o segredo de teste e um atalho para disparar requisições
// contra o router real.

use std::str::FromStr;

use axum::{
    body::Body,
    http::{header, Method, Request},
    response::Response,
};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tower::ServiceExt;

use crate::{
    config::AppState,
    models::store::Store,
    router::app_router,
    services::payment::{PaymentConfig, PaymentGateway},
};

pub const TEST_JWT_SECRET: &str = "segredo-de-teste";

/// Estado completo sobre um banco em memória, com o gateway apontado para
/// uma porta morta (o checkout só fala com ele se o teste quiser).
pub async fn test_state() -> AppState {
    test_state_with_gateway("http://127.0.0.1:1").await
}

pub async fn test_state_with_gateway(api_url: &str) -> AppState {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("opções do sqlite")
        .foreign_keys(true);

    // Uma única conexão: cada teste enxerga o mesmo banco em memória.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("pool em memória");

    sqlx::migrate!().run(&pool).await.expect("migrações");

    let payment = PaymentGateway::new(PaymentConfig {
        secret_key: "sk_teste".to_string(),
        public_key: "pk_teste".to_string(),
        api_url: api_url.to_string(),
        integration_id: 4900588,
        backend_url: "http://localhost:3000".to_string(),
        frontend_url: "http://localhost:3001".to_string(),
    })
    .expect("gateway");

    AppState::from_parts(pool, TEST_JWT_SECRET.to_string(), payment)
}

pub fn bearer(state: &AppState, user_id: &str) -> String {
    let token = state
        .auth_service
        .create_token(user_id)
        .expect("token de teste");
    format!("Bearer {token}")
}

pub async fn seed_store(state: &AppState, user_id: &str) -> Store {
    state
        .store_service
        .create_store("Loja de Teste", user_id)
        .await
        .expect("loja de teste")
}

/// Produto mínimo (com billboard/categoria próprios) para testes de
/// pedidos e de painel.
pub async fn seed_product(
    state: &AppState,
    store_id: uuid::Uuid,
    name: &str,
    price: f64,
) -> uuid::Uuid {
    let billboard = state
        .catalog_service
        .create_billboard(store_id, "Seed", "https://x/seed.png")
        .await
        .expect("billboard");
    let category = state
        .catalog_service
        .create_category(store_id, billboard.id, "Seed")
        .await
        .expect("categoria");

    let product = state
        .product_service
        .create_product(
            store_id,
            crate::services::product_service::ProductInput {
                name: name.to_string(),
                price,
                category_id: category.id,
                size_ids: vec![],
                color_ids: vec![],
                image_urls: vec![],
                is_featured: false,
                is_archived: false,
            },
        )
        .await
        .expect("produto");

    product.id
}

/// Pedido direto no banco, com um item por produto.
pub async fn seed_order(
    state: &AppState,
    store_id: uuid::Uuid,
    product_ids: &[uuid::Uuid],
    is_paid: bool,
) -> uuid::Uuid {
    let order_id = uuid::Uuid::new_v4();
    let now = chrono::Utc::now();

    sqlx::query(
        "INSERT INTO orders (id, store_id, is_paid, phone, address, created_at, updated_at)
         VALUES (?, ?, ?, '', '', ?, ?)",
    )
    .bind(order_id)
    .bind(store_id)
    .bind(is_paid)
    .bind(now)
    .bind(now)
    .execute(&state.db_pool)
    .await
    .expect("pedido");

    for product_id in product_ids {
        sqlx::query("INSERT INTO order_items (id, order_id, product_id) VALUES (?, ?, ?)")
            .bind(uuid::Uuid::new_v4())
            .bind(order_id)
            .bind(product_id)
            .execute(&state.db_pool)
            .await
            .expect("item do pedido");
    }

    order_id
}

/// Dispara uma requisição contra o router real, sem rede.
pub async fn send(
    state: &AppState,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, token);
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request de teste");

    app_router(state.clone())
        .oneshot(request)
        .await
        .expect("resposta do router")
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body deveria ser JSON")
}
