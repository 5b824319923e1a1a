// src/router.rs

use axum::{
    routing::{get, patch, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers};

/// Monta o router completo. Fica fora do main para os testes conseguirem
/// disparar requisições direto contra ele.
pub fn app_router(state: AppState) -> Router {
    // Tudo o que vive debaixo de uma loja específica.
    let store_scoped = Router::new()
        .route(
            "/",
            patch(handlers::stores::update_store).delete(handlers::stores::delete_store),
        )
        .route(
            "/billboards",
            get(handlers::billboards::list_billboards)
                .post(handlers::billboards::create_billboard),
        )
        .route(
            "/billboards/{billboard_id}",
            get(handlers::billboards::get_billboard)
                .patch(handlers::billboards::update_billboard)
                .delete(handlers::billboards::delete_billboard),
        )
        .route(
            "/categories",
            get(handlers::categories::list_categories)
                .post(handlers::categories::create_category),
        )
        .route(
            "/categories/{category_id}",
            get(handlers::categories::get_category)
                .patch(handlers::categories::update_category)
                .delete(handlers::categories::delete_category),
        )
        .route(
            "/sizes",
            get(handlers::sizes::list_sizes).post(handlers::sizes::create_size),
        )
        .route(
            "/sizes/{size_id}",
            get(handlers::sizes::get_size)
                .patch(handlers::sizes::update_size)
                .delete(handlers::sizes::delete_size),
        )
        .route(
            "/colors",
            get(handlers::colors::list_colors).post(handlers::colors::create_color),
        )
        .route(
            "/colors/{color_id}",
            get(handlers::colors::get_color)
                .patch(handlers::colors::update_color)
                .delete(handlers::colors::delete_color),
        )
        .route(
            "/products",
            get(handlers::products::list_products).post(handlers::products::create_product),
        )
        .route(
            "/products/{product_id}",
            get(handlers::products::get_product)
                .patch(handlers::products::update_product)
                .delete(handlers::products::delete_product),
        )
        .route("/orders", get(handlers::orders::list_orders))
        .route("/dashboard/summary", get(handlers::dashboard::get_summary))
        .route(
            "/dashboard/sales-chart",
            get(handlers::dashboard::get_sales_chart),
        )
        .route("/checkout", post(handlers::checkout::checkout))
        .route("/webhook", post(handlers::webhook::handle_webhook));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/stores", post(handlers::stores::create_store))
        .nest("/api/stores/{store_id}", store_scoped)
        .merge(
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()),
        )
        .with_state(state)
}
