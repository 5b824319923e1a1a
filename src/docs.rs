// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Stores ---
        handlers::stores::create_store,
        handlers::stores::update_store,
        handlers::stores::delete_store,

        // --- Billboards ---
        handlers::billboards::list_billboards,
        handlers::billboards::get_billboard,
        handlers::billboards::create_billboard,
        handlers::billboards::update_billboard,
        handlers::billboards::delete_billboard,

        // --- Categories ---
        handlers::categories::list_categories,
        handlers::categories::get_category,
        handlers::categories::create_category,
        handlers::categories::update_category,
        handlers::categories::delete_category,

        // --- Sizes ---
        handlers::sizes::list_sizes,
        handlers::sizes::get_size,
        handlers::sizes::create_size,
        handlers::sizes::update_size,
        handlers::sizes::delete_size,

        // --- Colors ---
        handlers::colors::list_colors,
        handlers::colors::get_color,
        handlers::colors::create_color,
        handlers::colors::update_color,
        handlers::colors::delete_color,

        // --- Products ---
        handlers::products::list_products,
        handlers::products::get_product,
        handlers::products::create_product,
        handlers::products::update_product,
        handlers::products::delete_product,

        // --- Orders ---
        handlers::orders::list_orders,

        // --- Dashboard ---
        handlers::dashboard::get_summary,
        handlers::dashboard::get_sales_chart,

        // --- Checkout / Webhook ---
        handlers::checkout::checkout,
        handlers::webhook::handle_webhook,
    ),
    components(
        schemas(
            // --- Models ---
            models::store::Store,
            models::billboard::Billboard,
            models::category::Category,
            models::size::Size,
            models::color::Color,
            models::product::Product,
            models::product::ProductImage,
            models::product::ProductDetail,
            models::order::Order,
            models::order::OrderItemDetail,
            models::order::OrderDetail,
            models::dashboard::DashboardSummary,
            models::dashboard::SalesChartEntry,

            // --- Payloads ---
            handlers::stores::StorePayload,
            handlers::billboards::BillboardPayload,
            handlers::categories::CategoryPayload,
            handlers::sizes::SizePayload,
            handlers::colors::ColorPayload,
            handlers::products::ProductPayload,
            handlers::checkout::BillingData,
            handlers::checkout::CheckoutPayload,
            handlers::checkout::CheckoutResponse,
            handlers::webhook::WebhookPayload,
        )
    ),
    tags(
        (name = "Stores", description = "Gestão das Lojas"),
        (name = "Billboards", description = "Banners promocionais"),
        (name = "Categories", description = "Categorias do catálogo"),
        (name = "Sizes", description = "Tamanhos de produto"),
        (name = "Colors", description = "Cores de produto"),
        (name = "Products", description = "Produtos e suas relações"),
        (name = "Orders", description = "Pedidos da loja"),
        (name = "Dashboard", description = "Indicadores e Gráficos Gerenciais"),
        (name = "Checkout", description = "Checkout e webhook do gateway de pagamento")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
