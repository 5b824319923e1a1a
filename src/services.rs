pub mod auth;
pub use auth::AuthService;
pub mod store_service;
pub use store_service::StoreService;
pub mod catalog_service;
pub use catalog_service::CatalogService;
pub mod product_service;
pub use product_service::ProductService;
pub mod order_service;
pub use order_service::OrderService;
pub mod dashboard_service;
pub use dashboard_service::DashboardService;
pub mod payment;
pub use payment::PaymentGateway;
