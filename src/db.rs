pub mod store_repo;
pub use store_repo::StoreRepository;
pub mod billboard_repo;
pub use billboard_repo::BillboardRepository;
pub mod category_repo;
pub use category_repo::CategoryRepository;
pub mod size_repo;
pub use size_repo::SizeRepository;
pub mod color_repo;
pub use color_repo::ColorRepository;
pub mod product_repo;
pub use product_repo::ProductRepository;
pub mod order_repo;
pub use order_repo::OrderRepository;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
