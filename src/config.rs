// src/config.rs

use std::{env, str::FromStr, time::Duration};

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

use crate::{
    db::{
        BillboardRepository, CategoryRepository, ColorRepository, DashboardRepository,
        OrderRepository, ProductRepository, SizeRepository, StoreRepository,
    },
    services::{
        payment::{PaymentConfig, PaymentGateway},
        AuthService, CatalogService, DashboardService, OrderService, ProductService,
        StoreService,
    },
};

// O estado compartilhado que será acessível em toda a aplicação.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub auth_service: AuthService,
    pub store_service: StoreService,
    pub catalog_service: CatalogService,
    pub product_service: ProductService,
    pub order_service: OrderService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    /// Carrega as configurações do ambiente e monta o estado.
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        let payment_config = PaymentConfig {
            secret_key: env::var("PAYMOB_SECRET_KEY")
                .expect("PAYMOB_SECRET_KEY deve ser definida"),
            public_key: env::var("PAYMOB_PUBLIC_KEY")
                .expect("PAYMOB_PUBLIC_KEY deve ser definida"),
            api_url: env::var("PAYMOB_API_URL")
                .unwrap_or_else(|_| "https://accept.paymob.com".to_string()),
            integration_id: env::var("PAYMOB_INTEGRATION_ID")
                .expect("PAYMOB_INTEGRATION_ID deve ser definido")
                .parse()
                .expect("PAYMOB_INTEGRATION_ID deve ser numérico"),
            backend_url: env::var("BACKEND_STORE_URL")
                .expect("BACKEND_STORE_URL deve ser definida"),
            frontend_url: env::var("FRONTEND_STORE_URL")
                .expect("FRONTEND_STORE_URL deve ser definida"),
        };

        // foreign_keys precisa valer em TODA conexão da pool, por isso vai
        // nas opções de conexão e não num PRAGMA avulso.
        let connect_options = SqliteConnectOptions::from_str(&database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let db_pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect_with(connect_options)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        let payment = PaymentGateway::new(payment_config)?;

        Ok(Self::from_parts(db_pool, jwt_secret, payment))
    }

    /// Monta o gráfico de dependências (repositórios → services) a partir
    /// das partes já construídas. Os testes entram por aqui, com uma pool
    /// em memória e um gateway apontado para onde quiserem.
    pub fn from_parts(db_pool: SqlitePool, jwt_secret: String, payment: PaymentGateway) -> Self {
        let store_repo = StoreRepository::new(db_pool.clone());
        let billboard_repo = BillboardRepository::new(db_pool.clone());
        let category_repo = CategoryRepository::new(db_pool.clone());
        let size_repo = SizeRepository::new(db_pool.clone());
        let color_repo = ColorRepository::new(db_pool.clone());
        let product_repo = ProductRepository::new(db_pool.clone());
        let order_repo = OrderRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());

        let auth_service = AuthService::new(jwt_secret);
        let store_service = StoreService::new(store_repo);
        let catalog_service = CatalogService::new(
            billboard_repo,
            category_repo.clone(),
            size_repo,
            color_repo,
        );
        let product_service =
            ProductService::new(product_repo, category_repo, db_pool.clone());
        let order_service = OrderService::new(order_repo, payment, db_pool.clone());
        let dashboard_service = DashboardService::new(dashboard_repo);

        Self {
            db_pool,
            auth_service,
            store_service,
            catalog_service,
            product_service,
            order_service,
            dashboard_service,
        }
    }
}
