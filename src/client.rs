// Camada de acesso do cliente (o painel): fetchers tipados por entidade e
// o cache de consultas com mutação otimista. O servidor continua sendo a
// fonte de verdade; o cache só adianta o feedback da interface.

pub mod cache;
pub mod http;
pub mod mutations;
pub mod resources;

pub use cache::{QueryClient, QueryKey, ResourceKind};
pub use http::{ApiClient, ClientError};
pub use mutations::CachedResource;
pub use resources::StoreClient;
