use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::services::CatalogService;
use crate::utils::AppError;

/// Server state: shared handles for every request
///
/// | Field | Meaning |
/// |-------|---------|
/// | config | Immutable configuration |
/// | db | SQLite connection pool |
/// | catalog | Catalog service (repos + auth policy) |
/// | jwt | Token service |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: SqlitePool,
    pub catalog: CatalogService,
    pub jwt: Arc<JwtService>,
}

impl ServerState {
    /// Open the database and wire up the services.
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db = DbService::new(&config.db_path).await?;
        let jwt = Arc::new(JwtService::with_config(config.jwt.clone()));
        let catalog = CatalogService::new(db.pool.clone());

        Ok(Self {
            config: config.clone(),
            db: db.pool,
            catalog,
            jwt,
        })
    }
}
