use std::sync::Arc;

use bookshelf_config::{CatalogConfig, CorsConfig, JwtConfig, RateLimitConfig};
use bookshelf_db::{InMemoryUserRepository, PgUserRepository, UserRepository, init_db_pool};
use tracing::{info, warn};

use crate::modules::books::catalog::{BookCatalog, GoogleBooksCatalog};

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub catalog: Arc<dyn BookCatalog>,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub rate_limit_config: RateLimitConfig,
}

/// Builds the state from the environment.
///
/// Uses PostgreSQL when `DATABASE_URL` is set and the in-memory repository
/// otherwise. Fails when `JWT_SECRET` is missing.
pub async fn init_app_state() -> anyhow::Result<AppState> {
    let jwt_config = JwtConfig::from_env()?;

    let users: Arc<dyn UserRepository> = match std::env::var("DATABASE_URL") {
        Ok(database_url) if !database_url.trim().is_empty() => {
            let max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_CONNECTIONS);
            let pool = init_db_pool(&database_url, max_connections).await?;
            Arc::new(PgUserRepository::new(pool))
        }
        _ => {
            warn!("DATABASE_URL not set, user data is kept in memory and lost on restart");
            Arc::new(InMemoryUserRepository::new())
        }
    };

    let catalog_config = CatalogConfig::from_env();
    info!(base_url = %catalog_config.base_url, "Book catalog configured");
    let catalog = Arc::new(GoogleBooksCatalog::new(catalog_config)?);

    Ok(AppState {
        users,
        catalog,
        jwt_config,
        cors_config: CorsConfig::from_env(),
        rate_limit_config: RateLimitConfig::from_env(),
    })
}
