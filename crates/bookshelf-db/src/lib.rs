//! # Bookshelf DB
//!
//! Storage collaborator for user records and their saved books.
//!
//! Handlers depend only on the [`UserRepository`] trait. Two implementations
//! are provided:
//!
//! - [`PgUserRepository`]: PostgreSQL through SQLx, schema in `migrations/`
//! - [`InMemoryUserRepository`]: process-local maps for development and tests
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use bookshelf_db::{PgUserRepository, UserRepository, init_db_pool};
//!
//! let pool = init_db_pool(&database_url, 5).await?;
//! let users: Arc<dyn UserRepository> = Arc::new(PgUserRepository::new(pool));
//! ```

pub mod memory;
pub mod postgres;
pub mod repository;

pub use memory::InMemoryUserRepository;
pub use postgres::PgUserRepository;
pub use repository::{RepositoryError, SavedBooksUpdate, UserRepository};

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

pub use sqlx::PgPool;

/// Connects to PostgreSQL and applies pending migrations.
///
/// # Errors
///
/// Fails when the database is unreachable or a migration cannot be applied.
pub async fn init_db_pool(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    info!(max_connections, "Database pool ready");
    Ok(pool)
}
