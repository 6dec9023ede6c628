//! # Bookshelf Config
//!
//! Configuration types for the Bookshelf API, loaded from environment
//! variables once at process start and then passed around by value.
//!
//! - [`jwt`]: token signing secret and lifetime
//! - [`cors`]: allowed browser origins
//! - [`rate_limit`]: throttling for the account endpoints
//! - [`catalog`]: external book catalog endpoint
//!
//! # Example
//!
//! ```ignore
//! use bookshelf_config::{CatalogConfig, CorsConfig, JwtConfig, RateLimitConfig};
//!
//! let jwt_config = JwtConfig::from_env()?;
//! let cors_config = CorsConfig::from_env();
//! let rate_limit_config = RateLimitConfig::from_env();
//! let catalog_config = CatalogConfig::from_env();
//! ```

pub mod catalog;
pub mod cors;
pub mod jwt;
pub mod rate_limit;

pub use catalog::CatalogConfig;
pub use cors::CorsConfig;
pub use jwt::{DEFAULT_TOKEN_EXPIRY_SECS, JwtConfig};
pub use rate_limit::RateLimitConfig;
