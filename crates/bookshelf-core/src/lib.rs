//! # Bookshelf Core
//!
//! Foundational types shared by every Bookshelf crate.
//!
//! - [`errors`]: the HTTP-mappable [`AppError`]
//! - [`password`]: bcrypt password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use bookshelf_core::{AppError, hash_password, verify_password};
//!
//! let hash = hash_password("correct horse battery staple")?;
//! assert!(verify_password("correct horse battery staple", &hash)?);
//!
//! let error = AppError::not_found(anyhow::anyhow!("User not found"));
//! ```

pub mod errors;
pub mod password;

pub use errors::AppError;
pub use password::{hash_password, verify_password};
