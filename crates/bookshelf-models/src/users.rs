//! User records.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use bookshelf_auth::IdentityClaim;

use crate::books::Book;

/// User summary returned to callers. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub saved_books: Vec<Book>,
    pub book_count: usize,
}

impl User {
    pub fn new(id: Uuid, username: String, email: String, saved_books: Vec<Book>) -> Self {
        Self {
            id,
            username,
            email,
            book_count: saved_books.len(),
            saved_books,
        }
    }

    pub fn identity(&self) -> IdentityClaim {
        IdentityClaim::new(self.id, self.username.clone(), self.email.clone())
    }
}

/// Stored login material for one account.
#[derive(Clone, sqlx::FromRow)]
pub struct UserCredentials {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

impl UserCredentials {
    pub fn identity(&self) -> IdentityClaim {
        IdentityClaim::new(self.id, self.username.clone(), self.email.clone())
    }
}

impl fmt::Debug for UserCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserCredentials")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// A validated, already-hashed account ready to be persisted.
#[derive(Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}
