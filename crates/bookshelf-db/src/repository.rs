use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use bookshelf_core::AppError;
use bookshelf_models::{Book, NewUser, User, UserCredentials};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("{0} is already taken")]
    Conflict(&'static str),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Conflict(_) => AppError::conflict(err),
            RepositoryError::Database(_) => AppError::database(err),
        }
    }
}

/// A user after a saved-book mutation, and whether the list actually changed.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedBooksUpdate {
    pub user: User,
    pub changed: bool,
}

/// Document-style access to user records.
///
/// Saved books behave as a set keyed by `book_id`: inserting an existing id
/// leaves the list as it was, removing an absent id changes nothing. Methods
/// that address a user by id return `Ok(None)` when no such user exists.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, new_user: NewUser) -> Result<User, RepositoryError>;

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, RepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError>;

    async fn add_saved_book(
        &self,
        user_id: Uuid,
        book: Book,
    ) -> Result<Option<SavedBooksUpdate>, RepositoryError>;

    async fn remove_saved_book(
        &self,
        user_id: Uuid,
        book_id: &str,
    ) -> Result<Option<SavedBooksUpdate>, RepositoryError>;
}
