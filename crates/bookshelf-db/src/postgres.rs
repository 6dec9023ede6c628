use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use bookshelf_models::{Book, NewUser, User, UserCredentials};

use crate::repository::{RepositoryError, SavedBooksUpdate, UserRepository};

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: String,
}

#[derive(Clone)]
pub struct PgUserRepository {
    db: PgPool,
}

impl PgUserRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    async fn saved_books(&self, user_id: Uuid) -> Result<Vec<Book>, RepositoryError> {
        let books = sqlx::query_as::<_, Book>(
            "SELECT book_id, authors, description, title, image, link
             FROM saved_books
             WHERE user_id = $1
             ORDER BY saved_at, book_id",
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(books)
    }
}

fn unique_violation_field(err: &sqlx::Error) -> Option<&'static str> {
    let sqlx::Error::Database(db_err) = err else {
        return None;
    };
    if !db_err.is_unique_violation() {
        return None;
    }
    match db_err.constraint() {
        Some(constraint) if constraint.contains("username") => Some("username"),
        _ => Some("email"),
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self, new_user), fields(username = %new_user.username))]
    async fn create_user(&self, new_user: NewUser) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            "INSERT INTO users (id, username, email, password)
             VALUES ($1, $2, $3, $4)
             RETURNING id, username, email",
        )
        .bind(Uuid::new_v4())
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .fetch_one(&self.db)
        .await
        .map_err(|err| match unique_violation_field(&err) {
            Some(field) => RepositoryError::Conflict(field),
            None => RepositoryError::Database(err),
        })?;

        Ok(User::new(row.id, row.username, row.email, Vec::new()))
    }

    #[instrument(skip(self, email))]
    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, RepositoryError> {
        let credentials = sqlx::query_as::<_, UserCredentials>(
            "SELECT id, username, email, password AS password_hash FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;

        Ok(credentials)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
        let Some(row) = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, email FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        else {
            return Ok(None);
        };

        let books = self.saved_books(row.id).await?;
        Ok(Some(User::new(row.id, row.username, row.email, books)))
    }

    #[instrument(skip(self, book), fields(book_id = %book.book_id))]
    async fn add_saved_book(
        &self,
        user_id: Uuid,
        book: Book,
    ) -> Result<Option<SavedBooksUpdate>, RepositoryError> {
        // Inserting for a missing user inserts nothing, so the lookup below
        // reports the absence.
        let result = sqlx::query(
            "INSERT INTO saved_books (user_id, book_id, title, authors, description, image, link)
             SELECT $1, $2, $3, $4, $5, $6, $7
             WHERE EXISTS (SELECT 1 FROM users WHERE id = $1)
             ON CONFLICT (user_id, book_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(&book.book_id)
        .bind(&book.title)
        .bind(&book.authors)
        .bind(&book.description)
        .bind(&book.image)
        .bind(&book.link)
        .execute(&self.db)
        .await?;

        Ok(self.find_by_id(user_id).await?.map(|user| SavedBooksUpdate {
            user,
            changed: result.rows_affected() > 0,
        }))
    }

    #[instrument(skip(self))]
    async fn remove_saved_book(
        &self,
        user_id: Uuid,
        book_id: &str,
    ) -> Result<Option<SavedBooksUpdate>, RepositoryError> {
        let result = sqlx::query("DELETE FROM saved_books WHERE user_id = $1 AND book_id = $2")
            .bind(user_id)
            .bind(book_id)
            .execute(&self.db)
            .await?;

        Ok(self.find_by_id(user_id).await?.map(|user| SavedBooksUpdate {
            user,
            changed: result.rows_affected() > 0,
        }))
    }
}
