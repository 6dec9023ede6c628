use bookshelf_core::AppError;
use bookshelf_db::UserRepository;
use bookshelf_models::{Book, User};
use bookshelf_observability::track_saved_book_change;
use tracing::{info, instrument};
use uuid::Uuid;

pub struct UserService;

fn user_not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!("User not found"))
}

impl UserService {
    #[instrument(skip(users))]
    pub async fn current_user(users: &dyn UserRepository, user_id: Uuid) -> Result<User, AppError> {
        users.find_by_id(user_id).await?.ok_or_else(user_not_found)
    }

    /// Adds `book` to the user's saved list. Saving an id already present
    /// leaves the list unchanged.
    #[instrument(skip(users, book), fields(book_id = %book.book_id))]
    pub async fn save_book(
        users: &dyn UserRepository,
        user_id: Uuid,
        book: Book,
    ) -> Result<User, AppError> {
        let update = users
            .add_saved_book(user_id, book)
            .await?
            .ok_or_else(user_not_found)?;
        if update.changed {
            track_saved_book_change("save");
        }
        info!(
            book_count = update.user.book_count,
            changed = update.changed,
            "Book saved"
        );
        Ok(update.user)
    }

    /// Removes the entry with `book_id`; removing an absent id is not an error.
    #[instrument(skip(users))]
    pub async fn remove_book(
        users: &dyn UserRepository,
        user_id: Uuid,
        book_id: &str,
    ) -> Result<User, AppError> {
        let update = users
            .remove_saved_book(user_id, book_id)
            .await?
            .ok_or_else(user_not_found)?;
        if update.changed {
            track_saved_book_change("remove");
        }
        info!(
            book_count = update.user.book_count,
            changed = update.changed,
            "Book removed"
        );
        Ok(update.user)
    }
}
