use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use bookshelf_models::{Book, NewUser, User, UserCredentials};

use crate::repository::{RepositoryError, SavedBooksUpdate, UserRepository};

#[derive(Debug, Clone)]
struct StoredUser {
    credentials: UserCredentials,
    saved_books: Vec<Book>,
}

impl StoredUser {
    fn summary(&self) -> User {
        User::new(
            self.credentials.id,
            self.credentials.username.clone(),
            self.credentials.email.clone(),
            self.saved_books.clone(),
        )
    }
}

/// Process-local repository. Data lives only as long as the value.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, StoredUser>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create_user(&self, new_user: NewUser) -> Result<User, RepositoryError> {
        let mut users = self.users.write().await;

        if users
            .values()
            .any(|u| u.credentials.username == new_user.username)
        {
            return Err(RepositoryError::Conflict("username"));
        }
        if users.values().any(|u| u.credentials.email == new_user.email) {
            return Err(RepositoryError::Conflict("email"));
        }

        let stored = StoredUser {
            credentials: UserCredentials {
                id: Uuid::new_v4(),
                username: new_user.username,
                email: new_user.email,
                password_hash: new_user.password_hash,
            },
            saved_books: Vec::new(),
        };
        let user = stored.summary();
        users.insert(user.id, stored);

        Ok(user)
    }

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, RepositoryError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.credentials.email == email)
            .map(|u| u.credentials.clone()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
        let users = self.users.read().await;
        Ok(users.get(&id).map(StoredUser::summary))
    }

    async fn add_saved_book(
        &self,
        user_id: Uuid,
        book: Book,
    ) -> Result<Option<SavedBooksUpdate>, RepositoryError> {
        let mut users = self.users.write().await;
        let Some(stored) = users.get_mut(&user_id) else {
            return Ok(None);
        };

        let changed = !stored.saved_books.iter().any(|b| b.book_id == book.book_id);
        if changed {
            stored.saved_books.push(book);
        }

        Ok(Some(SavedBooksUpdate {
            user: stored.summary(),
            changed,
        }))
    }

    async fn remove_saved_book(
        &self,
        user_id: Uuid,
        book_id: &str,
    ) -> Result<Option<SavedBooksUpdate>, RepositoryError> {
        let mut users = self.users.write().await;
        let Some(stored) = users.get_mut(&user_id) else {
            return Ok(None);
        };

        let before = stored.saved_books.len();
        stored.saved_books.retain(|b| b.book_id != book_id);

        Ok(Some(SavedBooksUpdate {
            user: stored.summary(),
            changed: stored.saved_books.len() != before,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
        }
    }

    fn book(id: &str, title: &str) -> Book {
        Book {
            book_id: id.to_string(),
            authors: vec!["Ursula K. Le Guin".to_string()],
            description: String::new(),
            title: title.to_string(),
            image: String::new(),
            link: String::new(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find_user() {
        let repo = InMemoryUserRepository::new();
        let user = repo
            .create_user(new_user("reader", "reader@example.com"))
            .await
            .unwrap();

        let found = repo.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(found, user);

        let credentials = repo
            .find_credentials_by_email("reader@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(credentials.id, user.id);
        assert_eq!(credentials.password_hash, "hash");
    }

    #[tokio::test]
    async fn test_duplicate_username_or_email_conflicts() {
        let repo = InMemoryUserRepository::new();
        repo.create_user(new_user("reader", "reader@example.com"))
            .await
            .unwrap();

        let err = repo
            .create_user(new_user("reader", "other@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict("username")));

        let err = repo
            .create_user(new_user("other", "reader@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict("email")));
        assert_eq!(repo.user_count().await, 1);
    }

    #[tokio::test]
    async fn test_saving_same_book_twice_keeps_one_entry() {
        let repo = InMemoryUserRepository::new();
        let user = repo
            .create_user(new_user("reader", "reader@example.com"))
            .await
            .unwrap();

        let first = repo
            .add_saved_book(user.id, book("earthsea", "A Wizard of Earthsea"))
            .await
            .unwrap()
            .unwrap();
        assert!(first.changed);

        let second = repo
            .add_saved_book(user.id, book("earthsea", "A Wizard of Earthsea"))
            .await
            .unwrap()
            .unwrap();

        assert!(!second.changed);
        assert_eq!(second.user.saved_books.len(), 1);
        assert_eq!(second.user.book_count, 1);
    }

    #[tokio::test]
    async fn test_remove_book() {
        let repo = InMemoryUserRepository::new();
        let user = repo
            .create_user(new_user("reader", "reader@example.com"))
            .await
            .unwrap();
        repo.add_saved_book(user.id, book("earthsea", "A Wizard of Earthsea"))
            .await
            .unwrap();
        repo.add_saved_book(user.id, book("dispossessed", "The Dispossessed"))
            .await
            .unwrap();

        let updated = repo
            .remove_saved_book(user.id, "earthsea")
            .await
            .unwrap()
            .unwrap();

        assert!(updated.changed);
        assert_eq!(updated.user.book_count, 1);
        assert_eq!(updated.user.saved_books[0].book_id, "dispossessed");
    }

    #[tokio::test]
    async fn test_remove_absent_book_is_noop() {
        let repo = InMemoryUserRepository::new();
        let user = repo
            .create_user(new_user("reader", "reader@example.com"))
            .await
            .unwrap();
        repo.add_saved_book(user.id, book("earthsea", "A Wizard of Earthsea"))
            .await
            .unwrap();

        let updated = repo
            .remove_saved_book(user.id, "never-saved")
            .await
            .unwrap()
            .unwrap();

        assert!(!updated.changed);
        assert_eq!(updated.user.book_count, 1);
    }

    #[tokio::test]
    async fn test_unknown_user_yields_none() {
        let repo = InMemoryUserRepository::new();
        let missing = Uuid::new_v4();

        assert!(repo.find_by_id(missing).await.unwrap().is_none());
        assert!(
            repo.add_saved_book(missing, book("x", "X"))
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            repo.remove_saved_book(missing, "x")
                .await
                .unwrap()
                .is_none()
        );
    }
}
