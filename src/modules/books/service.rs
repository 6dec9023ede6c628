use bookshelf_core::AppError;
use bookshelf_models::Book;
use tracing::instrument;

use super::catalog::BookCatalog;

pub struct BookService;

impl BookService {
    /// A blank query returns no books without calling the catalog.
    #[instrument(skip(catalog))]
    pub async fn search(catalog: &dyn BookCatalog, query: &str) -> Result<Vec<Book>, AppError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        Ok(catalog.search(query).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::books::catalog::CatalogError;
    use async_trait::async_trait;
    use axum::http::StatusCode;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingCatalog {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl BookCatalog for CountingCatalog {
        async fn search(&self, query: &str) -> Result<Vec<Book>, CatalogError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(CatalogError::Status(StatusCode::SERVICE_UNAVAILABLE));
            }
            Ok(vec![Book {
                book_id: "id".to_string(),
                authors: vec![],
                description: String::new(),
                title: query.to_string(),
                image: String::new(),
                link: String::new(),
            }])
        }
    }

    #[tokio::test]
    async fn test_blank_query_skips_catalog() {
        let catalog = CountingCatalog::default();
        let books = BookService::search(&catalog, "   ").await.unwrap();
        assert!(books.is_empty());
        assert_eq!(catalog.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_query_is_trimmed() {
        let catalog = CountingCatalog::default();
        let books = BookService::search(&catalog, "  dune ").await.unwrap();
        assert_eq!(books[0].title, "dune");
    }

    #[tokio::test]
    async fn test_catalog_failure_is_bad_gateway() {
        let catalog = CountingCatalog {
            fail: true,
            ..Default::default()
        };
        let err = BookService::search(&catalog, "dune").await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
    }
}
