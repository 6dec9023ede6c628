//! External book catalog client.

use std::time::Duration;

use async_trait::async_trait;
use bookshelf_config::CatalogConfig;
use bookshelf_core::AppError;
use bookshelf_models::Book;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};

const NO_AUTHOR: &str = "No author to display";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Book catalog request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Book catalog responded with status {0}")]
    Status(StatusCode),
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        AppError::bad_gateway(err)
    }
}

/// Free-text search over a book catalog.
#[async_trait]
pub trait BookCatalog: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<Book>, CatalogError>;
}

#[derive(Debug, Deserialize)]
struct VolumesResponse {
    #[serde(default)]
    items: Vec<Volume>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Volume {
    id: String,
    #[serde(default)]
    volume_info: VolumeInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumeInfo {
    #[serde(default)]
    title: String,
    authors: Option<Vec<String>>,
    #[serde(default)]
    description: String,
    image_links: Option<ImageLinks>,
    #[serde(default)]
    info_link: String,
}

#[derive(Debug, Deserialize)]
struct ImageLinks {
    thumbnail: Option<String>,
}

impl From<Volume> for Book {
    fn from(volume: Volume) -> Self {
        let info = volume.volume_info;
        let authors = match info.authors {
            Some(authors) if !authors.is_empty() => authors,
            _ => vec![NO_AUTHOR.to_string()],
        };

        Book {
            book_id: volume.id,
            authors,
            description: info.description,
            title: info.title,
            image: info
                .image_links
                .and_then(|links| links.thumbnail)
                .unwrap_or_default(),
            link: info.info_link,
        }
    }
}

/// Google Books volumes API.
#[derive(Debug, Clone)]
pub struct GoogleBooksCatalog {
    client: Client,
    config: CatalogConfig,
}

impl GoogleBooksCatalog {
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl BookCatalog for GoogleBooksCatalog {
    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<Vec<Book>, CatalogError> {
        let max_results = self.config.max_results.to_string();
        let response = self
            .client
            .get(&self.config.base_url)
            .query(&[("q", query), ("maxResults", max_results.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CatalogError::Status(response.status()));
        }

        let volumes: VolumesResponse = response.json().await?;
        debug!(count = volumes.items.len(), "Catalog search returned");

        Ok(volumes.items.into_iter().map(Book::from).collect())
    }
}
