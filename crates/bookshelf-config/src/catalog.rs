use std::env;

/// Google Books volumes endpoint, the catalog the browser client searched.
pub const DEFAULT_CATALOG_URL: &str = "https://www.googleapis.com/books/v1/volumes";

#[derive(Clone, Debug)]
pub struct CatalogConfig {
    pub base_url: String,
    pub max_results: u8,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CATALOG_URL.to_string(),
            max_results: 20,
        }
    }
}

impl CatalogConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env::var("BOOK_CATALOG_URL").unwrap_or(defaults.base_url),
            // The Google Books API caps maxResults at 40.
            max_results: env::var("BOOK_CATALOG_MAX_RESULTS")
                .ok()
                .and_then(|s| s.parse::<u8>().ok())
                .map(|n| n.clamp(1, 40))
                .unwrap_or(defaults.max_results),
        }
    }
}
