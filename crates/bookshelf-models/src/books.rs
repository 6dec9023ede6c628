//! Book entries.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// A book as returned by the catalog and as kept in a user's saved list.
///
/// `book_id` is the catalog's identifier; a user holds at most one entry
/// per `book_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Book {
    #[schema(example = "zyTCAlFPjgYC")]
    pub book_id: String,
    pub authors: Vec<String>,
    pub description: String,
    pub title: String,
    pub image: String,
    pub link: String,
}

/// Book data submitted when saving to the current user's list.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SaveBookRequest {
    #[validate(length(min = 1, message = "book_id is required"))]
    #[schema(example = "zyTCAlFPjgYC")]
    pub book_id: String,
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub link: String,
}

impl From<SaveBookRequest> for Book {
    fn from(dto: SaveBookRequest) -> Self {
        Self {
            book_id: dto.book_id,
            authors: dto.authors,
            description: dto.description,
            title: dto.title,
            image: dto.image,
            link: dto.link,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookSearchParams {
    /// Free-text catalog query.
    #[serde(default)]
    pub q: String,
}
