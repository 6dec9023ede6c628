use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use bookshelf_auth::IdentityClaim;
use bookshelf_models::{AuthResponse, Book, CreateAccountRequest, LoginRequest, SaveBookRequest, User};

use crate::modules::auth::controller::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::create_account,
        crate::modules::auth::controller::login,
        crate::modules::users::controller::get_me,
        crate::modules::users::controller::save_book,
        crate::modules::users::controller::remove_book,
        crate::modules::books::controller::search_books,
    ),
    components(
        schemas(
            User,
            Book,
            IdentityClaim,
            CreateAccountRequest,
            LoginRequest,
            AuthResponse,
            SaveBookRequest,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Account creation and login"),
        (name = "Users", description = "The authenticated user and their saved books"),
        (name = "Books", description = "Book catalog search")
    ),
    info(
        title = "Bookshelf API",
        version = "0.1.0",
        description = "Search the book catalog and keep a personal list of saved books. Authenticated with HS256 JWTs.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
