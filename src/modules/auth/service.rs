use bookshelf_auth::{AuthFailure, sign_token};
use bookshelf_config::JwtConfig;
use bookshelf_core::{AppError, hash_password, verify_password};
use bookshelf_db::UserRepository;
use bookshelf_models::{AuthResponse, CreateAccountRequest, LoginRequest, NewUser};
use bookshelf_observability::{
    track_account_created, track_login_failure, track_login_success, track_token_issued,
};
use tracing::{info, instrument};

pub struct AuthService;

impl AuthService {
    /// Stores a new account and issues its first credential.
    #[instrument(skip(users, dto, jwt_config), fields(username = %dto.username))]
    pub async fn create_account(
        users: &dyn UserRepository,
        dto: CreateAccountRequest,
        jwt_config: &JwtConfig,
    ) -> Result<AuthResponse, AppError> {
        let password_hash = hash_password(&dto.password)?;

        let user = users
            .create_user(NewUser {
                username: dto.username,
                email: dto.email,
                password_hash,
            })
            .await?;
        track_account_created();
        info!(user_id = %user.id, "Account created");

        let token = sign_token(&user.identity(), jwt_config)?;
        track_token_issued();

        Ok(AuthResponse { token, user })
    }

    /// Checks email and password and issues a credential.
    ///
    /// Unknown email and wrong password fail the same way.
    #[instrument(skip(users, dto, jwt_config))]
    pub async fn login(
        users: &dyn UserRepository,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<AuthResponse, AppError> {
        let Some(credentials) = users.find_credentials_by_email(&dto.email).await? else {
            track_login_failure("unknown_email");
            return Err(AuthFailure::CredentialRejected.into());
        };

        if !verify_password(&dto.password, &credentials.password_hash)? {
            track_login_failure("wrong_password");
            return Err(AuthFailure::CredentialRejected.into());
        }

        let token = sign_token(&credentials.identity(), jwt_config)?;
        track_token_issued();

        let user = users
            .find_by_id(credentials.id)
            .await?
            .ok_or_else(|| AppError::internal_error("User vanished during login".to_string()))?;
        track_login_success();
        info!(user_id = %user.id, "User logged in");

        Ok(AuthResponse { token, user })
    }
}
