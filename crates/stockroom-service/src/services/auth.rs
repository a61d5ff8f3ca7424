//! Authentication service
//!
//! Registration and login. The issued access token carries the user's
//! role; the API layer turns its claims into an [`super::Actor`] without a
//! database read.

use tracing::{info, instrument};

use stockroom_common::auth::validate_password_strength;
use stockroom_common::AppError;
use stockroom_core::entities::User;
use stockroom_core::value_objects::Role;

use crate::dto::{AuthResponse, CurrentUserResponse, LoginRequest, RegisterRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new account
    ///
    /// The very first account becomes Admin so a fresh deployment can be
    /// administered; everyone after that starts as Staff.
    #[instrument(skip(self, request))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        validate_password_strength(&request.password)?;

        if self.ctx.user_repo().email_exists(&request.email).await? {
            return Err(ServiceError::conflict("Email already in use"));
        }

        let role = if self.ctx.user_repo().count().await? == 0 {
            Role::Admin
        } else {
            Role::Staff
        };

        let user = User::new(
            self.ctx.generate_id(),
            request.username,
            request.email,
            role,
        );
        let password_hash = self.ctx.password_service().hash(&request.password)?;

        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user.id, role = %user.role, "User registered");

        self.token_response(&user)
    }

    /// Log in with email and password
    #[instrument(skip(self, request))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_email(&request.email)
            .await?
            .ok_or(ServiceError::App(AppError::InvalidCredentials))?;

        let hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or(ServiceError::App(AppError::InvalidCredentials))?;

        self.ctx
            .password_service()
            .verify_or_error(&request.password, &hash)?;

        info!(user_id = %user.id, "User logged in");

        self.token_response(&user)
    }

    /// Exchange a refresh token for a fresh token pair
    ///
    /// The user's current role is re-read so a role change takes effect at
    /// the next refresh rather than at token expiry.
    #[instrument(skip(self, refresh_token))]
    pub async fn refresh(&self, refresh_token: &str) -> ServiceResult<AuthResponse> {
        let claims = self.ctx.jwt_service().validate_refresh_token(refresh_token)?;
        let user_id = claims.user_id()?;

        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(ServiceError::App(AppError::InvalidToken))?;

        self.token_response(&user)
    }

    fn token_response(&self, user: &User) -> ServiceResult<AuthResponse> {
        let pair = self.ctx.jwt_service().generate_token_pair(user.id, user.role)?;

        Ok(AuthResponse {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: pair.token_type,
            expires_in: pair.expires_in,
            user: CurrentUserResponse::from(user),
        })
    }
}
