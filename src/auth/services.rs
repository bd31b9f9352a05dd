use std::sync::Arc;

use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    auth::{
        claims::TokenKind,
        dto::{AuthResponse, MessageResponse, PublicUser},
        jwt::JwtKeys,
        mailer::ResetMailer,
        password::{hash_password, verify_dummy, verify_password},
        repo::UserStore,
    },
    error::{AppError, AppResult},
};

pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const INVALID_RESET_TOKEN: &str = "Invalid or expired token";
pub const RESET_REQUESTED: &str = "If an account exists, a reset link will be sent";
pub const RESET_DONE: &str = "Password reset successful";

/// Registration, login, password reset and session verification.
///
/// Holds the signing keys it was built with; nothing here reads process
/// configuration after construction.
pub struct AuthService {
    users: Arc<dyn UserStore>,
    keys: JwtKeys,
    mailer: Arc<dyn ResetMailer>,
    expose_reset_token: bool,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        keys: JwtKeys,
        mailer: Arc<dyn ResetMailer>,
        expose_reset_token: bool,
    ) -> Self {
        Self {
            users,
            keys,
            mailer,
            expose_reset_token,
        }
    }

    /// Callers validate `name`, `email` and `password` first.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> AppResult<AuthResponse> {
        if self.users.find_by_email(email).await?.is_some() {
            warn!(email = %email, "email already registered");
            return Err(AppError::Conflict("Email already registered".into()));
        }

        let hash = hash_password(password)?;
        // A concurrent insert can still lose the unique index race; the store reports it as a conflict.
        let user = self.users.create(name, email, &hash).await?;
        let token = self.keys.sign_session(user.id)?;

        info!(user_id = %user.id, email = %user.email, "user registered");
        Ok(AuthResponse {
            user: user.into(),
            token,
        })
    }

    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthResponse> {
        let Some(user) = self.users.find_by_email(email).await? else {
            verify_dummy(password);
            warn!(email = %email, "login unknown email");
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()));
        };

        if !verify_password(password, &user.password_hash)? {
            warn!(email = %email, user_id = %user.id, "login invalid password");
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()));
        }

        let token = self.keys.sign_session(user.id)?;
        info!(user_id = %user.id, email = %user.email, "user logged in");
        Ok(AuthResponse {
            user: user.into(),
            token,
        })
    }

    /// Always answers with the same message, whether or not the email is known.
    pub async fn request_password_reset(&self, email: &str) -> AppResult<MessageResponse> {
        let Some(user) = self.users.find_by_email(email).await? else {
            info!(email = %email, "password reset for unknown email");
            return Ok(MessageResponse::new(RESET_REQUESTED));
        };

        let token = self.keys.sign_reset(user.id)?;
        self.users.set_reset_token(user.id, &token).await?;
        if let Err(e) = self.mailer.send_reset(&user, &token).await {
            error!(error = %e, user_id = %user.id, "reset mail delivery failed");
        }

        info!(user_id = %user.id, "reset token issued");
        let mut res = MessageResponse::new(RESET_REQUESTED);
        if self.expose_reset_token {
            res.token = Some(token);
        }
        Ok(res)
    }

    pub async fn reset_password(&self, token: &str, password: &str) -> AppResult<MessageResponse> {
        let claims = self.keys.verify_kind(token, TokenKind::Reset).map_err(|e| {
            warn!(error = %e, "reset token rejected");
            AppError::BadRequest(INVALID_RESET_TOKEN.into())
        })?;

        let hash = hash_password(password)?;
        if !self
            .users
            .consume_reset_token(claims.sub, token, &hash)
            .await?
        {
            warn!(user_id = %claims.sub, "reset token not current for user");
            return Err(AppError::BadRequest(INVALID_RESET_TOKEN.into()));
        }

        info!(user_id = %claims.sub, "password reset");
        Ok(MessageResponse::new(RESET_DONE))
    }

    /// Returns the user id carried by a valid session token.
    pub fn verify_session(&self, token: &str) -> AppResult<Uuid> {
        self.keys
            .verify_kind(token, TokenKind::Session)
            .map(|claims| claims.sub)
            .map_err(|e| {
                warn!(error = %e, "invalid or expired token");
                AppError::Unauthorized("Invalid or expired token".into())
            })
    }

    pub async fn current_user(&self, user_id: Uuid) -> AppResult<PublicUser> {
        self.users
            .find_by_id(user_id)
            .await?
            .map(PublicUser::from)
            .ok_or_else(|| {
                warn!(user_id = %user_id, "user not found");
                AppError::NotFound("User not found".into())
            })
    }
}
