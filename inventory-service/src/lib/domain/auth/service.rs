use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::LoginResult;
use crate::domain::auth::models::ResolvedIdentity;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::user::models::Username;
use crate::user::ports::UserRepository;

const BEARER_PREFIX: &str = "Bearer ";

/// Strip the literal, case-sensitive `"Bearer "` prefix if present.
pub fn bearer_token(header_value: &str) -> &str {
    header_value
        .strip_prefix(BEARER_PREFIX)
        .unwrap_or(header_value)
}

/// Login use case and identity resolver over the credential store.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    users: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    pub fn new(users: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            users,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn login(&self, command: LoginCommand) -> Result<LoginResult, AuthError> {
        let user = match Username::new(command.username) {
            Ok(username) => self.users.find_by_username(&username).await?,
            Err(_) => None,
        };

        let Some(user) = user else {
            tracing::warn!("Login rejected: unknown account");
            return Err(map_authentication_error(
                self.authenticator.reject_unknown_account(&command.password),
            ));
        };

        let result = self
            .authenticator
            .authenticate(
                &command.password,
                &user.password_hash,
                user.username.as_str(),
                Utc::now(),
            )
            .map_err(|e| {
                if matches!(e, AuthenticationError::InvalidCredentials) {
                    tracing::warn!(username = %user.username, "Login rejected: wrong password");
                }
                map_authentication_error(e)
            })?;

        tracing::info!(user_id = %user.id, username = %user.username, "User logged in");

        Ok(LoginResult {
            token: result.access_token,
            token_type: LoginResult::TOKEN_TYPE,
            expires_in_ms: result.expires_in_ms,
            username: user.username.as_str().to_string(),
        })
    }

    fn validate_token(&self, header_value: &str) -> bool {
        self.authenticator.is_token_valid(bearer_token(header_value))
    }

    async fn resolve_identity(&self, header_value: &str) -> Result<ResolvedIdentity, AuthError> {
        let subject = self
            .authenticator
            .verify_token(bearer_token(header_value))
            .map_err(|e| AuthError::Unauthorized(e.to_string()))?;

        let username = Username::new(subject)
            .map_err(|e| AuthError::Unauthorized(format!("Token subject rejected: {}", e)))?;

        let user = self
            .users
            .find_by_username(&username)
            .await?
            .ok_or_else(|| {
                AuthError::Unauthorized(format!("Token subject no longer exists: {}", username))
            })?;

        Ok(ResolvedIdentity {
            user_id: user.id,
            username: user.username,
        })
    }
}

fn map_authentication_error(err: AuthenticationError) -> AuthError {
    match err {
        AuthenticationError::InvalidCredentials => AuthError::InvalidCredentials,
        AuthenticationError::PasswordError(e) => {
            AuthError::Internal(format!("Password verification failed: {}", e))
        }
        AuthenticationError::JwtError(e) => {
            AuthError::Internal(format!("Token generation failed: {}", e))
        }
    }
}
