use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::LoginResult;
use crate::domain::auth::models::ResolvedIdentity;

/// Login and request authorization.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Check credentials and mint a token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown user or wrong password, indistinguishably
    /// * `Internal` - Stored hash unreadable, token signing or storage failure
    async fn login(&self, command: LoginCommand) -> Result<LoginResult, AuthError>;

    /// Whether an `Authorization` header value carries a valid, unexpired token.
    /// Never fails.
    fn validate_token(&self, header_value: &str) -> bool;

    /// Turn an `Authorization` header value into the identity of a live user.
    ///
    /// # Errors
    /// * `Unauthorized` - Bad or expired token, or the subject no longer exists
    /// * `Internal` - Storage failure
    async fn resolve_identity(&self, header_value: &str) -> Result<ResolvedIdentity, AuthError>;
}
