use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::jwt::JwtCodec;
use crate::jwt::JwtError;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token issuance.
///
/// Holds the only copy of the signing key (inside its [`JwtCodec`]); it is
/// built once at startup and shared read-only afterwards.
#[derive(Debug)]
pub struct Authenticator {
    password_hasher: PasswordHasher,
    codec: JwtCodec,
}

/// Result of successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    /// Signed access token
    pub access_token: String,

    /// Token lifetime in milliseconds
    pub expires_in_ms: i64,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing (at least 64 bytes)
    /// * `token_ttl` - Lifetime of issued tokens
    ///
    /// # Errors
    /// * `WeakSecret` - Secret too short for HS512
    /// * `InvalidTtl` - Lifetime is zero or negative
    pub fn new(jwt_secret: &[u8], token_ttl: Duration) -> Result<Self, JwtError> {
        Ok(Self {
            password_hasher: PasswordHasher::new(),
            codec: JwtCodec::new(jwt_secret, token_ttl)?,
        })
    }

    /// Lifetime of issued tokens in milliseconds.
    pub fn token_ttl_ms(&self) -> i64 {
        self.codec.ttl().num_milliseconds()
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a password against its stored hash and, on success, issue a token
    /// for `subject` valid from `now`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is unreadable
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
        now: DateTime<Utc>,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.codec.issue(subject, now)?;

        Ok(AuthenticationResult {
            access_token,
            expires_in_ms: self.token_ttl_ms(),
        })
    }

    /// Spend the same effort as a failed [`Self::authenticate`] for an unknown account.
    pub fn reject_unknown_account(&self, password: &str) -> AuthenticationError {
        self.password_hasher.verify_dummy(password);
        AuthenticationError::InvalidCredentials
    }

    /// Issue a token without password verification.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_token(&self, subject: &str, now: DateTime<Utc>) -> Result<String, JwtError> {
        self.codec.issue(subject, now)
    }

    /// Verify a token and return the username it was issued for.
    ///
    /// # Errors
    /// * `JwtError` - Token validation or decoding failed
    pub fn verify_token(&self, token: &str) -> Result<String, JwtError> {
        self.codec.verify_and_extract_subject(token)
    }

    /// Non-failing validity probe: signature verifies and the token is unexpired.
    pub fn is_token_valid(&self, token: &str) -> bool {
        self.codec.decode(token).is_ok()
    }

    /// Whether the embedded expiry has passed, without signature verification.
    pub fn is_token_expired(&self, token: &str) -> bool {
        self.codec.is_expired(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_that_is_at_least_sixty_four_bytes_long_for_hs512!!";

    fn authenticator() -> Authenticator {
        Authenticator::new(SECRET, Duration::milliseconds(3_600_000))
            .expect("Failed to build authenticator")
    }

    #[test]
    fn test_authenticate_success() {
        let authenticator = authenticator();

        let password = "my_password";
        let hash = authenticator
            .hash_password(password)
            .expect("Failed to hash password");

        let result = authenticator
            .authenticate(password, &hash, "alice", Utc::now())
            .expect("Authentication failed");

        assert!(!result.access_token.is_empty());
        assert_eq!(result.expires_in_ms, 3_600_000);

        let subject = authenticator
            .verify_token(&result.access_token)
            .expect("Token validation failed");
        assert_eq!(subject, "alice");
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = authenticator();

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        let result = authenticator.authenticate("wrong_password", &hash, "alice", Utc::now());
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_authenticate_malformed_hash() {
        let authenticator = authenticator();

        let result = authenticator.authenticate("my_password", "not-a-phc", "alice", Utc::now());
        assert!(matches!(
            result,
            Err(AuthenticationError::PasswordError(_))
        ));
    }

    #[test]
    fn test_reject_unknown_account() {
        let authenticator = authenticator();

        assert!(matches!(
            authenticator.reject_unknown_account("whatever"),
            AuthenticationError::InvalidCredentials
        ));
    }

    #[test]
    fn test_token_validity_probe() {
        let authenticator = authenticator();

        let fresh = authenticator
            .issue_token("alice", Utc::now())
            .expect("Failed to issue token");
        let stale = authenticator
            .issue_token("alice", Utc::now() - Duration::hours(2))
            .expect("Failed to issue token");

        assert!(authenticator.is_token_valid(&fresh));
        assert!(!authenticator.is_token_valid(&stale));
        assert!(!authenticator.is_token_valid("invalid.token.here"));

        assert!(!authenticator.is_token_expired(&fresh));
        assert!(authenticator.is_token_expired(&stale));
    }

    #[test]
    fn test_rejects_weak_secret() {
        let result = Authenticator::new(b"short", Duration::hours(1));
        assert!(matches!(result, Err(JwtError::WeakSecret { .. })));
    }

    #[test]
    fn test_rejects_non_positive_ttl() {
        let result = Authenticator::new(SECRET, Duration::milliseconds(-1000));
        assert_eq!(result.unwrap_err(), JwtError::InvalidTtl(-1000));
    }
}
