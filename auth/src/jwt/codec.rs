use std::fmt;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::Error as JsonWebTokenError;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;

/// Signed, stateless access token codec.
///
/// Tokens are HS512 (HMAC with SHA-512) JWTs carrying [`Claims`]. The signing
/// secret is held only in this struct and never leaves it: it is not logged,
/// not part of any error and not shown by the `Debug` implementation.
pub struct JwtCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
}

impl JwtCodec {
    /// Minimum secret length for HS512 (512 bits).
    pub const MIN_SECRET_LENGTH: usize = 64;

    /// Create a new codec from a symmetric secret and a token lifetime.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens, at least 64 bytes
    /// * `ttl` - Lifetime of every issued token
    ///
    /// # Returns
    /// JwtCodec instance configured with HS512
    ///
    /// # Errors
    /// * `WeakSecret` - Secret is shorter than [`Self::MIN_SECRET_LENGTH`]
    /// * `InvalidTtl` - Lifetime is zero or negative
    pub fn new(secret: &[u8], ttl: Duration) -> Result<Self, JwtError> {
        if secret.len() < Self::MIN_SECRET_LENGTH {
            return Err(JwtError::WeakSecret {
                min: Self::MIN_SECRET_LENGTH,
                actual: secret.len(),
            });
        }

        if ttl <= Duration::zero() {
            return Err(JwtError::InvalidTtl(ttl.num_milliseconds()));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS512,
            ttl,
        })
    }

    /// Lifetime applied to issued tokens.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `subject`, valid from `now` until `now + ttl`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Expiration overflows or token encoding failed
    pub fn issue(&self, subject: &str, now: DateTime<Utc>) -> Result<String, JwtError> {
        let claims = Claims::for_subject(subject, now, self.ttl)
            .ok_or_else(|| JwtError::EncodingFailed("expiration out of range".to_string()))?;
        self.encode(&claims)
    }

    /// Encode an explicit claim set.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify signature and expiry, then return the claims.
    ///
    /// # Errors
    /// * `TokenExpired` - `now >= exp`
    /// * `InvalidToken` - Signature mismatch, wrong algorithm or malformed structure
    /// * `MissingClaim` - A required claim is absent
    /// * `DecodingFailed` - Payload could not be decoded into claims
    pub fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(map_decode_error)?;

        // The library accepts `now == exp`; the token must be rejected at that second.
        if token_data.claims.is_expired(Utc::now().timestamp()) {
            return Err(JwtError::TokenExpired);
        }

        Ok(token_data.claims)
    }

    /// Verify the token and extract its subject.
    ///
    /// Never fails open: any parse or verification error is returned.
    pub fn verify_and_extract_subject(&self, token: &str) -> Result<String, JwtError> {
        let claims = self.decode(token)?;

        if claims.sub.is_empty() {
            return Err(JwtError::MissingClaim("sub".to_string()));
        }

        Ok(claims.sub)
    }

    /// Whether the embedded expiry has passed.
    ///
    /// # Security Warning
    /// The signature is NOT checked. Call [`Self::decode`] first on any
    /// security-sensitive path. An unreadable token is reported as expired.
    pub fn is_expired(&self, token: &str) -> bool {
        let mut validation = Validation::new(self.algorithm);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        match decode::<Claims>(token, &self.decoding_key, &validation) {
            Ok(token_data) => token_data.claims.is_expired(Utc::now().timestamp()),
            Err(_) => true,
        }
    }
}

impl fmt::Debug for JwtCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtCodec")
            .field("algorithm", &self.algorithm)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

fn map_decode_error(e: JsonWebTokenError) -> JwtError {
    match e.kind() {
        ErrorKind::ExpiredSignature => JwtError::TokenExpired,
        ErrorKind::MissingRequiredClaim(claim) => JwtError::MissingClaim(claim.clone()),
        ErrorKind::Json(_) => JwtError::DecodingFailed(e.to_string()),
        _ => JwtError::InvalidToken(e.to_string()),
    }
}
