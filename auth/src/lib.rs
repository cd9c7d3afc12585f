//! Authentication utilities library
//!
//! Provides the reusable authentication primitives behind the inventory service:
//! - Password hashing (Argon2id)
//! - Signed, stateless access tokens (HS512 JWT)
//! - Authentication coordination (verify credentials, then issue a token)
//!
//! The library knows nothing about HTTP or storage. Services look up their own
//! credential records and adapt these implementations behind their own ports.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Tokens
//! ```
//! use auth::JwtCodec;
//! use chrono::{Duration, Utc};
//!
//! let secret = [7u8; 64];
//! let codec = JwtCodec::new(&secret, Duration::hours(1)).unwrap();
//! let token = codec.issue("alice", Utc::now()).unwrap();
//! assert_eq!(codec.verify_and_extract_subject(&token).unwrap(), "alice");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//! use chrono::{Duration, Utc};
//!
//! let secret = [7u8; 64];
//! let auth = Authenticator::new(&secret, Duration::hours(24)).unwrap();
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! let result = auth.authenticate("password123", &hash, "alice", Utc::now()).unwrap();
//!
//! // Later requests: verify token, recover the username
//! let username = auth.verify_token(&result.access_token).unwrap();
//! assert_eq!(username, "alice");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtCodec;
pub use jwt::JwtError;
pub use password::PasswordError;
pub use password::PasswordHasher;
