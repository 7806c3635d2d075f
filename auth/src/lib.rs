//! Authentication primitives for the to-do service.
//!
//! - Password hashing (Argon2id, peppered with the process secret)
//! - Compact HMAC-SHA256 signed bearer tokens
//! - Authentication coordination
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new(b"secret_key_at_least_32_bytes_long!");
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{Claims, TokenCodec};
//! use chrono::Duration;
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!");
//! let claims = Claims::for_subject("alice", Duration::minutes(30));
//! let token = codec.encode(&claims).unwrap();
//! let (decoded, valid) = codec.decode_and_verify(&token);
//! assert!(valid);
//! assert_eq!(decoded.sub.as_deref(), Some("alice"));
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", Duration::minutes(30));
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let result = auth.authenticate("password123", &hash, "alice").unwrap();
//!
//! // Later requests: validate token
//! let claims = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(claims.sub.as_deref(), Some("alice"));
//! ```

pub mod authenticator;
pub mod password;
pub mod secret;
pub mod token;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use secret::random_secret;
pub use token::Claims;
pub use token::TokenCodec;
pub use token::TokenError;
