use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::token::Claims;
use crate::token::TokenCodec;
use crate::token::TokenError;

/// Authentication coordinator combining password verification and token issuance.
///
/// Built once at startup from the signing secret and token lifetime, then
/// shared by every request handler.
#[derive(Clone)]
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
    token_lifetime: Duration,
}

/// Result of successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_at: DateTime<Utc>,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    /// Token type reported alongside issued tokens.
    pub const TOKEN_TYPE: &'static str = "bearer";

    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `secret` - Key used both as password pepper and token signing key
    /// * `token_lifetime` - How long issued tokens stay valid
    pub fn new(secret: &[u8], token_lifetime: Duration) -> Self {
        Self {
            password_hasher: PasswordHasher::new(secret),
            token_codec: TokenCodec::new(secret),
            token_lifetime,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored digest.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Verify credentials and issue a token for `subject`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `TokenError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.verify_password(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issue_token(subject)?)
    }

    /// Issue a token for `subject` without checking a password.
    ///
    /// # Errors
    /// * `TokenError` - Token generation failed
    pub fn issue_token(&self, subject: &str) -> Result<AuthenticationResult, TokenError> {
        let claims = Claims::for_subject(subject, self.token_lifetime);
        let access_token = self.token_codec.encode(&claims)?;
        let expires_at = claims
            .exp
            .and_then(|exp| DateTime::from_timestamp(exp, 0))
            .unwrap_or_else(|| Utc::now() + self.token_lifetime);

        Ok(AuthenticationResult {
            access_token,
            token_type: Self::TOKEN_TYPE,
            expires_at,
        })
    }

    /// Validate and decode a token.
    ///
    /// # Errors
    /// * `TokenError` - Token is malformed, forged or expired
    pub fn validate_token(&self, token: &str) -> Result<Claims, TokenError> {
        self.token_codec.decode(token)
    }
}
