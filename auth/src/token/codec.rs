use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use hmac::Hmac;
use hmac::Mac;
use serde::Serialize;
use sha2::Sha256;

use super::claims::Claims;
use super::errors::TokenError;

type HmacSha256 = Hmac<Sha256>;

#[derive(Serialize)]
struct Header {
    alg: &'static str,
    typ: &'static str,
}

/// The only header this codec ever emits. Verification never reads it back.
const HEADER: Header = Header {
    alg: "HS256",
    typ: "JWT",
};

/// Compact signed token codec.
///
/// Tokens are `<header>.<payload>.<signature>`, each segment base64url
/// without padding, signed with HMAC-SHA256. The algorithm is fixed on the
/// server side: whatever `alg` a presented token declares is ignored.
#[derive(Clone)]
pub struct TokenCodec {
    key: Vec<u8>,
}

impl TokenCodec {
    /// Create a codec signing with `secret`.
    ///
    /// # Security Notes
    /// - Use at least 32 bytes of key material
    /// - Every instance sharing a token namespace must use the same key
    pub fn new(secret: &[u8]) -> Self {
        Self {
            key: secret.to_vec(),
        }
    }

    fn mac(&self) -> Result<HmacSha256, TokenError> {
        <HmacSha256 as Mac>::new_from_slice(&self.key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    fn sign(&self, signing_input: &str) -> Result<String, TokenError> {
        let mut mac = self.mac()?;
        mac.update(signing_input.as_bytes());
        Ok(URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes()))
    }

    /// Encode claims into a signed token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims could not be serialized
    pub fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        let header = serde_json::to_vec(&HEADER)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))?;
        let payload =
            serde_json::to_vec(claims).map_err(|e| TokenError::EncodingFailed(e.to_string()))?;

        let signing_input = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(header),
            URL_SAFE_NO_PAD.encode(payload)
        );
        let signature = self.sign(&signing_input)?;

        Ok(format!("{}.{}", signing_input, signature))
    }

    /// Decode and verify a token against the current wall clock.
    ///
    /// # Errors
    /// * `Malformed` - Wrong segment count, bad base64 or bad JSON payload
    /// * `InvalidSignature` - Signature does not match the key
    /// * `MissingClaim` - No `exp` claim
    /// * `Expired` - Current time is past `exp`
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        self.decode_at(token, Utc::now().timestamp())
    }

    /// Decode and verify a token, evaluating expiry at `now` (Unix seconds).
    pub fn decode_at(&self, token: &str, now: i64) -> Result<Claims, TokenError> {
        let mut segments = token.split('.');
        let (Some(header), Some(payload), Some(signature), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(TokenError::Malformed(
                "expected exactly three segments".to_string(),
            ));
        };

        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| TokenError::InvalidSignature)?;

        let mut mac = self.mac().map_err(|_| TokenError::InvalidSignature)?;
        mac.update(header.as_bytes());
        mac.update(b".");
        mac.update(payload.as_bytes());
        // constant-time
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::InvalidSignature)?;

        let payload = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|e| TokenError::Malformed(format!("payload is not base64url: {}", e)))?;
        let claims: Claims = serde_json::from_slice(&payload)
            .map_err(|e| TokenError::Malformed(format!("payload is not valid claims: {}", e)))?;

        if claims.exp.is_none() {
            return Err(TokenError::MissingClaim("exp".to_string()));
        }
        if claims.is_expired(now) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    /// Boolean verification contract.
    ///
    /// Returns the claims and `true` for a valid token, or empty claims and
    /// `false` for anything else. Never panics on hostile input.
    pub fn decode_and_verify(&self, token: &str) -> (Claims, bool) {
        match self.decode(token) {
            Ok(claims) => (claims, true),
            Err(_) => (Claims::default(), false),
        }
    }
}
