use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Keyed password hasher.
///
/// Produces Argon2id digests with a fresh random salt per record. The
/// process-wide secret is mixed into every digest as the Argon2 secret value,
/// so a leaked digest cannot be attacked offline without the key.
#[derive(Clone)]
pub struct PasswordHasher {
    secret: Vec<u8>,
}

impl PasswordHasher {
    /// Create a new password hasher bound to a secret key.
    ///
    /// # Arguments
    /// * `secret` - Process-wide key mixed into every digest
    pub fn new(secret: &[u8]) -> Self {
        Self {
            secret: secret.to_vec(),
        }
    }

    fn argon2(&self) -> Result<Argon2<'_>, PasswordError> {
        Argon2::new_with_secret(
            &self.secret,
            Algorithm::Argon2id,
            Version::V0x13,
            Params::default(),
        )
        .map_err(|e| PasswordError::InvalidSecret(e.to_string()))
    }

    /// Hash a plaintext password.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format digest (algorithm, parameters, salt and tag)
    ///
    /// # Errors
    /// * `InvalidSecret` - Secret key is not usable by Argon2
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()?
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored digest.
    ///
    /// Total over its inputs: a digest that does not parse, or that was
    /// produced under a different secret, is a mismatch. The tag comparison
    /// runs in constant time.
    pub fn verify(&self, password: &str, digest: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(digest) else {
            return false;
        };
        let Ok(argon2) = self.argon2() else {
            return false;
        };

        argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new(SECRET);
        let password = "my_secure_password";

        let hash = hasher.hash(password).expect("Failed to hash password");

        assert!(hasher.verify(password, &hash));
        assert!(!hasher.verify("wrong_password", &hash));
    }

    #[test]
    fn test_digest_is_not_plaintext() {
        let hasher = PasswordHasher::new(SECRET);

        let hash = hasher.hash("secret1").expect("Failed to hash password");

        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("secret1"));
    }

    #[test]
    fn test_salt_is_per_record() {
        let hasher = PasswordHasher::new(SECRET);

        let first = hasher.hash("secret1").expect("Failed to hash password");
        let second = hasher.hash("secret1").expect("Failed to hash password");

        assert_ne!(first, second);
        assert!(hasher.verify("secret1", &first));
        assert!(hasher.verify("secret1", &second));
    }

    #[test]
    fn test_verify_with_different_secret() {
        let hasher = PasswordHasher::new(SECRET);
        let other = PasswordHasher::new(b"another_secret_key_of_some_length!");

        let hash = hasher.hash("secret1").expect("Failed to hash password");

        assert!(!other.verify("secret1", &hash));
    }

    #[test]
    fn test_verify_malformed_digest() {
        let hasher = PasswordHasher::new(SECRET);

        assert!(!hasher.verify("password", "invalid_hash"));
        assert!(!hasher.verify("password", ""));
    }
}
