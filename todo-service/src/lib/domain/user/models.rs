use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::user::errors::PasswordError;
use crate::user::errors::UsernameError;

/// User aggregate entity.
///
/// Created on registration and never modified afterwards.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// User identifier, assigned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// 3-50 characters. Comparison is exact: `Alice` and `alice` are two users.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 50;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `TooShort` - Username shorter than 3 characters
    /// * `TooLong` - Username longer than 50 characters
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let length = username.chars().count();
        if length < Self::MIN_LENGTH {
            Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(username))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password, alive only for the duration of a register call.
///
/// 6-128 characters. `Debug` never prints the value.
#[derive(Clone)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 6;
    const MAX_LENGTH: usize = 128;

    /// # Errors
    /// * `TooShort` - Password shorter than 6 characters
    /// * `TooLong` - Password longer than 128 characters
    pub fn new(password: String) -> Result<Self, PasswordError> {
        let length = password.chars().count();
        if length < Self::MIN_LENGTH {
            Err(PasswordError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(PasswordError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(password))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Command to register a new user with domain types
#[derive(Debug)]
pub struct RegisterUserCommand {
    pub username: Username,
    pub password: Password,
}

impl RegisterUserCommand {
    pub fn new(username: Username, password: Password) -> Self {
        Self { username, password }
    }
}

/// User row to be inserted; the store assigns id and creation time.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Username,
    pub password_hash: String,
}

/// Bearer token handed out by a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub access_token: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_length_bounds() {
        assert_eq!(
            Username::new("ab".to_string()),
            Err(UsernameError::TooShort { min: 3, actual: 2 })
        );
        assert!(Username::new("abc".to_string()).is_ok());
        assert!(Username::new("a".repeat(50)).is_ok());
        assert_eq!(
            Username::new("a".repeat(51)),
            Err(UsernameError::TooLong { max: 50, actual: 51 })
        );
    }

    #[test]
    fn test_username_counts_characters() {
        // three characters, six bytes
        assert!(Username::new("äöü".to_string()).is_ok());
    }

    #[test]
    fn test_password_length_bounds() {
        assert!(matches!(
            Password::new("12345".to_string()),
            Err(PasswordError::TooShort { min: 6, actual: 5 })
        ));
        assert!(Password::new("123456".to_string()).is_ok());
        assert!(Password::new("x".repeat(128)).is_ok());
        assert!(matches!(
            Password::new("x".repeat(129)),
            Err(PasswordError::TooLong { max: 128, actual: 129 })
        ));
    }

    #[test]
    fn test_password_debug_is_redacted() {
        let password = Password::new("secret1".to_string()).unwrap();

        assert!(!format!("{:?}", password).contains("secret1"));
    }
}
