use async_trait::async_trait;

use crate::domain::user::models::IssuedToken;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::user::errors::UserError;
use crate::user::models::Username;

/// Port for registration and authentication.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user with a hashed credential.
    ///
    /// # Arguments
    /// * `command` - Validated username and password
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError>;

    /// Check credentials and issue a bearer token.
    ///
    /// # Arguments
    /// * `username` - Raw username as submitted
    /// * `password` - Raw password as submitted
    ///
    /// # Returns
    /// Issued token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Any failure: unknown user, wrong password,
    ///   or an internal error along the way
    async fn login(&self, username: &str, password: &str) -> Result<IssuedToken, UserError>;

    /// Resolve a bearer token to the user it was issued for.
    ///
    /// # Arguments
    /// * `token` - Token as presented by the client
    ///
    /// # Returns
    /// Authenticated user entity
    ///
    /// # Errors
    /// * `InvalidToken` - Any failure: malformed, forged, expired, or the
    ///   subject no longer exists
    async fn identify(&self, token: &str) -> Result<User, UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Arguments
    /// * `user` - Username and password digest
    ///
    /// # Returns
    /// Stored user with its assigned id and creation time
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Uniqueness constraint violated
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: NewUser) -> Result<User, UserError>;

    /// Retrieve user by exact username.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;
}
