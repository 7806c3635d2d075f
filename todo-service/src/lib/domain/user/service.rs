use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;

use crate::domain::user::models::IssuedToken;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;
use crate::user::ports::AuthServicePort;
use crate::user::ports::UserRepository;

/// Domain service implementation for registration and authentication.
///
/// Stateless apart from the injected repository and authenticator: every
/// `identify` re-verifies the token and re-reads the user.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
    // Verified against when the username is unknown, so both login failures
    // cost one Argon2 run.
    dummy_hash: String,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token handling
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        let dummy_hash = authenticator
            .hash_password("timing-equalization-placeholder")
            .unwrap_or_default();

        Self {
            repository,
            authenticator,
            dummy_hash,
        }
    }

    async fn find_for_login(&self, username: &str) -> Option<User> {
        let username = Username::new(username.to_string()).ok()?;

        match self.repository.find_by_username(&username).await {
            Ok(user) => user,
            Err(e) => {
                tracing::error!(error = %e, "User lookup failed during login");
                None
            }
        }
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        if self
            .repository
            .find_by_username(&command.username)
            .await?
            .is_some()
        {
            return Err(UserError::UsernameAlreadyExists(
                command.username.to_string(),
            ));
        }

        let password_hash = self
            .authenticator
            .hash_password(command.password.as_str())
            .map_err(|e| UserError::Unknown(format!("Password hashing failed: {}", e)))?;

        // A concurrent registration can still win the race; the repository
        // reports the constraint violation as UsernameAlreadyExists.
        let user = self
            .repository
            .create(NewUser {
                username: command.username,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");

        Ok(user)
    }

    async fn login(&self, username: &str, password: &str) -> Result<IssuedToken, UserError> {
        let Some(user) = self.find_for_login(username).await else {
            self.authenticator
                .verify_password(password, &self.dummy_hash);
            return Err(UserError::InvalidCredentials);
        };

        let result = self
            .authenticator
            .authenticate(password, &user.password_hash, user.username.as_str())
            .map_err(|e| {
                if !matches!(e, AuthenticationError::InvalidCredentials) {
                    tracing::error!(error = %e, user_id = %user.id, "Token issuance failed");
                }
                UserError::InvalidCredentials
            })?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(IssuedToken {
            access_token: result.access_token,
            token_type: result.token_type.to_string(),
            expires_at: result.expires_at,
        })
    }

    async fn identify(&self, token: &str) -> Result<User, UserError> {
        let claims = self.authenticator.validate_token(token).map_err(|e| {
            tracing::debug!(reason = %e, "Token rejected");
            UserError::InvalidToken
        })?;

        let username = claims
            .sub
            .and_then(|sub| Username::new(sub).ok())
            .ok_or_else(|| {
                tracing::debug!("Token has no usable subject");
                UserError::InvalidToken
            })?;

        match self.repository.find_by_username(&username).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => {
                tracing::debug!(username = %username, "Token subject no longer exists");
                Err(UserError::InvalidToken)
            }
            Err(e) => {
                tracing::error!(error = %e, "User lookup failed during token check");
                Err(UserError::InvalidToken)
            }
        }
    }
}
