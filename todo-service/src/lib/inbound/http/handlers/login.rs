use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Form;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

/// OAuth2 password-style login: form-encoded `username` and `password`.
pub async fn login(
    State(state): State<AppState>,
    body: Result<Form<LoginRequestBody>, FormRejection>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let Form(body) = body?;
    let token = state
        .auth_service
        .login(&body.username, &body.password)
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            access_token: token.access_token,
            token_type: token.token_type,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub access_token: String,
    pub token_type: String,
}
