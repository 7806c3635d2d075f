use axum::extract::rejection::FormRejection;
use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::QueryRejection;
use axum::http::header;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::Todo;
use crate::user::errors::UserError;

pub mod create_todo;
pub mod delete_todo;
pub mod get_todo;
pub mod health;
pub mod list_todos;
pub mod login;
pub mod register;
pub mod update_todo;

/// Successful response: a status and the bare resource as the JSON body.
#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize>(StatusCode, Json<T>);

impl<T: Serialize> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        if self.0 == StatusCode::NO_CONTENT {
            return self.0.into_response();
        }
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    Unauthorized(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::Unauthorized(detail) => {
                return (
                    StatusCode::UNAUTHORIZED,
                    [(header::WWW_AUTHENTICATE, "Bearer")],
                    Json(ApiErrorBody { detail }),
                )
                    .into_response();
            }
            ApiError::InternalServerError(detail) => (StatusCode::INTERNAL_SERVER_ERROR, detail),
            ApiError::UnprocessableEntity(detail) => (StatusCode::UNPROCESSABLE_ENTITY, detail),
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, detail),
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, detail),
        };

        (status, Json(ApiErrorBody { detail })).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::UsernameAlreadyExists(_) => {
                ApiError::BadRequest("Username already registered".to_string())
            }
            UserError::InvalidCredentials | UserError::InvalidToken => {
                ApiError::Unauthorized(err.to_string())
            }
            UserError::InvalidUsername(_) | UserError::InvalidPassword(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            UserError::DatabaseError(_) | UserError::Unknown(_) => {
                tracing::error!(error = %err, "User operation failed");
                ApiError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

impl From<TodoError> for ApiError {
    fn from(err: TodoError) -> Self {
        match err {
            TodoError::NotFound(_) => ApiError::NotFound("Todo not found".to_string()),
            TodoError::TitleAlreadyExists(_) => {
                ApiError::BadRequest("Todo with this title already exists".to_string())
            }
            TodoError::InvalidTodoId(_)
            | TodoError::InvalidTitle(_)
            | TodoError::InvalidDescription(_) => ApiError::UnprocessableEntity(err.to_string()),
            TodoError::DatabaseError(_) => {
                tracing::error!(error = %err, "Todo operation failed");
                ApiError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

// Extractor rejections reuse the `detail` body instead of axum's plain text.

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::UnprocessableEntity(rejection.body_text())
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        ApiError::UnprocessableEntity(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::UnprocessableEntity(rejection.body_text())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    pub detail: String,
}

/// Todo as returned by every todo endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodoResponseData {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
}

impl From<&Todo> for TodoResponseData {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id.0,
            title: todo.title.as_str().to_string(),
            description: todo.description.as_ref().map(|d| d.as_str().to_string()),
            completed: todo.completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::errors::UsernameError;

    #[test]
    fn test_credential_failures_map_to_unauthorized() {
        assert!(matches!(
            ApiError::from(UserError::InvalidCredentials),
            ApiError::Unauthorized(_)
        ));
        assert!(matches!(
            ApiError::from(UserError::InvalidToken),
            ApiError::Unauthorized(_)
        ));
    }

    #[test]
    fn test_validation_maps_to_unprocessable() {
        let err = UserError::from(UsernameError::TooShort { min: 3, actual: 1 });

        assert!(matches!(
            ApiError::from(err),
            ApiError::UnprocessableEntity(_)
        ));
    }

    #[test]
    fn test_database_detail_is_not_exposed() {
        let err = ApiError::from(TodoError::DatabaseError("relation todos missing".to_string()));

        assert_eq!(
            err,
            ApiError::InternalServerError("Internal server error".to_string())
        );
    }

    #[test]
    fn test_duplicates_map_to_bad_request() {
        assert_eq!(
            ApiError::from(UserError::UsernameAlreadyExists("alice".to_string())),
            ApiError::BadRequest("Username already registered".to_string())
        );
        assert_eq!(
            ApiError::from(TodoError::TitleAlreadyExists("Buy milk".to_string())),
            ApiError::BadRequest("Todo with this title already exists".to_string())
        );
    }

    #[tokio::test]
    async fn test_error_body_carries_detail() {
        let response = ApiError::NotFound("Todo not found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({ "detail": "Todo not found" }));
    }

    #[test]
    fn test_unauthorized_response_has_challenge() {
        let response = ApiError::Unauthorized("Invalid or expired token".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }
}
