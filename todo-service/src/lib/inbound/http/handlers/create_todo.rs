use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::TodoResponseData;
use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::CreateTodoCommand;
use crate::domain::todo::models::TodoDescription;
use crate::domain::todo::models::TodoTitle;
use crate::domain::todo::ports::TodoServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn create_todo(
    State(state): State<AppState>,
    Extension(current_user): Extension<AuthenticatedUser>,
    body: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> Result<ApiSuccess<TodoResponseData>, ApiError> {
    let Json(body) = body?;

    state
        .todo_service
        .create_todo(&current_user.user_id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref todo| ApiSuccess::new(StatusCode::CREATED, todo.into()))
}

/// HTTP request body for creating a todo (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateTodoRequest {
    title: String,
    #[serde(default)]
    description: Option<String>,
}

impl CreateTodoRequest {
    fn try_into_command(self) -> Result<CreateTodoCommand, TodoError> {
        let title = TodoTitle::new(self.title)?;
        let description = self.description.map(TodoDescription::new).transpose()?;
        Ok(CreateTodoCommand { title, description })
    }
}
