use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::TodoResponseData;
use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::ports::TodoServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn get_todo(
    State(state): State<AppState>,
    Extension(current_user): Extension<AuthenticatedUser>,
    Path(todo_id): Path<String>,
) -> Result<ApiSuccess<TodoResponseData>, ApiError> {
    let todo_id = TodoId::from_string(&todo_id).map_err(TodoError::from)?;

    state
        .todo_service
        .get_todo(&current_user.user_id, &todo_id)
        .await
        .map_err(ApiError::from)
        .map(|ref todo| ApiSuccess::new(StatusCode::OK, todo.into()))
}
