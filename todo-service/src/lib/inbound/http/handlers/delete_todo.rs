use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::ports::TodoServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn delete_todo(
    State(state): State<AppState>,
    Extension(current_user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<()>, ApiError> {
    let todo_id = TodoId::from_string(&id).map_err(TodoError::from)?;

    state
        .todo_service
        .delete_todo(&current_user.user_id, &todo_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::NO_CONTENT, ()))
}
