use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::TodoResponseData;
use crate::domain::todo::models::Pagination;
use crate::domain::todo::ports::TodoServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn list_todos(
    State(state): State<AppState>,
    Extension(current_user): Extension<AuthenticatedUser>,
    params: Result<Query<ListTodosParams>, QueryRejection>,
) -> Result<ApiSuccess<Vec<TodoResponseData>>, ApiError> {
    let Query(params) = params?;
    let pagination = Pagination::new(params.skip, params.limit);

    state
        .todo_service
        .list_todos(&current_user.user_id, pagination)
        .await
        .map_err(ApiError::from)
        .map(|todos| {
            let data: Vec<TodoResponseData> = todos.iter().map(TodoResponseData::from).collect();
            ApiSuccess::new(StatusCode::OK, data)
        })
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListTodosParams {
    skip: Option<u32>,
    limit: Option<u32>,
}
