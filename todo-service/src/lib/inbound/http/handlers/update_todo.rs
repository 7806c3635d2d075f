use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde::Deserializer;

use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::TodoDescription;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::models::TodoTitle;
use crate::domain::todo::models::UpdateTodoCommand;
use crate::domain::todo::ports::TodoServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::TodoResponseData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// HTTP request body for updating a todo (raw JSON)
///
/// Only the fields present in the body are applied. An explicit
/// `"description": null` clears the description.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTodoRequest {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    pub completed: Option<bool>,
}

/// Wraps whatever the field holds, `null` included, so that only an absent
/// field falls back to the `None` default.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl UpdateTodoRequest {
    fn try_into_command(self) -> Result<UpdateTodoCommand, TodoError> {
        let title = self.title.map(TodoTitle::new).transpose()?;
        let description = self
            .description
            .map(|description| description.map(TodoDescription::new).transpose())
            .transpose()?;

        Ok(UpdateTodoCommand {
            title,
            description,
            completed: self.completed,
        })
    }
}

pub async fn update_todo(
    State(state): State<AppState>,
    Extension(current_user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    body: Result<Json<UpdateTodoRequest>, JsonRejection>,
) -> Result<ApiSuccess<TodoResponseData>, ApiError> {
    let Json(req) = body?;
    let todo_id = TodoId::from_string(&id).map_err(TodoError::from)?;
    let command = req.try_into_command()?;

    state
        .todo_service
        .update_todo(&current_user.user_id, &todo_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref todo| ApiSuccess::new(StatusCode::OK, todo.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> UpdateTodoCommand {
        serde_json::from_str::<UpdateTodoRequest>(body)
            .unwrap()
            .try_into_command()
            .unwrap()
    }

    #[test]
    fn test_absent_description_is_left_alone() {
        let command = parse(r#"{"completed": true}"#);

        assert!(command.description.is_none());
        assert_eq!(command.completed, Some(true));
    }

    #[test]
    fn test_null_description_clears_it() {
        let command = parse(r#"{"description": null}"#);

        assert_eq!(command.description, Some(None));
    }

    #[test]
    fn test_description_is_replaced() {
        let command = parse(r#"{"description": "One litre"}"#);

        assert_eq!(
            command.description,
            Some(Some(TodoDescription::new("One litre".to_string()).unwrap()))
        );
    }

    #[test]
    fn test_description_is_validated() {
        let body = format!(r#"{{"description": "{}"}}"#, "x".repeat(1001));
        let result = serde_json::from_str::<UpdateTodoRequest>(&body)
            .unwrap()
            .try_into_command();

        assert!(matches!(result, Err(TodoError::InvalidDescription(_))));
    }
}
