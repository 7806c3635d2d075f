use std::sync::Arc;

use async_trait::async_trait;

use super::errors::TodoError;
use super::models::CreateTodoCommand;
use super::models::NewTodo;
use super::models::Pagination;
use super::models::Todo;
use super::models::TodoId;
use super::models::UpdateTodoCommand;
use super::ports::TodoRepository;
use super::ports::TodoServicePort;
use crate::domain::user::models::UserId;

/// Concrete implementation of TodoServicePort.
///
/// Generic over repository for testability.
pub struct TodoService<TR>
where
    TR: TodoRepository,
{
    repository: Arc<TR>,
}

impl<TR> TodoService<TR>
where
    TR: TodoRepository,
{
    pub fn new(repository: Arc<TR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<TR> TodoServicePort for TodoService<TR>
where
    TR: TodoRepository,
{
    async fn create_todo(
        &self,
        owner: &UserId,
        command: CreateTodoCommand,
    ) -> Result<Todo, TodoError> {
        if self
            .repository
            .find_by_title(owner, &command.title)
            .await?
            .is_some()
        {
            return Err(TodoError::TitleAlreadyExists(command.title.to_string()));
        }

        let todo = self
            .repository
            .create(NewTodo {
                owner_id: *owner,
                title: command.title,
                description: command.description,
            })
            .await?;

        tracing::debug!(todo_id = %todo.id, user_id = %owner, "Todo created");

        Ok(todo)
    }

    async fn list_todos(
        &self,
        owner: &UserId,
        pagination: Pagination,
    ) -> Result<Vec<Todo>, TodoError> {
        self.repository.list_by_owner(owner, pagination).await
    }

    async fn get_todo(&self, owner: &UserId, id: &TodoId) -> Result<Todo, TodoError> {
        self.repository
            .find_by_id(owner, id)
            .await?
            .ok_or(TodoError::NotFound(id.to_string()))
    }

    async fn update_todo(
        &self,
        owner: &UserId,
        id: &TodoId,
        command: UpdateTodoCommand,
    ) -> Result<Todo, TodoError> {
        let mut todo = self.get_todo(owner, id).await?;

        if let Some(new_title) = command.title {
            if !new_title.same_as(&todo.title) {
                let clash = self.repository.find_by_title(owner, &new_title).await?;
                if clash.is_some_and(|other| other.id != todo.id) {
                    return Err(TodoError::TitleAlreadyExists(new_title.to_string()));
                }
            }
            todo.title = new_title;
        }

        if let Some(new_description) = command.description {
            todo.description = new_description;
        }

        if let Some(completed) = command.completed {
            todo.completed = completed;
        }

        self.repository.update(todo).await
    }

    async fn delete_todo(&self, owner: &UserId, id: &TodoId) -> Result<(), TodoError> {
        self.repository.delete(owner, id).await?;

        tracing::debug!(todo_id = %id, user_id = %owner, "Todo deleted");

        Ok(())
    }
}
