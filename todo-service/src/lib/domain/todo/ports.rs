use async_trait::async_trait;

use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::CreateTodoCommand;
use crate::domain::todo::models::NewTodo;
use crate::domain::todo::models::Pagination;
use crate::domain::todo::models::Todo;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::models::TodoTitle;
use crate::domain::todo::models::UpdateTodoCommand;
use crate::domain::user::models::UserId;

/// Port for todo operations, always scoped to the authenticated owner.
///
/// A todo owned by someone else is reported exactly like a missing one.
#[async_trait]
pub trait TodoServicePort: Send + Sync + 'static {
    /// Create a todo for `owner`.
    ///
    /// # Errors
    /// * `TitleAlreadyExists` - Owner already has a todo with this title (any case)
    /// * `DatabaseError` - Database operation failed
    async fn create_todo(&self, owner: &UserId, command: CreateTodoCommand)
        -> Result<Todo, TodoError>;

    /// List the owner's todos ordered by id.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_todos(&self, owner: &UserId, pagination: Pagination)
        -> Result<Vec<Todo>, TodoError>;

    /// # Errors
    /// * `NotFound` - No such todo for this owner
    /// * `DatabaseError` - Database operation failed
    async fn get_todo(&self, owner: &UserId, id: &TodoId) -> Result<Todo, TodoError>;

    /// Apply a partial update.
    ///
    /// # Errors
    /// * `NotFound` - No such todo for this owner
    /// * `TitleAlreadyExists` - New title collides with another of the owner's todos
    /// * `DatabaseError` - Database operation failed
    async fn update_todo(
        &self,
        owner: &UserId,
        id: &TodoId,
        command: UpdateTodoCommand,
    ) -> Result<Todo, TodoError>;

    /// # Errors
    /// * `NotFound` - No such todo for this owner
    /// * `DatabaseError` - Database operation failed
    async fn delete_todo(&self, owner: &UserId, id: &TodoId) -> Result<(), TodoError>;
}

/// Persistence operations for todos.
#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    /// Persist a new todo.
    ///
    /// # Errors
    /// * `TitleAlreadyExists` - Per-owner title uniqueness violated
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, todo: NewTodo) -> Result<Todo, TodoError>;

    /// Find the owner's todo with this title, compared case-insensitively.
    async fn find_by_title(
        &self,
        owner: &UserId,
        title: &TodoTitle,
    ) -> Result<Option<Todo>, TodoError>;

    /// Retrieve one todo, only if it belongs to `owner`.
    async fn find_by_id(&self, owner: &UserId, id: &TodoId) -> Result<Option<Todo>, TodoError>;

    /// Page through the owner's todos ordered by id.
    async fn list_by_owner(
        &self,
        owner: &UserId,
        pagination: Pagination,
    ) -> Result<Vec<Todo>, TodoError>;

    /// Overwrite title, description and completion of an existing todo.
    ///
    /// # Errors
    /// * `NotFound` - Todo does not exist for its owner
    /// * `TitleAlreadyExists` - Per-owner title uniqueness violated
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, todo: Todo) -> Result<Todo, TodoError>;

    /// # Errors
    /// * `NotFound` - Todo does not exist for this owner
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, owner: &UserId, id: &TodoId) -> Result<(), TodoError>;
}
