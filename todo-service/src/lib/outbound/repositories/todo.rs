use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::NewTodo;
use crate::domain::todo::models::Pagination;
use crate::domain::todo::models::Todo;
use crate::domain::todo::models::TodoDescription;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::models::TodoTitle;
use crate::domain::todo::ports::TodoRepository;
use crate::domain::user::models::UserId;

const TITLE_UNIQUE_INDEX: &str = "todos_user_id_lower_title_key";

pub struct PostgresTodoRepository {
    pool: PgPool,
}

impl PostgresTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_todo(row: &PgRow) -> Result<Todo, TodoError> {
        let description: Option<String> = row.try_get("description").map_err(database_error)?;

        Ok(Todo {
            id: TodoId(row.try_get("id").map_err(database_error)?),
            title: TodoTitle::new(row.try_get("title").map_err(database_error)?)?,
            description: description.map(TodoDescription::new).transpose()?,
            completed: row.try_get("completed").map_err(database_error)?,
            owner_id: UserId(row.try_get("user_id").map_err(database_error)?),
        })
    }
}

fn database_error(e: sqlx::Error) -> TodoError {
    TodoError::DatabaseError(e.to_string())
}

fn write_error(e: sqlx::Error, title: &TodoTitle) -> TodoError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() && db_err.constraint() == Some(TITLE_UNIQUE_INDEX) {
            return TodoError::TitleAlreadyExists(title.to_string());
        }
    }
    database_error(e)
}

#[async_trait]
impl TodoRepository for PostgresTodoRepository {
    async fn create(&self, todo: NewTodo) -> Result<Todo, TodoError> {
        let row = sqlx::query(
            r#"
            INSERT INTO todos (title, description, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, description, completed, user_id
            "#,
        )
        .bind(todo.title.as_str())
        .bind(todo.description.as_ref().map(|d| d.as_str()))
        .bind(todo.owner_id.0)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(e, &todo.title))?;

        Self::row_to_todo(&row)
    }

    async fn find_by_title(
        &self,
        owner: &UserId,
        title: &TodoTitle,
    ) -> Result<Option<Todo>, TodoError> {
        let row = sqlx::query(
            r#"
            SELECT id, title, description, completed, user_id
            FROM todos
            WHERE user_id = $1 AND LOWER(title) = LOWER($2)
            "#,
        )
        .bind(owner.0)
        .bind(title.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.as_ref().map(Self::row_to_todo).transpose()
    }

    async fn find_by_id(&self, owner: &UserId, id: &TodoId) -> Result<Option<Todo>, TodoError> {
        let row = sqlx::query(
            r#"
            SELECT id, title, description, completed, user_id
            FROM todos
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id.0)
        .bind(owner.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.as_ref().map(Self::row_to_todo).transpose()
    }

    async fn list_by_owner(
        &self,
        owner: &UserId,
        pagination: Pagination,
    ) -> Result<Vec<Todo>, TodoError> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, description, completed, user_id
            FROM todos
            WHERE user_id = $1
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(owner.0)
        .bind(i64::from(pagination.limit))
        .bind(i64::from(pagination.skip))
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.iter().map(Self::row_to_todo).collect()
    }

    async fn update(&self, todo: Todo) -> Result<Todo, TodoError> {
        let result = sqlx::query(
            r#"
            UPDATE todos
            SET title = $3, description = $4, completed = $5
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(todo.id.0)
        .bind(todo.owner_id.0)
        .bind(todo.title.as_str())
        .bind(todo.description.as_ref().map(|d| d.as_str()))
        .bind(todo.completed)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, &todo.title))?;

        if result.rows_affected() == 0 {
            return Err(TodoError::NotFound(todo.id.to_string()));
        }

        Ok(todo)
    }

    async fn delete(&self, owner: &UserId, id: &TodoId) -> Result<(), TodoError> {
        let result = sqlx::query(
            r#"
            DELETE FROM todos
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id.0)
        .bind(owner.0)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(TodoError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
