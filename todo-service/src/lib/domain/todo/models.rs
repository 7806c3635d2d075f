use std::fmt;

use crate::domain::todo::errors::TodoDescriptionError;
use crate::domain::todo::errors::TodoIdError;
use crate::domain::todo::errors::TodoTitleError;
use crate::domain::user::models::UserId;

/// Todo entity, owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub title: TodoTitle,
    pub description: Option<TodoDescription>,
    pub completed: bool,
    pub owner_id: UserId,
}

/// Todo identifier, assigned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TodoId(pub i64);

impl TodoId {
    /// Parse a todo id from a path segment.
    ///
    /// # Errors
    /// * `InvalidFormat` - Not a decimal integer
    pub fn from_string(s: &str) -> Result<Self, TodoIdError> {
        s.parse::<i64>()
            .map(TodoId)
            .map_err(|e| TodoIdError::InvalidFormat(format!("{}: {}", s, e)))
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Todo title, 1-200 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoTitle(String);

impl TodoTitle {
    const MAX_LENGTH: usize = 200;

    pub fn new(title: String) -> Result<Self, TodoTitleError> {
        let length = title.chars().count();
        if length == 0 {
            Err(TodoTitleError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(TodoTitleError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(title))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Titles are unique per owner regardless of case.
    ///
    /// This is a pre-check only. Case folding here may differ from the
    /// store's `LOWER` for some non-ASCII titles; the unique index on
    /// `(user_id, LOWER(title))` is the authority.
    pub fn same_as(&self, other: &TodoTitle) -> bool {
        self.0.to_lowercase() == other.0.to_lowercase()
    }
}

impl fmt::Display for TodoTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Free-form description, at most 1000 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoDescription(String);

impl TodoDescription {
    const MAX_LENGTH: usize = 1000;

    pub fn new(description: String) -> Result<Self, TodoDescriptionError> {
        let length = description.chars().count();
        if length > Self::MAX_LENGTH {
            Err(TodoDescriptionError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(description))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Command to create a todo with domain types
#[derive(Debug)]
pub struct CreateTodoCommand {
    pub title: TodoTitle,
    pub description: Option<TodoDescription>,
}

/// Command to update a todo.
///
/// All fields are optional; only provided fields are changed.
/// `description: Some(None)` clears the description.
#[derive(Debug, Default)]
pub struct UpdateTodoCommand {
    pub title: Option<TodoTitle>,
    pub description: Option<Option<TodoDescription>>,
    pub completed: Option<bool>,
}

/// Todo row to be inserted; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewTodo {
    pub owner_id: UserId,
    pub title: TodoTitle,
    pub description: Option<TodoDescription>,
}

/// Offset pagination for listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub skip: u32,
    pub limit: u32,
}

impl Pagination {
    pub const DEFAULT_LIMIT: u32 = 50;
    pub const MAX_LIMIT: u32 = 100;

    /// Build pagination from optional query values, capping `limit`.
    pub fn new(skip: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            skip: skip.unwrap_or(0),
            limit: limit.unwrap_or(Self::DEFAULT_LIMIT).min(Self::MAX_LIMIT),
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_bounds() {
        assert_eq!(TodoTitle::new(String::new()), Err(TodoTitleError::Empty));
        assert!(TodoTitle::new("x".repeat(200)).is_ok());
        assert_eq!(
            TodoTitle::new("x".repeat(201)),
            Err(TodoTitleError::TooLong {
                max: 200,
                actual: 201
            })
        );
    }

    #[test]
    fn test_title_same_as_ignores_case() {
        let a = TodoTitle::new("Buy Milk".to_string()).unwrap();
        let b = TodoTitle::new("buy milk".to_string()).unwrap();
        let c = TodoTitle::new("buy bread".to_string()).unwrap();

        assert!(a.same_as(&b));
        assert!(!a.same_as(&c));
    }

    #[test]
    fn test_description_bounds() {
        assert!(TodoDescription::new(String::new()).is_ok());
        assert!(TodoDescription::new("x".repeat(1000)).is_ok());
        assert!(TodoDescription::new("x".repeat(1001)).is_err());
    }

    #[test]
    fn test_todo_id_from_string() {
        assert_eq!(TodoId::from_string("42"), Ok(TodoId(42)));
        assert!(TodoId::from_string("abc").is_err());
    }

    #[test]
    fn test_pagination_defaults_and_cap() {
        assert_eq!(Pagination::default(), Pagination { skip: 0, limit: 50 });
        assert_eq!(
            Pagination::new(Some(10), Some(500)),
            Pagination {
                skip: 10,
                limit: 100
            }
        );
    }
}
