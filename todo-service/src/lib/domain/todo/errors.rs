use thiserror::Error;

/// Error for TodoId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TodoIdError {
    #[error("Invalid todo id: {0}")]
    InvalidFormat(String),
}

/// Error for TodoTitle validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TodoTitleError {
    #[error("Title must not be empty")]
    Empty,

    #[error("Title too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for TodoDescription validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TodoDescriptionError {
    #[error("Description too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for all todo operations
#[derive(Debug, Clone, Error)]
pub enum TodoError {
    #[error("Invalid todo id: {0}")]
    InvalidTodoId(#[from] TodoIdError),

    #[error("Invalid title: {0}")]
    InvalidTitle(#[from] TodoTitleError),

    #[error("Invalid description: {0}")]
    InvalidDescription(#[from] TodoDescriptionError),

    #[error("Todo not found: {0}")]
    NotFound(String),

    #[error("Todo with this title already exists: {0}")]
    TitleAlreadyExists(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
