//! Domain error types.

use thiserror::Error;

/// Value object validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("display name must not be empty")]
    DisplayNameEmpty,

    #[error("display name must be at most {max} characters (got {actual})")]
    DisplayNameTooLong { max: usize, actual: usize },

    #[error("message text must not be empty")]
    MessageTextEmpty,

    #[error("message text must be at most {max} characters (got {actual})")]
    MessageTextTooLong { max: usize, actual: usize },
}
