use thiserror::Error;

use super::UserId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Raised by `update` only; `get_by_id` and `delete` report absence
    /// through their return values instead.
    #[error("user {0} does not exist")]
    NotFound(UserId),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("name is required")]
    BlankName,
    #[error("email address is required")]
    BlankEmail,
    #[error("email address must have text before and after its '@'")]
    MalformedEmail,
}
