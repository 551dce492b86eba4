use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid email format")]
    InvalidEmail,

    #[error("invalid object path: {0}")]
    InvalidPath(String),
}
