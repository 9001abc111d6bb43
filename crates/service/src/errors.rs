use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("{0} doesn't exist")]
    NotFound(&'static str),
    #[error("user already exists")]
    AlreadyExists,
    #[error("user has no posts")]
    Empty,
    #[error("io error: {0}")]
    Io(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("serialize error: {0}")]
    Serialize(String),
}
