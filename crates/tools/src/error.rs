use thiserror::Error;

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Operation failed: {0}")]
    OperationFailed(String),

    #[error("Operation timed out")]
    Timeout,

    #[error("Internal error")]
    Internal,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ActionResult<T> = Result<T, ActionError>;
