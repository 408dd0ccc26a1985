use thiserror::Error;

#[derive(Debug, Error)]
pub enum VoteMatchError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, VoteMatchError>;
