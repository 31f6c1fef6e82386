use thiserror::Error;

#[derive(Debug, Error)]
pub enum TasklistError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
