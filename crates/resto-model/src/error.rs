use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown tooth position: {0}")]
    InvalidPosition(u8),
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
