use cover_core::CoverError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("Cover error: {0}")]
    Cover(#[from] CoverError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Persistence error: {0}")]
    Persist(String),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
