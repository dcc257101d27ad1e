//! Startup errors

use thiserror::Error;

use roster_core::{EngineError, StoreError};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("storage: {0}")]
    Store(#[from] StoreError),

    #[error("engine: {0}")]
    Engine(#[from] EngineError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ServerResult<T> = Result<T, ServerError>;
