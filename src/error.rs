use thiserror::Error;

#[derive(Error, Debug)]
pub enum KickbookError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Logging error: {0}")]
    Logging(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, KickbookError>;
