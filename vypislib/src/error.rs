//! Единый тип ошибок публичного API.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VypisError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    #[error("Format error: {0}")]
    Format(String),
}

pub type Result<T> = std::result::Result<T, VypisError>;
