use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("JSON parsing error: {0}")]
    JsonError(String),

    #[error("Invalid card metadata: {0}")]
    InvalidMetadata(String),
}
