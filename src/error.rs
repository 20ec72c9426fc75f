use thiserror::Error;

#[derive(Debug, Error)]
pub enum IntrospectionError {
    #[error("Invalid severity: {0}")]
    InvalidSeverity(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Stack capture error: {0}")]
    Capture(String),
}

pub type Result<T> = std::result::Result<T, IntrospectionError>;
