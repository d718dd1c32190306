//! Error types shared across the suite

use thiserror::Error;

/// Result type alias using the common Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading fixtures and configuration
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid fixture: {0}")]
    InvalidFixture(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}
