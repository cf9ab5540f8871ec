//! Error types for marga.
//!
//! Routing failures themselves are not errors: an infeasible step, an
//! exhausted sweep or a timeout all surface through `Option`/`SearchStatus`.
//! This type covers the recoverable host-side failures (bad configuration,
//! file IO).

use thiserror::Error;

/// marga error type
#[derive(Error, Debug)]
pub enum RouteError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for RouteError {
    fn from(e: toml::de::Error) -> Self {
        RouteError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RouteError>;
