//! Error types for specview

use thiserror::Error;

/// Main error type for specview
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Spec parse error: {0}")]
    SpecParse(String),

    #[error("Unexpected spec structure: {0}")]
    SpecShape(String),

    #[error("Security scheme error: {0}")]
    SecurityScheme(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for specview
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Config(_) => 500,
            Error::SpecParse(_) => 422,
            Error::SpecShape(_) => 500,
            Error::SecurityScheme(_) => 500,
            Error::Serialization(_) => 500,
            Error::NotFound(_) => 404,
            Error::Internal(_) => 500,
        }
    }

    /// Returns the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Error::Config(_) => "CONFIG_ERROR",
            Error::SpecParse(_) => "SPEC_PARSE_ERROR",
            Error::SpecShape(_) => "SPEC_SHAPE_ERROR",
            Error::SecurityScheme(_) => "SECURITY_SCHEME_ERROR",
            Error::Serialization(_) => "SERIALIZATION_ERROR",
            Error::NotFound(_) => "NOT_FOUND",
            Error::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
