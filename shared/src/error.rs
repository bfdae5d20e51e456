//! Error types for the calendar events Lambda.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Body message for incomplete configuration.
pub const CONFIG_INCOMPLETE: &str = "Configuración incompleta";

/// Body message when the provider returned no events collection.
pub const EVENTS_UNAVAILABLE: &str = "No se pudieron cargar eventos";

/// Body message for every other failure.
pub const INTERNAL_SERVER_ERROR: &str = "Error interno del servidor";

/// Errors that can occur while serving the calendar endpoint.
#[derive(Error, Debug)]
pub enum Error {
    /// One or more required settings are absent or empty
    #[error("Configuration error: {0}")]
    Config(String),

    /// Private key could not be parsed or used for signing
    #[error("Credential error: {0}")]
    Credential(#[from] jsonwebtoken::errors::Error),

    /// Transport-level failure talking to the provider
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Token endpoint rejected the assertion or returned no token
    #[error("Token exchange failed: {0}")]
    TokenExchange(String),

    /// Provider answered with a non-success status or an unusable payload
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Provider response had no events collection
    #[error("Events response is missing the items collection")]
    MissingEvents,

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Get HTTP status code for this error.
    ///
    /// Every failure of this endpoint is a server-side failure.
    pub fn status_code(&self) -> u16 {
        500
    }

    /// Message safe to return to the caller.
    pub fn public_message(&self) -> &'static str {
        match self {
            Error::Config(_) => CONFIG_INCOMPLETE,
            Error::MissingEvents => EVENTS_UNAVAILABLE,
            _ => INTERNAL_SERVER_ERROR,
        }
    }
}
