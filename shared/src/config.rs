//! Configuration management for the calendar Lambda.

use std::env;
use std::fmt;

use validator::Validate;

use crate::{Error, Result};

/// Service-account email variable.
pub const CLIENT_EMAIL_VAR: &str = "GOOGLE_CLIENT_EMAIL";
/// PEM private key variable.
pub const PRIVATE_KEY_VAR: &str = "GOOGLE_PRIVATE_KEY";
/// Calendar identifier variable.
pub const CALENDAR_ID_VAR: &str = "CALENDAR_ID";

/// Google OAuth2 token endpoint.
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
/// Google Calendar API v3 base URL.
pub const DEFAULT_CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

/// Service-account credentials and target calendar.
///
/// All three values are required and must be non-empty.
#[derive(Clone, Validate)]
pub struct CalendarConfig {
    /// Service-account email, used as the assertion issuer
    #[validate(length(min = 1))]
    pub client_email: String,
    /// PEM-encoded RSA private key
    #[validate(length(min = 1))]
    pub private_key: String,
    /// Calendar to read events from
    #[validate(length(min = 1))]
    pub calendar_id: String,
}

impl CalendarConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Literal `\n` sequences in the private key are turned into newlines,
    /// which is how PEM keys usually survive a single-line env var.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            client_email: lookup(CLIENT_EMAIL_VAR).unwrap_or_default(),
            private_key: lookup(PRIVATE_KEY_VAR)
                .unwrap_or_default()
                .replace("\\n", "\n"),
            calendar_id: lookup(CALENDAR_ID_VAR).unwrap_or_default(),
        };

        config
            .validate()
            .map_err(|e| Error::Config(format!("Missing required settings: {}", e)))?;

        Ok(config)
    }
}

impl fmt::Debug for CalendarConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalendarConfig")
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .field("calendar_id", &self.calendar_id)
            .finish()
    }
}

/// Provider endpoints.
#[derive(Debug, Clone)]
pub struct Endpoints {
    /// OAuth2 token endpoint, also the assertion audience
    pub token_uri: String,
    /// Calendar API base URL without trailing slash
    pub calendar_api_base: String,
}

impl Endpoints {
    /// Load endpoints from environment variables, falling back to Google's.
    pub fn from_env() -> Self {
        Self::new(
            env::var("GOOGLE_TOKEN_URI").unwrap_or_else(|_| DEFAULT_TOKEN_URI.to_string()),
            env::var("GOOGLE_CALENDAR_API_BASE")
                .unwrap_or_else(|_| DEFAULT_CALENDAR_API_BASE.to_string()),
        )
    }

    pub fn new(token_uri: impl Into<String>, calendar_api_base: impl Into<String>) -> Self {
        Self {
            token_uri: token_uri.into(),
            calendar_api_base: calendar_api_base.into().trim_end_matches('/').to_string(),
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_TOKEN_URI, DEFAULT_CALENDAR_API_BASE)
    }
}
