//! Shared data models.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Token endpoint response.
///
/// Only `access_token` matters here; Google also sends `expires_in` and
/// `token_type`.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub expires_in: Option<i64>,
    pub token_type: Option<String>,
}

/// Bearer token for a single downstream call.
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Events list response. `items` is absent on some provider errors.
#[derive(Debug, Deserialize)]
pub struct EventsPage {
    pub items: Option<Vec<RawEvent>>,
}

/// Calendar event as returned by the provider.
#[derive(Debug, Deserialize)]
pub struct RawEvent {
    pub summary: Option<String>,
    pub start: EventTime,
    pub end: EventTime,
}

/// Event boundary: a timestamp, or a bare date for all-day events.
#[derive(Debug, Deserialize)]
pub struct EventTime {
    #[serde(rename = "dateTime")]
    pub date_time: Option<String>,
    pub date: Option<String>,
}

impl EventTime {
    /// Timestamp form if present, otherwise the date form. Empty strings
    /// count as absent.
    pub fn resolve(self) -> Result<String> {
        self.date_time
            .filter(|s| !s.is_empty())
            .or(self.date.filter(|s| !s.is_empty()))
            .ok_or_else(|| Error::Upstream("Event time has neither dateTime nor date".to_string()))
    }
}

/// Event as returned by this endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedEvent {
    pub title: String,
    pub start: String,
    pub end: String,
}

impl TryFrom<RawEvent> for NormalizedEvent {
    type Error = Error;

    fn try_from(event: RawEvent) -> Result<Self> {
        Ok(Self {
            title: event.summary.unwrap_or_default(),
            start: event.start.resolve()?,
            end: event.end.resolve()?,
        })
    }
}

/// Error body: `{"error": "..."}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
