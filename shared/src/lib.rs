//! Shared library for the calendar events Lambda.
//!
//! This crate provides configuration, service-account signing, the Google
//! Calendar client and the upcoming-events pipeline used by the endpoint.

pub mod auth;
pub mod config;
pub mod error;
pub mod events;
pub mod google;
pub mod http;
pub mod models;

pub use auth::{sign_assertion, AssertionClaims};
pub use config::{CalendarConfig, Endpoints};
pub use error::{Error, Result};
pub use events::fetch_upcoming_events;
pub use google::CalendarClient;
pub use models::{AccessToken, ErrorBody, NormalizedEvent, RawEvent};
