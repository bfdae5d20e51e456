//! Calendar Lambda - Handles /v1/calendar endpoint.
//!
//! Returns the next upcoming events of the configured Google Calendar as a
//! JSON array of `{title, start, end}`. Any method is accepted and the
//! request body and query string are ignored.

use chrono::{DateTime, Utc};
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use shared::http::{error_response, internal_error_response, json_response};
use shared::{fetch_upcoming_events, CalendarClient, CalendarConfig, Endpoints};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Application state
struct AppState {
    client: CalendarClient,
}

impl AppState {
    fn new() -> Self {
        let endpoints = Endpoints::from_env();
        info!(
            token_uri = %endpoints.token_uri,
            calendar_api_base = %endpoints.calendar_api_base,
            "Calendar endpoint initialised"
        );

        Self {
            client: CalendarClient::new(reqwest::Client::new(), endpoints),
        }
    }
}

/// Run the pipeline for an already-loaded configuration and shape the
/// HTTP response. This is the single error boundary of the endpoint: every
/// outcome is a JSON body, including a failure to serialize the events.
async fn respond(
    client: &CalendarClient,
    config: shared::Result<CalendarConfig>,
    now: DateTime<Utc>,
) -> Result<Response<Body>, Error> {
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "Calendar configuration incomplete");
            return error_response(&e);
        }
    };

    match fetch_upcoming_events(client, &config, now).await {
        Ok(events) => match json_response(200, &events) {
            Ok(response) => Ok(response),
            Err(e) => {
                error!(error = %e, "Failed to serialize calendar events");
                internal_error_response()
            }
        },
        Err(e) => {
            error!(error = %e, calendar_id = %config.calendar_id, "Failed to load calendar events");
            error_response(&e)
        }
    }
}

async fn handler(state: Arc<AppState>, event: Request) -> Result<Response<Body>, Error> {
    info!("Calendar request: {} {}", event.method(), event.uri().path());

    respond(&state.client, CalendarConfig::from_env(), Utc::now()).await
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let state = Arc::new(AppState::new());

    run(service_fn(move |event| {
        let state = Arc::clone(&state);
        async move { handler(state, event).await }
    }))
    .await
}
