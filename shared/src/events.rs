//! Upcoming events pipeline: sign, exchange, fetch, normalize.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::auth::sign_assertion;
use crate::google::CalendarClient;
use crate::models::NormalizedEvent;
use crate::{CalendarConfig, Result};

/// Fetch and normalize the next upcoming events of the configured calendar.
///
/// `now` is the request time; it is both the assertion issue time and the
/// lower bound of the events query. A fresh assertion and token are used for
/// every call.
pub async fn fetch_upcoming_events(
    client: &CalendarClient,
    config: &CalendarConfig,
    now: DateTime<Utc>,
) -> Result<Vec<NormalizedEvent>> {
    let assertion = sign_assertion(config, &client.endpoints().token_uri, now.timestamp())?;
    let access_token = client.exchange_assertion(&assertion).await?;

    let raw_events = client
        .list_upcoming_events(&access_token, &config.calendar_id, now)
        .await?;

    info!(
        calendar_id = %config.calendar_id,
        count = raw_events.len(),
        "Fetched upcoming events"
    );

    raw_events
        .into_iter()
        .map(NormalizedEvent::try_from)
        .collect()
}
