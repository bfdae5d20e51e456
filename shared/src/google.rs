//! Google OAuth2 and Calendar API client.

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{debug, warn};

use crate::models::{AccessToken, EventsPage, RawEvent, TokenResponse};
use crate::{Endpoints, Error, Result};

/// Grant type for redeeming a signed assertion.
pub const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Page size requested from the events endpoint.
pub const MAX_RESULTS: u32 = 10;

/// Client for the token endpoint and the events listing endpoint.
#[derive(Debug, Clone)]
pub struct CalendarClient {
    /// Pooled HTTP client
    http_client: reqwest::Client,
    /// Provider URLs
    endpoints: Endpoints,
}

impl CalendarClient {
    /// Create a new calendar client.
    pub fn new(http_client: reqwest::Client, endpoints: Endpoints) -> Self {
        Self {
            http_client,
            endpoints,
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Redeem a signed assertion for an access token. No retry.
    pub async fn exchange_assertion(&self, assertion: &str) -> Result<AccessToken> {
        let params = [("grant_type", JWT_BEARER_GRANT), ("assertion", assertion)];

        let response = self
            .http_client
            .post(&self.endpoints.token_uri)
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(Error::TokenExchange(format!("{}: {}", status, error_text)));
        }

        let token_response: TokenResponse = response.json().await?;
        debug!(
            expires_in = ?token_response.expires_in,
            token_type = ?token_response.token_type,
            "Token exchange succeeded"
        );

        token_response
            .access_token
            .filter(|token| !token.is_empty())
            .map(AccessToken::new)
            .ok_or_else(|| Error::TokenExchange("Missing access_token in token response".to_string()))
    }

    /// Fetch the first page of upcoming single-instance events, ordered by
    /// start time, starting at `time_min`.
    pub async fn list_upcoming_events(
        &self,
        access_token: &AccessToken,
        calendar_id: &str,
        time_min: DateTime<Utc>,
    ) -> Result<Vec<RawEvent>> {
        let url = format!(
            "{}/calendars/{}/events",
            self.endpoints.calendar_api_base,
            urlencoding::encode(calendar_id)
        );
        let max_results = MAX_RESULTS.to_string();
        let time_min = time_min.to_rfc3339_opts(SecondsFormat::Millis, true);

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("maxResults", max_results.as_str()),
                ("singleEvents", "true"),
                ("orderBy", "startTime"),
                ("timeMin", time_min.as_str()),
            ])
            .header("Authorization", format!("Bearer {}", access_token.as_str()))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(Error::Upstream(format!(
                "Calendar API returned {}: {}",
                status, error_text
            )));
        }

        let body = response.bytes().await?;
        let page: EventsPage = serde_json::from_slice(&body)?;

        page.items.ok_or_else(|| {
            warn!(calendar_id, "Calendar API response has no items");
            Error::MissingEvents
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> CalendarClient {
        CalendarClient::new(
            reqwest::Client::new(),
            Endpoints::new(format!("{}/token", server.uri()), server.uri()),
        )
    }

    #[tokio::test]
    async fn test_exchange_posts_jwt_bearer_form() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string_contains(
                "grant_type=urn%3Aietf%3Aparams%3Aoauth%3Agrant-type%3Ajwt-bearer",
            ))
            .and(body_string_contains("assertion=aaa.bbb.ccc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "ya29.token",
                "expires_in": 3599,
                "token_type": "Bearer"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let token = client_for(&server).exchange_assertion("aaa.bbb.ccc").await.unwrap();
        assert_eq!(token.as_str(), "ya29.token");
    }

    #[tokio::test]
    async fn test_exchange_rejected_assertion() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": "invalid_grant",
                "error_description": "Invalid JWT Signature."
            })))
            .mount(&server)
            .await;

        let result = client_for(&server).exchange_assertion("aaa.bbb.ccc").await;
        assert!(matches!(result, Err(Error::TokenExchange(msg)) if msg.contains("invalid_grant")));
    }

    #[tokio::test]
    async fn test_exchange_without_access_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token_type": "Bearer"})))
            .mount(&server)
            .await;

        let result = client_for(&server).exchange_assertion("aaa.bbb.ccc").await;
        assert!(matches!(result, Err(Error::TokenExchange(_))));
    }

    #[tokio::test]
    async fn test_list_escapes_calendar_id_and_sends_bearer() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/calendars/team%40group.calendar.google.com/events"))
            .and(query_param("maxResults", "10"))
            .and(query_param("singleEvents", "true"))
            .and(query_param("orderBy", "startTime"))
            .and(query_param("timeMin", "2024-01-01T08:00:00.000Z"))
            .and(header("authorization", "Bearer ya29.token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
            .expect(1)
            .mount(&server)
            .await;

        let time_min = DateTime::parse_from_rfc3339("2024-01-01T08:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let events = client_for(&server)
            .list_upcoming_events(
                &AccessToken::new("ya29.token"),
                "team@group.calendar.google.com",
                time_min,
            )
            .await
            .unwrap();

        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn test_list_non_success_is_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/calendars/primary/events"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
            .mount(&server)
            .await;

        let result = client_for(&server)
            .list_upcoming_events(&AccessToken::new("ya29.token"), "primary", Utc::now())
            .await;

        assert!(matches!(result, Err(Error::Upstream(_))));
    }
}
