//! Service-account assertion signing.

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::{CalendarConfig, Result};

/// Read-only Calendar scope requested by the assertion.
pub const CALENDAR_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/calendar.readonly";

/// Assertion lifetime in seconds.
pub const ASSERTION_TTL_SECS: i64 = 3600;

/// Claims of the JWT-bearer assertion sent to the token endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct AssertionClaims {
    /// Issuer (service-account email)
    pub iss: String,
    /// Requested OAuth scope
    pub scope: String,
    /// Audience (token endpoint URL)
    pub aud: String,
    /// Issued at
    pub iat: i64,
    /// Expiration
    pub exp: i64,
}

impl AssertionClaims {
    pub fn new(client_email: &str, audience: &str, issued_at: i64) -> Self {
        Self {
            iss: client_email.to_string(),
            scope: CALENDAR_READONLY_SCOPE.to_string(),
            aud: audience.to_string(),
            iat: issued_at,
            exp: issued_at + ASSERTION_TTL_SECS,
        }
    }
}

/// Build and RS256-sign an assertion for the configured service account.
///
/// A malformed private key surfaces as [`crate::Error::Credential`].
pub fn sign_assertion(config: &CalendarConfig, audience: &str, issued_at: i64) -> Result<String> {
    let claims = AssertionClaims::new(&config.client_email, audience, issued_at);
    let key = EncodingKey::from_rsa_pem(config.private_key.as_bytes())?;

    Ok(encode(&Header::new(Algorithm::RS256), &claims, &key)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use chrono::Utc;
    use jsonwebtoken::{decode, decode_header, DecodingKey, Validation};

    const TEST_PRIVATE_KEY: &str = include_str!("../testdata/service_account_key.pem");
    const TEST_PUBLIC_KEY: &str = include_str!("../testdata/service_account_key.pub.pem");
    const TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

    fn test_config(private_key: &str) -> CalendarConfig {
        CalendarConfig {
            client_email: "svc@project.iam.gserviceaccount.com".to_string(),
            private_key: private_key.to_string(),
            calendar_id: "primary".to_string(),
        }
    }

    #[test]
    fn test_assertion_verifies_against_public_key() {
        let now = Utc::now().timestamp();
        let assertion = sign_assertion(&test_config(TEST_PRIVATE_KEY), TOKEN_URI, now).unwrap();

        let header = decode_header(&assertion).unwrap();
        assert_eq!(header.alg, Algorithm::RS256);
        assert_eq!(header.typ.as_deref(), Some("JWT"));

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[TOKEN_URI]);
        validation.set_issuer(&["svc@project.iam.gserviceaccount.com"]);

        let key = DecodingKey::from_rsa_pem(TEST_PUBLIC_KEY.as_bytes()).unwrap();
        let claims = decode::<AssertionClaims>(&assertion, &key, &validation)
            .unwrap()
            .claims;

        assert_eq!(claims.scope, CALENDAR_READONLY_SCOPE);
        assert_eq!(claims.iat, now);
        assert_eq!(claims.exp, now + 3600);
    }

    #[test]
    fn test_assertion_has_three_segments() {
        let assertion =
            sign_assertion(&test_config(TEST_PRIVATE_KEY), TOKEN_URI, 1_700_000_000).unwrap();
        assert_eq!(assertion.split('.').count(), 3);
        assert!(!assertion.ends_with("FAKE_SIGNATURE_FOR_NOW"));
    }

    #[test]
    fn test_malformed_key_is_credential_error() {
        let result = sign_assertion(&test_config("not a pem key"), TOKEN_URI, 1_700_000_000);
        assert!(matches!(result, Err(Error::Credential(_))));
    }
}
