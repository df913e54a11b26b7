//! Service-account credentials and the OAuth JWT-bearer token exchange.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use pipeline::errors::truncate_for_error;
use pipeline::{ApiService, SyncError};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// OAuth scope granting read/write access to spreadsheets.
pub const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

/// Token endpoint used when the key does not name one.
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
const ERROR_BODY_LIMIT: usize = 800;

// ---------------------------------------------------------------------------
// Key material
// ---------------------------------------------------------------------------

/// The fields of a service-account JSON key this client uses.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    private_key: String,
    #[serde(default)]
    token_uri: Option<String>,
}

impl ServiceAccountKey {
    /// Parses a service-account JSON key blob.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::InvalidConfiguration`] if the blob is not JSON or
    /// lacks `client_email` / `private_key`.
    pub fn from_json(blob: &str) -> Result<Self, SyncError> {
        let key: Self =
            serde_json::from_str(blob).map_err(|error| SyncError::InvalidConfiguration {
                message: format!("GOOGLE_SERVICE_ACCOUNT_JSON is not a service account key: {error}"),
            })?;
        if key.client_email.trim().is_empty() || key.private_key.trim().is_empty() {
            return Err(SyncError::InvalidConfiguration {
                message: "GOOGLE_SERVICE_ACCOUNT_JSON is missing client_email or private_key"
                    .to_string(),
            });
        }
        Ok(key)
    }

    /// The token endpoint named by the key, or [`DEFAULT_TOKEN_URI`].
    pub fn token_uri(&self) -> &str {
        self.token_uri
            .as_deref()
            .map(str::trim)
            .filter(|uri| !uri.is_empty())
            .unwrap_or(DEFAULT_TOKEN_URI)
    }
}

impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .field("token_uri", &self.token_uri())
            .finish()
    }
}

/// A bearer token for the Sheets API.
#[derive(Clone)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

// ---------------------------------------------------------------------------
// Token exchange
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

/// Exchanges a signed service-account assertion for an access token.
pub struct ServiceAccountAuth {
    key: ServiceAccountKey,
    http: reqwest::Client,
}

impl ServiceAccountAuth {
    /// # Errors
    ///
    /// Returns [`SyncError::InvalidConfiguration`] if the HTTP client cannot be
    /// constructed.
    pub fn new(key: ServiceAccountKey, timeout: Duration) -> Result<Self, SyncError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| SyncError::InvalidConfiguration {
                message: format!("failed to create google oauth client: {error}"),
            })?;
        Ok(Self { key, http })
    }

    /// Signs the RS256 assertion for the spreadsheets scope, issued at `now`.
    pub fn sign_assertion(&self, now: i64) -> Result<String, SyncError> {
        let claims = Claims {
            iss: &self.key.client_email,
            scope: SPREADSHEETS_SCOPE,
            aud: self.key.token_uri(),
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
        };
        let signing_key = EncodingKey::from_rsa_pem(self.key.private_key.as_bytes()).map_err(
            |error| SyncError::InvalidConfiguration {
                message: format!("service account private_key is not a usable RSA key: {error}"),
            },
        )?;
        encode(&Header::new(Algorithm::RS256), &claims, &signing_key).map_err(|error| {
            SyncError::InvalidConfiguration {
                message: format!("failed to sign service account assertion: {error}"),
            }
        })
    }

    /// Fetches an access token from the key's token endpoint.
    #[instrument(name = "google_access_token", skip_all, fields(client_email = %self.key.client_email))]
    pub async fn access_token(&self) -> Result<AccessToken, SyncError> {
        let assertion = self.sign_assertion(Utc::now().timestamp())?;
        let response = self
            .http
            .post(self.key.token_uri())
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|error| SyncError::Transport {
                service: ApiService::GoogleAuth,
                message: format!("token exchange: {error}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SyncError::ApiStatus {
                service: ApiService::GoogleAuth,
                status: status.as_u16(),
                message: format!(
                    "token exchange: {}",
                    truncate_for_error(&body, ERROR_BODY_LIMIT)
                ),
            });
        }

        let token = response
            .json::<TokenResponse>()
            .await
            .map_err(|error| SyncError::InvalidResponse {
                service: ApiService::GoogleAuth,
                message: format!("failed to decode token response: {error}"),
            })?;
        debug!(expires_in = ?token.expires_in, "Obtained access token");
        Ok(AccessToken::new(token.access_token))
    }
}
