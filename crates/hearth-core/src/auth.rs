//! OAuth pin flow against the thermostat API.
//!
//! The API uses a pin-based grant: `authorize` issues a pin the user
//! registers in their account portal plus an authorization code;
//! `request_tokens` exchanges that code for an access/refresh token pair
//! once the pin is registered; `refresh_tokens` trades a refresh token for
//! a fresh pair. Token persistence is the caller's job.

use serde::Deserialize;
use tracing::{debug, info};

use crate::api::API_ROOT;
use crate::error::{Error, Result};

/// Scope requested during pin authorization: read-only access.
pub const AUTHORIZE_SCOPE: &str = "smartRead";

/// A pin and its matching authorization code.
#[derive(Debug, Clone, Deserialize)]
pub struct PinAuthorization {
    /// The pin the user must register under "My Apps".
    #[serde(rename = "ecobeePin")]
    pub pin: String,
    /// Code exchanged for tokens after the pin is registered.
    pub code: String,
}

/// An access/refresh token pair.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Client for the authorize/token endpoints. Unauthenticated; identified by
/// the application's API key only.
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl AuthClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(API_ROOT, api_key)
    }

    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Request a new application pin and authorization code.
    pub async fn authorize(&self) -> Result<PinAuthorization> {
        info!("Requesting application pin");
        let authorization: PinAuthorization = self
            .http
            .get(format!("{}/authorize", self.base_url))
            .query(&[
                ("response_type", "ecobeePin"),
                ("scope", AUTHORIZE_SCOPE),
                ("client_id", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| Error::Auth(format!("pin request failed: {e}")))?
            .error_for_status()
            .map_err(|e| Error::Auth(format!("pin request rejected: {e}")))?
            .json()
            .await
            .map_err(|e| Error::Auth(format!("malformed pin response: {e}")))?;
        debug!(pin = %authorization.pin, "pin issued");
        Ok(authorization)
    }

    /// Exchange the authorization code for the initial token pair. Fails
    /// until the user has registered the pin.
    pub async fn request_tokens(&self, code: &str) -> Result<TokenPair> {
        info!("Requesting initial tokens");
        self.token_request("ecobeePin", code).await
    }

    /// Trade a refresh token for a fresh token pair.
    pub async fn refresh_tokens(&self, refresh_token: &str) -> Result<TokenPair> {
        info!("Refreshing tokens");
        self.token_request("refresh_token", refresh_token).await
    }

    async fn token_request(&self, grant_type: &str, code: &str) -> Result<TokenPair> {
        self.http
            .post(format!("{}/token", self.base_url))
            .form(&[
                ("grant_type", grant_type),
                ("code", code),
                ("client_id", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| Error::Auth(format!("token request failed: {e}")))?
            .error_for_status()
            .map_err(|e| Error::Auth(format!("token request rejected: {e}")))?
            .json()
            .await
            .map_err(|e| Error::Auth(format!("malformed token response: {e}")))
    }
}
