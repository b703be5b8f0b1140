//! OAuth2 authorization-code flow against Google, with offline access.

use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use reqwest::blocking::Client;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

use super::store::{OptionStore, STATE_KEY, TOKEN_KEY};

/// Google's OAuth2 consent page.
pub const AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";

/// Google's token endpoint.
pub const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Google's token revocation endpoint.
pub const REVOKE_URL: &str = "https://oauth2.googleapis.com/revoke";

/// Read-only Drive scope, needed to list documents.
pub const DRIVE_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/drive.readonly";

/// Read-only Docs scope, needed to fetch document content.
pub const DOCUMENTS_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/documents.readonly";

// Tokens are treated as expired this long before Google says so.
const EXPIRY_MARGIN_SECS: i64 = 30;

const STATE_LEN: usize = 32;

/// OAuth client configuration.
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    /// OAuth client id
    pub client_id: String,

    /// OAuth client secret
    pub client_secret: String,

    /// Redirect URI registered for the client
    pub redirect_uri: String,

    /// Requested scopes
    pub scopes: Vec<String>,

    /// Consent page URL
    pub auth_url: String,

    /// Token endpoint URL
    pub token_url: String,

    /// Revocation endpoint URL
    pub revoke_url: String,
}

impl OAuthConfig {
    /// Create a configuration with the default scopes and Google endpoints.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            scopes: vec![
                DRIVE_READONLY_SCOPE.to_string(),
                DOCUMENTS_READONLY_SCOPE.to_string(),
            ],
            auth_url: AUTH_URL.to_string(),
            token_url: TOKEN_URL.to_string(),
            revoke_url: REVOKE_URL.to_string(),
        }
    }

    /// Replace the requested scopes.
    pub fn with_scopes<I, T>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    /// Point the flow at other endpoints.
    pub fn with_endpoints(
        mut self,
        auth_url: impl Into<String>,
        token_url: impl Into<String>,
        revoke_url: impl Into<String>,
    ) -> Self {
        self.auth_url = auth_url.into();
        self.token_url = token_url.into();
        self.revoke_url = revoke_url.into();
        self
    }

    fn validate(&self) -> Result<()> {
        if self.client_id.trim().is_empty() || self.client_secret.trim().is_empty() {
            return Err(Error::Config(
                "CLIENT_GOOGLE_ID and CLIENT_GOOGLE_SECRET are required".to_string(),
            ));
        }
        Ok(())
    }
}

/// A token as persisted in the option store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredToken {
    /// Bearer token for API calls
    pub access_token: String,

    /// Long-lived token used to get new access tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    /// Lifetime in seconds, counted from `created`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,

    /// Unix time the token was issued
    #[serde(default)]
    pub created: i64,

    /// Space-separated granted scopes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    /// Usually `Bearer`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
}

impl StoredToken {
    /// When the access token stops being valid, if known.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let expires_in = self.expires_in?;
        Utc.timestamp_opt(self.created, 0)
            .single()
            .map(|created| created + Duration::seconds(expires_in))
    }

    /// Check expiry against `now`, with a small safety margin.
    ///
    /// A token without a known lifetime never expires.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at() {
            Some(at) => at - Duration::seconds(EXPIRY_MARGIN_SECS) < now,
            None => false,
        }
    }

    /// Check expiry against the current time.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Token metadata shown to users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    /// Expiry time, if known
    pub expires_at: Option<DateTime<Utc>>,

    /// Requested scopes
    pub scopes: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    scope: Option<String>,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

enum TokenReply {
    Granted(StoredToken),
    Rejected(String),
}

impl TokenResponse {
    fn into_reply(self) -> TokenReply {
        if let Some(error) = self.error {
            return TokenReply::Rejected(match self.error_description {
                Some(description) => format!("{}: {}", error, description),
                None => error,
            });
        }

        match self.access_token {
            Some(access_token) => TokenReply::Granted(StoredToken {
                access_token,
                refresh_token: self.refresh_token,
                expires_in: self.expires_in,
                created: Utc::now().timestamp(),
                scope: self.scope,
                token_type: self.token_type,
            }),
            None => TokenReply::Rejected("response has no access token".to_string()),
        }
    }
}

/// Google OAuth2 user authentication.
///
/// The token and the pending state live in the [`OptionStore`], so an
/// authorization survives restarts.
pub struct GoogleAuth<S: OptionStore> {
    config: OAuthConfig,
    store: S,
    client: Client,
    token: Option<StoredToken>,
}

impl<S: OptionStore> GoogleAuth<S> {
    /// Create the authenticator and load any stored token.
    ///
    /// Fails with [`Error::Config`] when the client id or secret is empty.
    /// An expired stored token is refreshed right away.
    pub fn new(config: OAuthConfig, store: S) -> Result<Self> {
        config.validate()?;

        let mut auth = Self {
            config,
            store,
            client: Client::new(),
            token: None,
        };
        auth.load_token()?;

        if auth.token.as_ref().is_some_and(StoredToken::is_expired) {
            log::debug!("Stored Google token expired, refreshing");
            auth.refresh();
        }

        Ok(auth)
    }

    fn load_token(&mut self) -> Result<()> {
        let Some(value) = self.store.get(TOKEN_KEY)? else {
            return Ok(());
        };

        match serde_json::from_value::<StoredToken>(value) {
            Ok(token) => self.token = Some(token),
            Err(e) => log::warn!("Ignoring unreadable stored token: {}", e),
        }
        Ok(())
    }

    /// The client configuration.
    pub fn config(&self) -> &OAuthConfig {
        &self.config
    }

    /// The option store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Build the consent URL, storing a fresh random state.
    pub fn auth_url(&mut self) -> Result<String> {
        let state: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(STATE_LEN)
            .map(char::from)
            .collect();
        self.store.set(STATE_KEY, Value::String(state.clone()))?;

        let scope = self.config.scopes.join(" ");
        let url = Url::parse_with_params(
            &self.config.auth_url,
            &[
                ("client_id", self.config.client_id.as_str()),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("response_type", "code"),
                ("scope", scope.as_str()),
                ("access_type", "offline"),
                ("prompt", "consent"),
                ("include_granted_scopes", "true"),
                ("state", state.as_str()),
            ],
        )
        .map_err(|e| Error::Config(format!("Invalid auth URL: {}", e)))?;

        Ok(url.into())
    }

    /// Complete the flow with the code Google redirected back with.
    ///
    /// When a state is given it must match the stored one, which is then
    /// consumed. Failures are logged and reported as `false`; nothing is
    /// stored in that case.
    pub fn handle_callback(&mut self, code: &str, state: Option<&str>) -> bool {
        match self.try_callback(code, state) {
            Ok(()) => {
                log::info!("Google authentication succeeded");
                true
            }
            Err(e) => {
                log::warn!("Google authentication failed: {}", e);
                false
            }
        }
    }

    fn try_callback(&mut self, code: &str, state: Option<&str>) -> Result<()> {
        if let Some(state) = state {
            let stored = self.store.get(STATE_KEY)?;
            if stored.as_ref().and_then(Value::as_str) != Some(state) {
                return Err(Error::Auth("Invalid OAuth state".to_string()));
            }
            self.store.delete(STATE_KEY)?;
        }

        let reply = self.request_token(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.config.redirect_uri.as_str()),
        ])?;

        match reply {
            TokenReply::Granted(token) => self.save_token(token),
            TokenReply::Rejected(error) => Err(Error::Auth(format!("OAuth error: {}", error))),
        }
    }

    /// Check for a usable token, refreshing an expired one.
    pub fn is_authenticated(&mut self) -> bool {
        let expired = match &self.token {
            None => return false,
            Some(token) => token.is_expired(),
        };
        if expired {
            self.refresh()
        } else {
            true
        }
    }

    /// Exchange the refresh token for a new access token.
    ///
    /// The previous refresh token is kept when the response omits one. An
    /// error response from Google revokes access; transport errors only
    /// report `false`.
    pub fn refresh(&mut self) -> bool {
        let Some(refresh_token) = self.token.as_ref().and_then(|t| t.refresh_token.clone()) else {
            return false;
        };

        let reply = self.request_token(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token.as_str()),
        ]);

        match reply {
            Ok(TokenReply::Granted(mut token)) => {
                if token.refresh_token.is_none() {
                    token.refresh_token = Some(refresh_token);
                }
                match self.save_token(token) {
                    Ok(()) => {
                        log::debug!("Google token refreshed");
                        true
                    }
                    Err(e) => {
                        log::warn!("Cannot store refreshed token: {}", e);
                        false
                    }
                }
            }
            Ok(TokenReply::Rejected(error)) => {
                log::warn!("Google token refresh rejected: {}", error);
                self.revoke_access();
                false
            }
            Err(e) => {
                log::warn!("Google token refresh failed: {}", e);
                false
            }
        }
    }

    /// Revoke the token with Google and forget it.
    ///
    /// The revoke call is best effort; stored token and state are always
    /// cleared.
    pub fn revoke_access(&mut self) {
        if let Some(token) = self.token.take() {
            let result = self
                .client
                .post(&self.config.revoke_url)
                .form(&[("token", token.access_token.as_str())])
                .send();
            match result {
                Ok(response) if !response.status().is_success() => {
                    log::warn!("Token revocation returned {}", response.status());
                }
                Ok(_) => log::info!("Google access revoked"),
                Err(e) => log::warn!("Token revocation failed: {}", e),
            }
        }

        for key in [TOKEN_KEY, STATE_KEY] {
            if let Err(e) = self.store.delete(key) {
                log::warn!("Cannot clear {}: {}", key, e);
            }
        }
    }

    /// A valid access token for API calls.
    pub fn access_token(&mut self) -> Result<String> {
        if !self.is_authenticated() {
            return Err(Error::Auth("Google client is not authenticated".to_string()));
        }
        self.token
            .as_ref()
            .map(|t| t.access_token.clone())
            .ok_or_else(|| Error::Auth("Google client is not authenticated".to_string()))
    }

    /// Expiry and scopes of the current token, if authenticated.
    pub fn token_info(&mut self) -> Option<TokenInfo> {
        if !self.is_authenticated() {
            return None;
        }
        Some(TokenInfo {
            expires_at: self.token.as_ref().and_then(StoredToken::expires_at),
            scopes: self.config.scopes.clone(),
        })
    }

    fn request_token(&self, grant: &[(&str, &str)]) -> Result<TokenReply> {
        let mut form: Vec<(&str, &str)> = vec![
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
        ];
        form.extend_from_slice(grant);

        let response = self.client.post(&self.config.token_url).form(&form).send()?;
        let status = response.status();
        let body = response.text()?;

        match serde_json::from_str::<TokenResponse>(&body) {
            Ok(parsed) => Ok(parsed.into_reply()),
            Err(_) => Err(Error::Http(format!(
                "Token endpoint returned {}: {}",
                status, body
            ))),
        }
    }

    fn save_token(&mut self, token: StoredToken) -> Result<()> {
        self.store.set(TOKEN_KEY, serde_json::to_value(&token)?)?;
        self.token = Some(token);
        Ok(())
    }
}
