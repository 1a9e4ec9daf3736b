//! Spotify OAuth (authorization-code flow) and token bookkeeping.

use chrono::{DateTime, Duration, Utc};
use oauth2::basic::{BasicClient, BasicTokenResponse};
use oauth2::reqwest::async_http_client;
use oauth2::{
    AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, RedirectUrl, RefreshToken,
    Scope, TokenResponse, TokenUrl,
};
use parking_lot::Mutex;

use crate::config::Config;
use crate::constants::spotify::{AUTH_URL, EXPIRY_MARGIN_SECS, SCOPES, TOKEN_URL};
use crate::error::{Error, Result};

/// An access token and what is needed to renew it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpotifyToken {
    /// Bearer token for Web API calls.
    pub access_token: String,
    /// Token used to obtain a new access token.
    pub refresh_token: Option<String>,
    /// When the access token stops working, if known.
    pub expires_at: Option<DateTime<Utc>>,
}

impl SpotifyToken {
    /// Whether the token expires within the refresh margin of `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at
            .is_some_and(|at| at - Duration::seconds(EXPIRY_MARGIN_SECS) <= now)
    }

    fn from_response(resp: &BasicTokenResponse, previous_refresh: Option<String>) -> Self {
        let expires_at = resp
            .expires_in()
            .and_then(|d| Duration::from_std(d).ok())
            .map(|d| Utc::now() + d);
        Self {
            access_token: resp.access_token().secret().clone(),
            refresh_token: resp
                .refresh_token()
                .map(|t| t.secret().clone())
                .or(previous_refresh),
            expires_at,
        }
    }
}

/// OAuth client plus the single signed-in user's token.
///
/// The app serves one local user, so one token slot replaces a
/// per-browser session map.
pub struct SpotifyAuth {
    oauth: BasicClient,
    token: Mutex<Option<SpotifyToken>>,
    pending_state: Mutex<Option<String>>,
}

impl SpotifyAuth {
    /// Create the OAuth client from config.
    pub fn new(config: &Config) -> Result<Self> {
        let auth_url = AuthUrl::new(AUTH_URL.to_string())
            .map_err(|e| Error::Auth(format!("Invalid authorize URL: {e}")))?;
        let token_url = TokenUrl::new(TOKEN_URL.to_string())
            .map_err(|e| Error::Auth(format!("Invalid token URL: {e}")))?;
        let redirect = RedirectUrl::new(config.spotify_redirect_uri.clone()).map_err(|e| {
            Error::config(
                format!("Invalid SPOTIPY_REDIRECT_URI {:?}: {e}", config.spotify_redirect_uri),
                "Use an absolute URL ending in /callback",
            )
        })?;

        let oauth = BasicClient::new(
            ClientId::new(config.spotify_client_id.clone()),
            Some(ClientSecret::new(config.spotify_client_secret.clone())),
            auth_url,
            Some(token_url),
        )
        .set_redirect_uri(redirect);

        Ok(Self {
            oauth,
            token: Mutex::new(None),
            pending_state: Mutex::new(None),
        })
    }

    /// Build the authorize URL to redirect the browser to.
    ///
    /// Each call replaces the pending CSRF state.
    pub fn authorize_url(&self) -> String {
        let (url, state) = SCOPES
            .iter()
            .fold(self.oauth.authorize_url(CsrfToken::new_random), |req, scope| {
                req.add_scope(Scope::new((*scope).to_string()))
            })
            .url();
        *self.pending_state.lock() = Some(state.secret().clone());
        url.to_string()
    }

    /// Finish the flow: check `state` and exchange `code` for a token.
    pub async fn handle_callback(&self, code: &str, state: Option<&str>) -> Result<()> {
        let expected = self.pending_state.lock().take();
        match (expected.as_deref(), state) {
            (Some(expected), Some(got)) if expected == got => {}
            (None, _) => return Err(Error::Auth("No login in progress".into())),
            _ => return Err(Error::Auth("OAuth state mismatch".into())),
        }

        let resp = self
            .oauth
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .request_async(async_http_client)
            .await
            .map_err(|e| Error::Auth(format!("Code exchange failed: {e}")))?;

        self.set_token(SpotifyToken::from_response(&resp, None));
        tracing::info!("Spotify authorization complete");
        Ok(())
    }

    /// Whether a token is held.
    pub fn is_authorized(&self) -> bool {
        self.token.lock().is_some()
    }

    /// Store a token, replacing any previous one.
    pub fn set_token(&self, token: SpotifyToken) {
        *self.token.lock() = Some(token);
    }

    /// Drop the held token.
    pub fn clear_token(&self) {
        *self.token.lock() = None;
    }

    /// A usable access token, refreshing it first when it is about to expire.
    pub async fn access_token(&self) -> Result<String> {
        let current = self
            .token
            .lock()
            .clone()
            .ok_or_else(|| Error::Auth("Not signed in to Spotify".into()))?;

        if !current.is_expired(Utc::now()) {
            return Ok(current.access_token);
        }

        let refresh = current
            .refresh_token
            .clone()
            .ok_or_else(|| Error::Auth("Token expired and no refresh token is available".into()))?;

        tracing::debug!("Refreshing Spotify access token");
        let resp = self
            .oauth
            .exchange_refresh_token(&RefreshToken::new(refresh.clone()))
            .request_async(async_http_client)
            .await
            .map_err(|e| Error::Auth(format!("Token refresh failed: {e}")))?;

        let renewed = SpotifyToken::from_response(&resp, Some(refresh));
        let access = renewed.access_token.clone();
        self.set_token(renewed);
        Ok(access)
    }
}
