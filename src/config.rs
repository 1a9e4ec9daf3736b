//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.
//! Clients receive the values they need at construction time; nothing here
//! is global.

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

use crate::constants::{http, lyrics};
use crate::error::{Error, Result};
use crate::lyrics::ScanPolicy;

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct Config {
    /// The application name
    pub(crate) app_name: String,
    /// The application version
    pub(crate) app_version: String,
    /// Spotify application client ID
    pub spotify_client_id: String,
    /// Spotify application client secret
    pub spotify_client_secret: String,
    /// Redirect URI registered with the Spotify application
    pub spotify_redirect_uri: String,
    /// Genius API access token; lyrics search is disabled when empty
    pub genius_access_token: String,
    /// Directory holding `<title> - <artist>.lrc` files
    pub lyrics_dir: PathBuf,
    /// Whether parsed timelines are cached between polls
    pub lyrics_cache: bool,
    /// How the resolver scans a timeline
    pub scan_policy: ScanPolicy,
    /// Address the HTTP server binds to
    pub bind_addr: String,
    /// Port the HTTP server listens on
    pub port: u16,
}

impl Config {
    /// Get the application name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Get the application version.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            spotify_client_id: String::new(),
            spotify_client_secret: String::new(),
            spotify_redirect_uri: format!(
                "http://{}:{}/callback",
                http::DEFAULT_BIND_ADDR,
                http::DEFAULT_PORT
            ),
            genius_access_token: String::new(),
            lyrics_dir: PathBuf::from(lyrics::DEFAULT_DIR),
            lyrics_cache: true,
            scan_policy: ScanPolicy::default(),
            bind_addr: http::DEFAULT_BIND_ADDR.to_string(),
            port: http::DEFAULT_PORT,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        let mut config = Self::default();

        if let Ok(id) = env::var("SPOTIPY_CLIENT_ID") {
            config.spotify_client_id = id;
        }

        if let Ok(secret) = env::var("SPOTIPY_CLIENT_SECRET") {
            config.spotify_client_secret = secret;
        }

        if let Ok(uri) = env::var("SPOTIPY_REDIRECT_URI") {
            config.spotify_redirect_uri = uri;
        }

        if let Ok(token) = env::var("GENIUS_ACCESS_TOKEN") {
            config.genius_access_token = token;
        }

        if let Ok(dir) = env::var("LYRICS_DIR") {
            config.lyrics_dir = PathBuf::from(shellexpand::tilde(&dir).to_string());
        }

        if let Ok(flag) = env::var("LYRICS_CACHE") {
            config.lyrics_cache = parse_bool(&flag).ok_or_else(|| {
                Error::config(
                    format!("LYRICS_CACHE has invalid value {flag:?}"),
                    "Use true or false",
                )
            })?;
        }

        if let Ok(policy) = env::var("SCAN_POLICY") {
            config.scan_policy = policy.parse().map_err(|()| {
                Error::config(
                    format!("SCAN_POLICY has invalid value {policy:?}"),
                    "Use stop-at-first-future or full-scan",
                )
            })?;
        }

        if let Ok(addr) = env::var("BIND_ADDR") {
            config.bind_addr = addr;
        }

        if let Ok(port) = env::var("PORT") {
            config.port = port.parse().map_err(|_| {
                Error::config(format!("PORT has invalid value {port:?}"), "Use a number between 1 and 65535")
            })?;
        }

        Ok(config)
    }

    /// Check if Spotify credentials are configured
    pub const fn has_spotify_credentials(&self) -> bool {
        !self.spotify_client_id.is_empty() && !self.spotify_client_secret.is_empty()
    }

    /// Check if Genius search is enabled
    pub const fn has_genius_token(&self) -> bool {
        !self.genius_access_token.is_empty()
    }

    /// Fail with guidance when the Spotify credentials are missing.
    pub fn validate_spotify(&self) -> Result<()> {
        if self.has_spotify_credentials() {
            Ok(())
        } else {
            Err(Error::config(
                "Spotify client credentials are not set",
                "Set SPOTIPY_CLIENT_ID and SPOTIPY_CLIENT_SECRET in the environment or .env",
            ))
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
