//! HTTP shell.
//!
//! Every request is resolved from the provider's current state; the server
//! keeps no record of playback between polls.

/// Request handlers
pub mod routes;

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::genius::GeniusClient;
use crate::lyrics::{LyricsStore, ScanPolicy};
use crate::services::{LyricsSearch, NoLyricsSearch, PlaybackSource};
use crate::spotify::{SpotifyAuth, SpotifyClient};

/// Shared state handed to every handler.
pub struct AppState {
    /// Spotify sign-in.
    pub auth: Arc<SpotifyAuth>,
    /// Where playback state comes from.
    pub playback: Arc<dyn PlaybackSource>,
    /// Where plain lyrics come from.
    pub lyrics_search: Arc<dyn LyricsSearch>,
    /// Timed-lyrics files.
    pub store: LyricsStore,
    /// How timelines are scanned.
    pub scan_policy: ScanPolicy,
}

impl AppState {
    /// Wire up the real Spotify and Genius clients from config.
    pub fn from_config(config: &Config) -> Result<Self> {
        let auth = Arc::new(SpotifyAuth::new(config)?);
        let playback: Arc<dyn PlaybackSource> = Arc::new(SpotifyClient::new(Arc::clone(&auth)));
        let lyrics_search: Arc<dyn LyricsSearch> = if config.has_genius_token() {
            Arc::new(GeniusClient::new(config))
        } else {
            tracing::info!("GENIUS_ACCESS_TOKEN not set; plain lyrics search disabled");
            Arc::new(NoLyricsSearch)
        };

        Ok(Self {
            auth,
            playback,
            lyrics_search,
            store: LyricsStore::new(config.lyrics_dir.clone(), config.lyrics_cache),
            scan_policy: config.scan_policy,
        })
    }
}

/// Register all routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(routes::index))
        .route("/login", web::get().to(routes::login))
        .route("/callback", web::get().to(routes::callback))
        .route("/now_playing", web::get().to(routes::now_playing))
        .route("/current_line", web::get().to(routes::current_line));
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Auth(_) => StatusCode::BAD_REQUEST,
            Self::Network(_) | Self::Spotify { .. } | Self::Genius { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "error": self.to_string() }))
    }
}
