use std::sync::Arc;
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::constants::http::REQUEST_TIMEOUT_SECS;
use crate::constants::spotify::API_BASE_URL;
use crate::error::{Error, Result};
use crate::lyrics::PlaybackQuery;
use crate::services::PlaybackSource;
use crate::spotify::auth::SpotifyAuth;
use crate::types::NowPlaying;

/// Client for the Spotify Web API player endpoints
#[derive(Clone)]
pub struct SpotifyClient {
    auth: Arc<SpotifyAuth>,
    client: Client,
}

impl SpotifyClient {
    /// Create a client that authenticates through `auth`
    pub fn new(auth: Arc<SpotifyAuth>) -> Self {
        Self {
            auth,
            client: Client::builder()
                .timeout(StdDuration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
        }
    }

    /// Make an authenticated GET request; `None` for 204 No Content
    async fn get(&self, path: &str) -> Result<Option<Value>> {
        let token = self.auth.access_token().await?;
        let url = format!("{API_BASE_URL}{path}");
        let resp = self.client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| Error::Network(format!("Request to {path} failed: {e}")))?;

        let status = resp.status();
        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(Error::spotify_status(
                format!("Request to {path} returned {status}"),
                status.as_u16(),
            ));
        }

        resp.json().await
            .map(Some)
            .map_err(|e| Error::parse(format!("Invalid JSON from {path}: {e}"), None))
    }

    /// Fetch the current playback state
    pub async fn fetch_playback(&self) -> Result<Option<NowPlaying>> {
        let Some(json) = self.get("/me/player").await? else {
            return Ok(None);
        };
        Ok(parse_playback(&json))
    }
}

#[async_trait]
impl PlaybackSource for SpotifyClient {
    fn is_authorized(&self) -> bool {
        self.auth.is_authorized()
    }

    async fn current_playback(&self) -> Result<Option<NowPlaying>> {
        self.fetch_playback().await
    }

    fn name(&self) -> &'static str {
        "Spotify"
    }
}

/// Extract the playing track from a `/me/player` response.
///
/// Items without an artist (podcast episodes, ads) count as nothing playing.
fn parse_playback(json: &Value) -> Option<NowPlaying> {
    let item = json.get("item").filter(|v| !v.is_null())?;

    let title = item["name"].as_str()?.to_string();
    let artist = item["artists"].get(0)?["name"].as_str()?.to_string();
    let album = item["album"]["name"].as_str().unwrap_or("").to_string();
    let album_art = item["album"]["images"]
        .get(0)
        .and_then(|img| img["url"].as_str())
        .map(String::from);

    let progress_ms = PlaybackQuery::from_signed(json["progress_ms"].as_i64().unwrap_or(0)).position_ms;

    Some(NowPlaying {
        title,
        artist,
        album,
        album_art,
        progress_ms,
        is_playing: json["is_playing"].as_bool().unwrap_or(false),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "is_playing": true,
            "progress_ms": 61_250,
            "item": {
                "name": "Yellow",
                "artists": [{"name": "Coldplay"}, {"name": "Guest"}],
                "album": {
                    "name": "Parachutes",
                    "images": [{"url": "https://i.scdn.co/image/large"}, {"url": "https://i.scdn.co/image/small"}]
                }
            }
        })
    }

    #[test]
    fn parses_track_fields() {
        let np = parse_playback(&sample()).unwrap();
        assert_eq!(np.title, "Yellow");
        assert_eq!(np.artist, "Coldplay");
        assert_eq!(np.album, "Parachutes");
        assert_eq!(np.album_art.as_deref(), Some("https://i.scdn.co/image/large"));
        assert_eq!(np.progress_ms, 61_250);
        assert!(np.is_playing);
    }

    #[test]
    fn paused_playback_is_reported() {
        let mut json = sample();
        json["is_playing"] = json!(false);
        assert!(!parse_playback(&json).unwrap().is_playing);
    }

    #[test]
    fn missing_item_is_nothing_playing() {
        assert!(parse_playback(&json!({"is_playing": true, "item": null})).is_none());
        assert!(parse_playback(&json!({"is_playing": false})).is_none());
    }

    #[test]
    fn episode_without_artists_is_nothing_playing() {
        let json = json!({"is_playing": true, "item": {"name": "Episode 12", "show": {}}});
        assert!(parse_playback(&json).is_none());
    }

    #[test]
    fn missing_art_and_negative_progress_degrade() {
        let json = json!({
            "is_playing": true,
            "progress_ms": -40,
            "item": {"name": "T", "artists": [{"name": "A"}], "album": {"name": "B", "images": []}}
        });
        let np = parse_playback(&json).unwrap();
        assert_eq!(np.album_art, None);
        assert_eq!(np.progress_ms, 0);
    }
}
