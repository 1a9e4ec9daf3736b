//! Genius lyrics search.
//!
//! Searches the Genius API for a track and scrapes the plain lyrics from the
//! song page. These lyrics are untimed; they are shown next to the synced
//! line, never used for resolution.

use std::sync::LazyLock;
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use serde_json::Value;

use crate::config::Config;
use crate::constants::genius::{API_BASE_URL, EXCLUDED_TERMS};
use crate::constants::http::REQUEST_TIMEOUT_SECS;
use crate::error::{Error, Result};
use crate::services::LyricsSearch;

/// Titles that are Genius pages about a song rather than the song itself.
#[allow(clippy::expect_used)]
static RE_NON_SONG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)track\s?list|album art(work)?|liner notes|booklet|credits|interview|skit|instrumental|setlist")
        .expect("valid regex: RE_NON_SONG")
});

/// Lyrics blocks on a song page.
#[allow(clippy::expect_used)]
static RE_LYRICS_CONTAINER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<div[^>]*data-lyrics-container="true"[^>]*>(.*?)</div>"#)
        .expect("valid regex: RE_LYRICS_CONTAINER")
});

#[allow(clippy::expect_used)]
static RE_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<br\s*/?>").expect("valid regex: RE_BREAK")
});

#[allow(clippy::expect_used)]
static RE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<[^>]+>").expect("valid regex: RE_TAG")
});

/// A song hit from the search endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongHit {
    /// Song title on Genius.
    pub title: String,
    /// Primary artist name on Genius.
    pub artist: String,
    /// Song page URL.
    pub url: String,
}

/// Client for the Genius API
#[derive(Clone)]
pub struct GeniusClient {
    access_token: String,
    client: Client,
}

impl GeniusClient {
    /// Create a new Genius client from config
    pub fn new(config: &Config) -> Self {
        Self {
            access_token: config.genius_access_token.clone(),
            client: Client::builder()
                .timeout(StdDuration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
        }
    }

    /// Search for songs matching `title` and `artist`
    pub async fn search(&self, title: &str, artist: &str) -> Result<Vec<SongHit>> {
        let query = format!("{title} {artist}");
        let resp = self.client
            .get(format!("{API_BASE_URL}/search"))
            .bearer_auth(&self.access_token)
            .query(&[("q", query.as_str())])
            .send()
            .await
            .map_err(|e| Error::Network(format!("Genius search failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::genius_status(format!("Search returned {status}"), status.as_u16()));
        }

        let json: Value = resp.json().await
            .map_err(|e| Error::parse(format!("Invalid JSON from Genius search: {e}"), None))?;
        Ok(parse_hits(&json))
    }

    /// Download a song page and extract its lyrics
    pub async fn fetch_lyrics(&self, url: &str) -> Result<Option<String>> {
        let resp = self.client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Network(format!("Request to {url} failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::genius_status(format!("Song page returned {status}"), status.as_u16()));
        }

        let html = resp.text().await
            .map_err(|e| Error::Network(format!("Reading {url} failed: {e}")))?;
        Ok(extract_lyrics(&html))
    }
}

#[async_trait]
impl LyricsSearch for GeniusClient {
    async fn search_lyrics(&self, title: &str, artist: &str) -> Result<Option<String>> {
        if self.access_token.is_empty() {
            return Ok(None);
        }

        let hits = self.search(title, artist).await?;
        let Some(hit) = pick_hit(&hits, artist) else {
            tracing::debug!("No Genius match for {title} - {artist}");
            return Ok(None);
        };

        tracing::debug!("Genius match: {} by {}", hit.title, hit.artist);
        self.fetch_lyrics(&hit.url).await
    }

    fn name(&self) -> &'static str {
        "Genius"
    }
}

/// Song hits from a search response, dropping non-song and excluded results.
fn parse_hits(json: &Value) -> Vec<SongHit> {
    let hits = json["response"]["hits"].as_array().map(Vec::as_slice).unwrap_or(&[]);

    hits.iter()
        .filter(|hit| hit["type"].as_str() == Some("song"))
        .filter_map(|hit| {
            let result = &hit["result"];
            let title = result["title"].as_str()?.to_string();
            if is_excluded(&title) {
                return None;
            }
            Some(SongHit {
                title,
                artist: result["primary_artist"]["name"].as_str().unwrap_or("").to_string(),
                url: result["url"].as_str()?.to_string(),
            })
        })
        .collect()
}

fn is_excluded(title: &str) -> bool {
    let lower = title.to_lowercase();
    RE_NON_SONG.is_match(title)
        || EXCLUDED_TERMS.iter().any(|term| lower.contains(&term.to_lowercase()))
}

/// Prefer a hit by the requested artist, else the first hit.
fn pick_hit<'a>(hits: &'a [SongHit], artist: &str) -> Option<&'a SongHit> {
    hits.iter()
        .find(|hit| hit.artist.eq_ignore_ascii_case(artist))
        .or_else(|| hits.first())
}

/// Plain text of all lyrics containers on a song page.
fn extract_lyrics(html: &str) -> Option<String> {
    let blocks: Vec<String> = RE_LYRICS_CONTAINER
        .captures_iter(html)
        .filter_map(|caps| caps.get(1))
        .map(|m| {
            let text = RE_BREAK.replace_all(m.as_str(), "\n");
            decode_entities(&RE_TAG.replace_all(&text, ""))
        })
        .collect();

    let lyrics = blocks.join("\n").trim().to_string();
    (!lyrics.is_empty()).then_some(lyrics)
}

fn decode_entities(text: &str) -> String {
    text.replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
