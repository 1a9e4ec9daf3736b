use actix_web::http::header;
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::constants::display::{ERROR, NOTHING_PLAYING};
use crate::error::{Error, Result};
use crate::lyrics::{PlaybackQuery, ResolvedContext};
use crate::server::AppState;
use crate::types::NowPlaying;

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// Query parameters Spotify sends back to the redirect URI
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    /// Authorization code on success
    pub code: Option<String>,
    /// CSRF state echoed back
    pub state: Option<String>,
    /// Error code when the user declined
    pub error: Option<String>,
}

/// Body of `/now_playing`
#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct NowPlayingResponse {
    /// Track title, or a placeholder
    pub song: String,
    /// Primary artist
    pub artist: String,
    /// Album name
    pub album: String,
    /// Album cover URL
    pub album_art: String,
    /// Plain lyrics from the search backend
    pub lyrics: String,
    /// Synced line at the current position
    pub current_lyric: String,
}

impl NowPlayingResponse {
    fn placeholder(song: &str) -> Self {
        Self { song: song.to_string(), ..Self::default() }
    }
}

fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Playing track, with upstream failures logged and reported as `Err`.
async fn playing_track(state: &AppState) -> std::result::Result<Option<NowPlaying>, ()> {
    match state.playback.current_playback().await {
        Ok(np) => Ok(np.filter(|np| np.is_playing)),
        Err(e) => {
            tracing::warn!("{} playback lookup failed: {e}", state.playback.name());
            Err(())
        }
    }
}

fn resolve_now(state: &AppState, np: &NowPlaying) -> ResolvedContext {
    state.store.resolve_for(
        &np.track_key(),
        PlaybackQuery::new(np.progress_ms),
        state.scan_policy,
    )
}

/// `GET /`: the polling page, or a redirect to sign in.
pub async fn index(state: web::Data<AppState>) -> HttpResponse {
    if !state.playback.is_authorized() {
        return redirect("/login");
    }
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_HTML)
}

/// `GET /login`: send the browser to Spotify.
pub async fn login(state: web::Data<AppState>) -> HttpResponse {
    redirect(&state.auth.authorize_url())
}

/// `GET /callback`: finish sign-in.
pub async fn callback(
    state: web::Data<AppState>,
    params: web::Query<CallbackParams>,
) -> Result<HttpResponse> {
    let params = params.into_inner();
    if let Some(error) = params.error {
        return Err(Error::Auth(format!("Spotify denied access: {error}")));
    }
    let code = params
        .code
        .ok_or_else(|| Error::Auth("Missing authorization code".into()))?;

    state.auth.handle_callback(&code, params.state.as_deref()).await?;
    Ok(redirect("/"))
}

/// `GET /now_playing`: track details, plain lyrics and the current line.
pub async fn now_playing(state: web::Data<AppState>) -> HttpResponse {
    if !state.playback.is_authorized() {
        return HttpResponse::Unauthorized().json(serde_json::json!({ "error": "Not signed in" }));
    }

    let np = match playing_track(&state).await {
        Ok(Some(np)) => np,
        Ok(None) => return HttpResponse::Ok().json(NowPlayingResponse::placeholder(NOTHING_PLAYING)),
        Err(()) => return HttpResponse::Ok().json(NowPlayingResponse::placeholder(ERROR)),
    };

    let current_lyric = resolve_now(&state, &np).current;

    let lyrics = match state.lyrics_search.search_lyrics(&np.title, &np.artist).await {
        Ok(lyrics) => lyrics.unwrap_or_default(),
        Err(e) => {
            tracing::warn!("{} lyrics search failed: {e}", state.lyrics_search.name());
            String::new()
        }
    };

    HttpResponse::Ok().json(NowPlayingResponse {
        song: np.title,
        artist: np.artist,
        album: np.album,
        album_art: np.album_art.unwrap_or_default(),
        lyrics,
        current_lyric,
    })
}

/// `GET /current_line`: the resolved context for the current position.
///
/// Always answers with the four fields; anything that goes wrong upstream
/// shows up as empty lines.
pub async fn current_line(state: web::Data<AppState>) -> HttpResponse {
    let context = if state.playback.is_authorized() {
        match playing_track(&state).await {
            Ok(Some(np)) => resolve_now(&state, &np),
            Ok(None) | Err(()) => ResolvedContext::default(),
        }
    } else {
        ResolvedContext::default()
    };

    HttpResponse::Ok().json(context)
}
