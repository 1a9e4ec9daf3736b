//! Application constants.
//!
//! Centralizes endpoints, defaults and other fixed values.

/// Spotify endpoints and OAuth settings.
pub mod spotify {
    /// OAuth authorization endpoint.
    pub const AUTH_URL: &str = "https://accounts.spotify.com/authorize";

    /// OAuth token endpoint.
    pub const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

    /// Web API base URL.
    pub const API_BASE_URL: &str = "https://api.spotify.com/v1";

    /// Scopes needed to read what is playing.
    pub const SCOPES: &[&str] = &["user-read-playback-state", "user-read-currently-playing"];

    /// Refresh tokens this many seconds before they actually expire.
    pub const EXPIRY_MARGIN_SECS: i64 = 60;
}

/// Genius endpoints and search filtering.
pub mod genius {
    /// Web API base URL.
    pub const API_BASE_URL: &str = "https://api.genius.com";

    /// Hits whose title contains any of these are ignored.
    pub const EXCLUDED_TERMS: &[&str] = &["(Remix)", "(Live)"];
}

/// Lyrics file lookup.
pub mod lyrics {
    /// Default directory holding `.lrc` files.
    pub const DEFAULT_DIR: &str = "lyrics";

    /// Extension of timed-lyrics files.
    pub const FILE_EXTENSION: &str = "lrc";
}

/// HTTP client and server defaults.
pub mod http {
    /// Timeout for outgoing API requests, in seconds.
    pub const REQUEST_TIMEOUT_SECS: u64 = 10;

    /// Default bind address.
    pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1";

    /// Default listening port.
    pub const DEFAULT_PORT: u16 = 5000;
}

/// Placeholder values shown by `/now_playing`.
pub mod display {
    /// Song title shown when nothing is playing.
    pub const NOTHING_PLAYING: &str = "Nothing playing";

    /// Song title shown when the playback lookup failed.
    pub const ERROR: &str = "Error";
}
