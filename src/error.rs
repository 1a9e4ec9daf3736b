//! Application error types.
//!
//! The lyrics engine itself never fails on bad data; these errors belong to
//! the collaborators around it (Spotify, Genius, configuration, file IO) and
//! are caught at the HTTP boundary.

use thiserror::Error;

/// Application result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types with specific context for actionable debugging
#[derive(Debug, Error)]
pub enum Error {
    /// IO error with path context
    #[error("IO error at {path:?}: {source}")]
    Io {
        /// The underlying IO error.
        source: std::io::Error,
        /// File path where the error occurred, if known.
        path: Option<std::path::PathBuf>,
    },

    /// Network error (connection, timeout, DNS)
    #[error("Network error: {0}")]
    Network(String),

    /// Spotify Web API error with status context
    #[error("Spotify API error: {message}")]
    Spotify {
        /// Human-readable error description.
        message: String,
        /// HTTP status code, if from an HTTP response.
        status: Option<u16>,
        /// Actionable suggestion for resolving the error.
        hint: Option<&'static str>,
    },

    /// Genius API error
    #[error("Genius API error: {message}")]
    Genius {
        /// Human-readable error description.
        message: String,
        /// HTTP status code, if from an HTTP response.
        status: Option<u16>,
    },

    /// OAuth flow failure (bad state, code exchange, refresh)
    #[error("Authorization failed: {0}")]
    Auth(String),

    /// Configuration error with guidance
    #[error("Configuration error: {message}. {hint}")]
    Config {
        /// Description of the configuration problem.
        message: String,
        /// Actionable guidance for fixing the issue.
        hint: &'static str,
    },

    /// Response or file parsing error
    #[error("Parse error in {file:?}: {message}")]
    Parse {
        /// File that failed to parse, if known.
        file: Option<std::path::PathBuf>,
        /// Description of the parse failure.
        message: String,
    },
}

impl Error {
    /// Create an IO error with path context
    pub fn io(source: std::io::Error, path: impl Into<Option<std::path::PathBuf>>) -> Self {
        Self::Io { source, path: path.into() }
    }

    /// Create a Spotify error with HTTP status and a hint for common statuses
    pub fn spotify_status(message: impl Into<String>, status: u16) -> Self {
        let hint = match status {
            401 => Some("Access token expired or revoked - visit /login again"),
            403 => Some("The granted scopes do not cover playback state"),
            404 => Some("No active Spotify device found"),
            429 => Some("Rate limited - slow down the polling interval"),
            500..=599 => Some("Spotify server error - try again later"),
            _ => None,
        };
        Self::Spotify {
            message: message.into(),
            status: Some(status),
            hint,
        }
    }

    /// Create a Genius error with HTTP status
    pub fn genius_status(message: impl Into<String>, status: u16) -> Self {
        Self::Genius { message: message.into(), status: Some(status) }
    }

    /// Create a config error with actionable hint
    pub fn config(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Config { message: message.into(), hint }
    }

    /// Create a parse error with file context
    pub fn parse(message: impl Into<String>, file: impl Into<Option<std::path::PathBuf>>) -> Self {
        Self::Parse { file: file.into(), message: message.into() }
    }
}

// Convenience conversions
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io { source: e, path: None }
    }
}
