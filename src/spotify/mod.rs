//! Spotify integration.
//!
//! OAuth sign-in plus the playback-state endpoint used to find out which
//! track is playing and how far into it the listener is.

/// Web API client for playback state
pub mod api;
/// OAuth flow and token refresh
pub mod auth;

// Re-export key components
pub use api::SpotifyClient;
pub use auth::{SpotifyAuth, SpotifyToken};
