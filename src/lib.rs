//! `lyricsync` - synchronized lyrics for the track playing on Spotify.
//!
//! The core is the timed-lyrics engine in [`lyrics`]: it parses `.lrc` files
//! and maps a playback position to the active line plus context. The other
//! modules connect it to Spotify, Genius and a small HTTP server.

// Re-export public modules for use in integration tests and as a library
pub mod config;
pub mod constants;
pub mod error;
pub mod genius;
pub mod lyrics;
pub mod server;
pub mod services;
pub mod spotify;
pub mod types;
