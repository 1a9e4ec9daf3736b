//! `lyricsync` - serves synchronized lyrics for the track playing on Spotify.

use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use tracing_subscriber::EnvFilter;

use lyricsync::config::Config;
use lyricsync::server::{self, AppState};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load()?;
    config.validate_spotify()?;

    if !config.lyrics_dir.is_dir() {
        tracing::warn!(
            "Lyrics directory {} does not exist; every track will show no synced lyrics",
            config.lyrics_dir.display()
        );
    }

    let state = web::Data::new(AppState::from_config(&config)?);

    tracing::info!(
        "{} {} listening on http://{}:{}",
        config.app_name(),
        config.app_version(),
        config.bind_addr,
        config.port
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .configure(server::configure)
    })
    .bind((config.bind_addr.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
