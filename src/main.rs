//! News Buddy — Binary Entrypoint
//! Boots the Axum HTTP server, wiring routes, shared state, and middleware.

use std::fs;
use std::path::PathBuf;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use news_buddy::api::{create_router, AppState};
use news_buddy::metrics::Metrics;

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("news_buddy=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    init_tracing();

    // Generated assets (tts audio, slide cards) are served from here.
    let static_root = std::env::var("STATIC_ROOT")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("static"));
    fs::create_dir_all(static_root.join("tts"))?;
    fs::create_dir_all(static_root.join("slides"))?;

    let metrics = Metrics::init();

    let state = AppState::from_env(static_root);
    let router = create_router(state).merge(metrics.router());

    let addr = std::env::var("NEWS_BUDDY_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());
    tracing::info!(%addr, "news-buddy listening");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}
