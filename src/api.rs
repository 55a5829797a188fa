// src/api.rs
//! HTTP surface. Handlers are thin adapters over the Processor and the
//! collaborators; no enrichment logic lives here.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, services::ServeDir};

use crate::ingest::config::{load_feeds_default, FeedSource};
use crate::ingest::providers::rss::RssFeedProvider;
use crate::ingest::types::FeedProvider;
use crate::ingest::fetch_articles;
use crate::model::{EnrichedItem, Mode};
use crate::pipeline::Processor;
use crate::slides::generate_slides;
use crate::tts::{build_speech_client, synthesize_speech, DynSpeechClient};

#[derive(Clone)]
pub struct AppState {
    pub processor: Arc<Processor>,
    pub speech: DynSpeechClient,
    pub feeds: Arc<Vec<FeedSource>>,
    pub http: reqwest::Client,
    pub static_root: PathBuf,
}

impl AppState {
    /// Env-configured state (see the collaborator factories for the
    /// `*_MODE` switches).
    pub fn from_env(static_root: PathBuf) -> Self {
        let feeds = load_feeds_default().unwrap_or_else(|e| {
            tracing::warn!(error = ?e, "feed config failed, using built-in seed");
            crate::ingest::config::default_seed()
        });
        let http = reqwest::Client::builder()
            .user_agent("news-buddy/0.1")
            .connect_timeout(std::time::Duration::from_secs(4))
            .timeout(std::time::Duration::from_secs(15))
            .build()
            .expect("reqwest client");
        Self {
            processor: Arc::new(Processor::from_env(static_root.clone())),
            speech: build_speech_client(),
            feeds: Arc::new(feeds),
            http,
            static_root,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let static_dir = ServeDir::new(state.static_root.clone());
    Router::new()
        .route("/api/health", get(|| async { "ok" }))
        .route("/api/news", get(get_news))
        .route("/api/tts", post(tts))
        .route("/api/slides", post(slides))
        .nest_service("/static", static_dir)
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

fn default_language() -> String {
    "en".to_string()
}

fn default_limit() -> usize {
    10
}

#[derive(Deserialize)]
struct NewsQuery {
    #[serde(default)]
    mode: Mode,
    #[serde(default = "default_language")]
    language: String,
    /// Comma-separated topics for personalization.
    topics: Option<String>,
    #[serde(default = "default_limit")]
    limit: usize,
}

async fn get_news(
    State(state): State<AppState>,
    Query(q): Query<NewsQuery>,
) -> Json<Vec<EnrichedItem>> {
    let limit = q.limit.clamp(1, 50);

    let providers: Vec<Box<dyn FeedProvider>> = state
        .feeds
        .iter()
        .map(|f| {
            Box::new(RssFeedProvider::new(&f.name, &f.url, state.http.clone()))
                as Box<dyn FeedProvider>
        })
        .collect();
    let articles = fetch_articles(&providers, limit, q.topics.as_deref()).await;

    let items = state
        .processor
        .process_batch(&articles, q.mode, &q.language, q.topics.as_deref())
        .await;
    Json(items)
}

#[derive(Deserialize)]
struct TtsRequest {
    text: String,
    #[serde(default = "default_language")]
    language: String,
}

#[derive(Serialize)]
struct TtsResponse {
    url: String,
    path: String,
}

async fn tts(
    State(state): State<AppState>,
    Json(req): Json<TtsRequest>,
) -> Result<Json<TtsResponse>, (StatusCode, String)> {
    let url = synthesize_speech(
        state.speech.as_ref(),
        &req.text,
        &req.language,
        &state.static_root,
    )
    .await
    .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    let path = state
        .static_root
        .join(url.trim_start_matches("/static/"))
        .display()
        .to_string();
    Ok(Json(TtsResponse { url, path }))
}

#[derive(Deserialize)]
struct SlidesRequest {
    text: String,
    #[serde(default = "default_language")]
    language: String,
}

#[derive(Serialize)]
struct SlidesResponse {
    urls: Vec<String>,
    paths: Vec<String>,
}

async fn slides(
    State(state): State<AppState>,
    Json(req): Json<SlidesRequest>,
) -> Result<Json<SlidesResponse>, (StatusCode, String)> {
    let urls = generate_slides(&req.text, &req.language, &state.static_root)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    let paths = urls
        .iter()
        .map(|u| {
            state
                .static_root
                .join(u.trim_start_matches("/static/"))
                .display()
                .to_string()
        })
        .collect();
    Ok(Json(SlidesResponse { urls, paths }))
}
