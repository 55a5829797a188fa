// tests/api_http.rs
// Router smoke tests over mock collaborators; no network involved.

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use news_buddy::api::{create_router, AppState};
use news_buddy::bias::BiasConfig;
use news_buddy::factcheck::MockSearchClient;
use news_buddy::model::{EnrichedItem, Mode};
use news_buddy::pipeline::Processor;
use news_buddy::translate::MockTranslator;
use news_buddy::tts::MockSpeech;
use tower::ServiceExt;

fn test_state(static_root: PathBuf) -> AppState {
    AppState {
        processor: Arc::new(Processor::new(
            Arc::new(MockSearchClient::canned(1)),
            Arc::new(MockTranslator),
            Arc::new(MockSpeech),
            BiasConfig::default_seed(),
            static_root.clone(),
        )),
        speech: Arc::new(MockSpeech),
        // No feeds configured → the news endpoint serves the demo fallback.
        feeds: Arc::new(Vec::new()),
        http: reqwest::Client::new(),
        static_root,
    }
}

async fn body_json<T: serde::de::DeserializeOwned>(resp: axum::response::Response) -> T {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_answers_ok() {
    let dir = tempfile::tempdir().unwrap();
    let router = create_router(test_state(dir.path().into()));
    let resp = router
        .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn news_returns_enriched_items() {
    let dir = tempfile::tempdir().unwrap();
    let router = create_router(test_state(dir.path().into()));
    let resp = router
        .oneshot(Request::get("/api/news").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let items: Vec<EnrichedItem> = body_json(resp).await;
    assert_eq!(items.len(), 1);
    let item = &items[0];
    assert_eq!(item.mode, Mode::Read);
    let bundle = item.agents.as_ref().expect("bundle");
    assert_eq!(bundle.verifier.label, "Verifier");
    assert_eq!(bundle.impact.label, "Impact");
    assert!(!item.summary.is_empty());
}

#[tokio::test]
async fn news_respects_mode_and_language_query() {
    let dir = tempfile::tempdir().unwrap();
    let router = create_router(test_state(dir.path().into()));
    let resp = router
        .oneshot(
            Request::get("/api/news?mode=listen&language=hi&limit=1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let items: Vec<EnrichedItem> = body_json(resp).await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].mode, Mode::Listen);
    assert_eq!(items[0].language, "hi");
    assert!(items[0].summary.starts_with("[hi] "));
    assert!(items[0].listen_url.is_some());
}

#[tokio::test]
async fn tts_endpoint_writes_audio() {
    let dir = tempfile::tempdir().unwrap();
    let router = create_router(test_state(dir.path().into()));
    let resp = router
        .oneshot(
            Request::post("/api/tts")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"text": "hello world"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let out: serde_json::Value = body_json(resp).await;
    let url = out["url"].as_str().unwrap();
    assert!(url.starts_with("/static/tts/"));
    let name = url.trim_start_matches("/static/tts/");
    assert!(dir.path().join("tts").join(name).exists());
}

#[tokio::test]
async fn tts_rejects_empty_text() {
    let dir = tempfile::tempdir().unwrap();
    let router = create_router(test_state(dir.path().into()));
    let resp = router
        .oneshot(
            Request::post("/api/tts")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"text": ""}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn slides_endpoint_renders_cards() {
    let dir = tempfile::tempdir().unwrap();
    let router = create_router(test_state(dir.path().into()));
    let resp = router
        .oneshot(
            Request::post("/api/slides")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"text": "First point. Second point."}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let out: serde_json::Value = body_json(resp).await;
    let urls = out["urls"].as_array().unwrap();
    assert_eq!(urls.len(), 2);
    for u in urls {
        let name = u.as_str().unwrap().trim_start_matches("/static/slides/");
        assert!(dir.path().join("slides").join(name).exists());
    }
}
