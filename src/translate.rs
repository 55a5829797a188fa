// src/translate.rs
//! Translation collaborator. Identity when the target is the source
//! language; any provider failure degrades to the untranslated text.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use metrics::counter;

/// External translator. Concurrent-safe; one instance shared per app.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, target_language: &str) -> Result<String>;
    fn provider_name(&self) -> &'static str;
}

pub type DynTranslator = Arc<dyn Translator>;

/// Factory: `TRANSLATE_MODE=mock` → tagged mock, `=disabled` → identity,
/// otherwise the Google endpoint provider.
pub fn build_translator() -> DynTranslator {
    match std::env::var("TRANSLATE_MODE").as_deref() {
        Ok("mock") => Arc::new(MockTranslator),
        Ok("disabled") => Arc::new(DisabledTranslator),
        _ => Arc::new(GoogleTranslateClient::new()),
    }
}

/// Degrading wrapper the pipeline calls.
///
/// - empty text → empty
/// - target "en" (any case) → identity
/// - provider error or empty reply → untranslated input
pub async fn translate_text(translator: &dyn Translator, text: &str, target_language: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    if target_language.eq_ignore_ascii_case("en") {
        return text.to_string();
    }
    match translator.translate(text, target_language).await {
        Ok(t) if !t.is_empty() => t,
        Ok(_) => text.to_string(),
        Err(e) => {
            counter!("translate_errors_total").increment(1);
            tracing::warn!(error = ?e, provider = translator.provider_name(), target_language, "translation failed, keeping original");
            text.to_string()
        }
    }
}

/// Unofficial Google translate endpoint (the `gtx` client). Replies with
/// nested JSON arrays, decoded loosely via `serde_json::Value`.
pub struct GoogleTranslateClient {
    http: reqwest::Client,
}

impl GoogleTranslateClient {
    pub fn new() -> Self {
        let http = reqwest::Client::builder()
            .user_agent("news-buddy/0.1")
            .connect_timeout(Duration::from_secs(4))
            .timeout(Duration::from_secs(10))
            .build()
            .expect("reqwest client");
        Self { http }
    }
}

impl Default for GoogleTranslateClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Translator for GoogleTranslateClient {
    async fn translate(&self, text: &str, target_language: &str) -> Result<String> {
        let resp = self
            .http
            .get("https://translate.googleapis.com/translate_a/single")
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target_language),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .context("translate request")?;

        if !resp.status().is_success() {
            anyhow::bail!("translate returned status {}", resp.status());
        }
        let body: serde_json::Value = resp.json().await.context("translate response body")?;

        // Shape: [[["chunk", "original", ...], ...], ...]; concatenate the
        // first element of each segment.
        let mut out = String::new();
        if let Some(segments) = body.get(0).and_then(|v| v.as_array()) {
            for seg in segments {
                if let Some(chunk) = seg.get(0).and_then(|v| v.as_str()) {
                    out.push_str(chunk);
                }
            }
        }
        Ok(out)
    }

    fn provider_name(&self) -> &'static str {
        "google-gtx"
    }
}

/// Identity provider for environments without outbound network.
pub struct DisabledTranslator;

#[async_trait]
impl Translator for DisabledTranslator {
    async fn translate(&self, text: &str, _target_language: &str) -> Result<String> {
        Ok(text.to_string())
    }
    fn provider_name(&self) -> &'static str {
        "disabled"
    }
}

/// Deterministic mock: tags the text with the target language.
pub struct MockTranslator;

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(&self, text: &str, target_language: &str) -> Result<String> {
        Ok(format!("[{target_language}] {text}"))
    }
    fn provider_name(&self) -> &'static str {
        "mock"
    }
}
