// src/tts.rs
//! Speech-synthesis collaborator: turns a summary into an MP3 under
//! `static/tts/` and returns its public URL.
//!
//! Provider failure still yields a URL over an empty placeholder file;
//! only empty input is an error to the caller.

use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use metrics::counter;

use crate::summarize::stable_id;

/// Fetches raw audio bytes for a text in a language.
#[async_trait]
pub trait SpeechClient: Send + Sync {
    async fn fetch_audio(&self, text: &str, language: &str) -> Result<Vec<u8>>;
    fn provider_name(&self) -> &'static str;
}

pub type DynSpeechClient = Arc<dyn SpeechClient>;

/// Factory: `TTS_MODE=mock` → fixed bytes, `=disabled` → always-failing
/// provider (placeholders only), otherwise the Google TTS endpoint.
pub fn build_speech_client() -> DynSpeechClient {
    match std::env::var("TTS_MODE").as_deref() {
        Ok("mock") => Arc::new(MockSpeech),
        Ok("disabled") => Arc::new(DisabledSpeech),
        _ => Arc::new(GoogleTtsClient::new()),
    }
}

/// Synthesize speech for `text`, writing the asset under
/// `<static_root>/tts/` and returning its `/static/...` URL.
pub async fn synthesize_speech(
    client: &dyn SpeechClient,
    text: &str,
    language: &str,
    static_root: &Path,
) -> Result<String> {
    if text.is_empty() {
        anyhow::bail!("no text provided for speech synthesis");
    }
    let dir = static_root.join("tts");
    fs::create_dir_all(&dir).context("creating tts dir")?;

    let lang = if language.is_empty() { "en" } else { language };
    let filename = format!(
        "{}-{}.mp3",
        stable_id(text),
        chrono::Utc::now().timestamp_millis()
    );
    let path = dir.join(&filename);

    match client.fetch_audio(text, lang).await {
        Ok(bytes) => write_atomic(&path, &bytes)?,
        Err(e) => {
            counter!("tts_errors_total").increment(1);
            tracing::warn!(error = ?e, provider = client.provider_name(), "speech synthesis failed, writing placeholder");
            write_atomic(&path, &[])?;
        }
    }
    Ok(format!("/static/tts/{filename}"))
}

fn write_atomic(path: &PathBuf, bytes: &[u8]) -> Result<()> {
    let tmp = path.with_extension("mp3.tmp");
    let mut f = fs::File::create(&tmp).context("creating audio file")?;
    f.write_all(bytes).context("writing audio file")?;
    fs::rename(&tmp, path).context("renaming audio file")?;
    Ok(())
}

/// Google translate TTS endpoint (same service the original spoke to).
/// The endpoint rejects long inputs, so the text is capped.
pub struct GoogleTtsClient {
    http: reqwest::Client,
}

const MAX_TTS_CHARS: usize = 200;

impl GoogleTtsClient {
    pub fn new() -> Self {
        let http = reqwest::Client::builder()
            .user_agent("news-buddy/0.1")
            .connect_timeout(Duration::from_secs(4))
            .timeout(Duration::from_secs(15))
            .build()
            .expect("reqwest client");
        Self { http }
    }
}

impl Default for GoogleTtsClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeechClient for GoogleTtsClient {
    async fn fetch_audio(&self, text: &str, language: &str) -> Result<Vec<u8>> {
        let capped: String = text.chars().take(MAX_TTS_CHARS).collect();
        let resp = self
            .http
            .get("https://translate.google.com/translate_tts")
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", language),
                ("q", capped.as_str()),
            ])
            .send()
            .await
            .context("tts request")?;
        if !resp.status().is_success() {
            anyhow::bail!("tts returned status {}", resp.status());
        }
        let bytes = resp.bytes().await.context("tts response body")?;
        Ok(bytes.to_vec())
    }

    fn provider_name(&self) -> &'static str {
        "google-tts"
    }
}

/// Always fails; `synthesize_speech` degrades to placeholder files.
pub struct DisabledSpeech;

#[async_trait]
impl SpeechClient for DisabledSpeech {
    async fn fetch_audio(&self, _text: &str, _language: &str) -> Result<Vec<u8>> {
        anyhow::bail!("speech synthesis disabled")
    }
    fn provider_name(&self) -> &'static str {
        "disabled"
    }
}

/// Fixed small payload for tests.
pub struct MockSpeech;

#[async_trait]
impl SpeechClient for MockSpeech {
    async fn fetch_audio(&self, _text: &str, _language: &str) -> Result<Vec<u8>> {
        Ok(b"ID3mock".to_vec())
    }
    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_text_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = synthesize_speech(&MockSpeech, "", "en", dir.path()).await;
        assert!(err.is_err());
    }

    #[tokio::test]
    async fn mock_audio_lands_on_disk_with_url() {
        let dir = tempfile::tempdir().unwrap();
        let url = synthesize_speech(&MockSpeech, "hello world", "en", dir.path())
            .await
            .unwrap();
        assert!(url.starts_with("/static/tts/"));
        assert!(url.ends_with(".mp3"));
        let name = url.trim_start_matches("/static/tts/");
        let bytes = fs::read(dir.path().join("tts").join(name)).unwrap();
        assert_eq!(bytes, b"ID3mock");
    }

    #[tokio::test]
    async fn failing_provider_still_returns_a_placeholder_url() {
        let dir = tempfile::tempdir().unwrap();
        let url = synthesize_speech(&DisabledSpeech, "hello", "en", dir.path())
            .await
            .unwrap();
        let name = url.trim_start_matches("/static/tts/");
        let bytes = fs::read(dir.path().join("tts").join(name)).unwrap();
        assert!(bytes.is_empty());
    }
}
