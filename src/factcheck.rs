// src/factcheck.rs
//! Fact-search collaborator + the direct fact-scan operation.
//!
//! Provider abstraction mirrors the rest of the app: a trait object the
//! pipeline holds as `Arc<dyn SearchClient>`, one real HTTP provider, a
//! disabled client, and a deterministic mock for tests. The scan itself
//! never fails outward: a dead or empty search degrades to zero sources
//! and the floor confidence.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use metrics::counter;
use serde::Deserialize;

use crate::model::{FactCheck, FactSource};

/// News domains the narrowed first-pass query is restricted to.
pub const TRUSTED_DOMAINS: [&str; 3] = [
    "indiatoday.in",
    "timesofindia.indiatimes.com",
    "thehindu.com",
];

/// Fixed advisory line; the sources carry the substantive evidence.
pub const SCAN_ADVISORY: &str =
    "Automated initial fact scan completed. Verify details by visiting the linked sources.";

/// External web search used by the Verifier. Must be safe for concurrent
/// invocation across articles.
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Result ordering is the collaborator's own; no relevance guarantee.
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<FactSource>>;
    /// Provider name for diagnostics.
    fn provider_name(&self) -> &'static str;
}

/// Convenient alias used by callers.
pub type DynSearchClient = Arc<dyn SearchClient>;

/// Factory: build a client according to environment.
///
/// * `FACT_SEARCH_MODE=mock`     → deterministic mock (two canned sources).
/// * `FACT_SEARCH_MODE=disabled` → always-empty client.
/// * otherwise                   → DuckDuckGo instant-answer provider.
pub fn build_search_client() -> DynSearchClient {
    match std::env::var("FACT_SEARCH_MODE").as_deref() {
        Ok("mock") => Arc::new(MockSearchClient::canned(2)),
        Ok("disabled") => Arc::new(DisabledSearch),
        _ => Arc::new(DuckDuckGoClient::new()),
    }
}

/// Confidence is a monotone function of how many sources came back,
/// capped at 0.95. Zero sources is exactly the 0.3 floor.
pub fn confidence_for(source_count: usize) -> f32 {
    (0.3 + 0.2 * source_count as f32).min(0.95)
}

/// First-pass query: narrow to trusted domains plus a "fact check" hint.
pub fn trusted_query(claim: &str) -> String {
    let sites = TRUSTED_DOMAINS
        .iter()
        .map(|d| format!("site:{d}"))
        .collect::<Vec<_>>()
        .join(" OR ");
    format!("{sites} fact check {claim}")
}

/// Direct fact scan over a claim (typically the article title).
///
/// Narrowed query first; if that yields nothing, one broadened,
/// domain-unrestricted retry. Search errors degrade to an empty source
/// list, so the result is always produced.
pub async fn fact_check_title(search: &dyn SearchClient, claim: &str) -> FactCheck {
    let mut sources = match search.search(&trusted_query(claim), 4).await {
        Ok(s) => s,
        Err(e) => {
            counter!("fact_search_errors_total").increment(1);
            tracing::warn!(error = ?e, provider = search.provider_name(), "narrowed fact search failed");
            Vec::new()
        }
    };
    if sources.is_empty() {
        sources = match search.search(claim, 3).await {
            Ok(s) => s,
            Err(e) => {
                counter!("fact_search_errors_total").increment(1);
                tracing::warn!(error = ?e, provider = search.provider_name(), "broadened fact search failed");
                Vec::new()
            }
        };
    }

    FactCheck {
        confidence: confidence_for(sources.len()),
        summary: SCAN_ADVISORY.to_string(),
        sources,
    }
}

// ------------------------------------------------------------
// Providers
// ------------------------------------------------------------

/// DuckDuckGo instant-answer API. No key required; returns abstract +
/// related-topic links which we map to citations.
pub struct DuckDuckGoClient {
    http: reqwest::Client,
}

impl DuckDuckGoClient {
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

impl Default for DuckDuckGoClient {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct DdgResponse {
    #[serde(rename = "Heading", default)]
    heading: String,
    #[serde(rename = "AbstractText", default)]
    abstract_text: String,
    #[serde(rename = "AbstractURL", default)]
    abstract_url: String,
    #[serde(rename = "RelatedTopics", default)]
    related_topics: Vec<DdgTopic>,
}

#[derive(Debug, Deserialize)]
struct DdgTopic {
    #[serde(rename = "FirstURL")]
    first_url: Option<String>,
    #[serde(rename = "Text")]
    text: Option<String>,
    /// Grouped topics nest one level deeper.
    #[serde(rename = "Topics", default)]
    topics: Vec<DdgTopic>,
}

fn collect_topics(topics: &[DdgTopic], out: &mut Vec<FactSource>, max_results: usize) {
    for t in topics {
        if out.len() >= max_results {
            return;
        }
        if let Some(url) = t.first_url.as_deref().filter(|u| !u.is_empty()) {
            let text = t.text.as_deref().unwrap_or("Source");
            out.push(FactSource {
                title: text.to_string(),
                url: url.to_string(),
                snippet: t.text.clone(),
            });
        }
        if !t.topics.is_empty() {
            collect_topics(&t.topics, out, max_results);
        }
    }
}

#[async_trait]
impl SearchClient for DuckDuckGoClient {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<FactSource>> {
        let resp = self
            .http
            .get("https://api.duckduckgo.com/")
            .query(&[
                ("q", query),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
            ])
            .send()
            .await
            .context("fact search request")?;

        if !resp.status().is_success() {
            anyhow::bail!("fact search returned status {}", resp.status());
        }
        let body: DdgResponse = resp.json().await.context("fact search response body")?;

        let mut out = Vec::new();
        if !body.abstract_url.is_empty() {
            out.push(FactSource {
                title: if body.heading.is_empty() {
                    "Source".to_string()
                } else {
                    body.heading.clone()
                },
                url: body.abstract_url.clone(),
                snippet: if body.abstract_text.is_empty() {
                    None
                } else {
                    Some(body.abstract_text.clone())
                },
            });
        }
        collect_topics(&body.related_topics, &mut out, max_results);
        out.truncate(max_results);
        Ok(out)
    }

    fn provider_name(&self) -> &'static str {
        "duckduckgo"
    }
}

/// Always returns no sources; used when search is switched off.
pub struct DisabledSearch;

#[async_trait]
impl SearchClient for DisabledSearch {
    async fn search(&self, _query: &str, _max_results: usize) -> Result<Vec<FactSource>> {
        Ok(Vec::new())
    }
    fn provider_name(&self) -> &'static str {
        "disabled"
    }
}

/// Deterministic client for tests/local runs.
#[derive(Clone, Default)]
pub struct MockSearchClient {
    pub fixed: Vec<FactSource>,
}

impl MockSearchClient {
    pub fn canned(n: usize) -> Self {
        let fixed = (1..=n)
            .map(|i| FactSource {
                title: format!("Canned source {i}"),
                url: format!("https://example.test/fact/{i}"),
                snippet: Some("mock snippet".to_string()),
            })
            .collect();
        Self { fixed }
    }
}

#[async_trait]
impl SearchClient for MockSearchClient {
    async fn search(&self, _query: &str, max_results: usize) -> Result<Vec<FactSource>> {
        let mut out = self.fixed.clone();
        out.truncate(max_results);
        Ok(out)
    }
    fn provider_name(&self) -> &'static str {
        "mock"
    }
}
