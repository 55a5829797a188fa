// src/ingest/providers/rss.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use metrics::{counter, histogram};
use quick_xml::de::from_str;
use serde::Deserialize;
use time::{
    format_description::well_known::{Rfc2822, Rfc3339},
    OffsetDateTime, UtcOffset,
};

use crate::ingest::normalize_text;
use crate::ingest::types::FeedProvider;
use crate::model::{Article, SourceMeta};
use crate::summarize::stable_id;

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    item: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    link: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    description: Option<String>,
}

fn parse_rfc2822_to_rfc3339(ts: &str) -> Option<String> {
    OffsetDateTime::parse(ts, &Rfc2822)
        .ok()
        .map(|dt| dt.to_offset(UtcOffset::UTC))
        .and_then(|dt| dt.format(&Rfc3339).ok())
}

/// Generic RSS feed provider driven by the feed config. Fetches over
/// HTTP, or parses fixture XML when built with `from_fixture` (tests).
pub struct RssFeedProvider {
    source_name: String,
    feed_url: String,
    fixture: Option<String>,
    http: reqwest::Client,
}

impl RssFeedProvider {
    pub fn new(source_name: &str, feed_url: &str, http: reqwest::Client) -> Self {
        Self {
            source_name: source_name.to_string(),
            feed_url: feed_url.to_string(),
            fixture: None,
            http,
        }
    }

    pub fn from_fixture(source_name: &str, feed_url: &str, content: &str) -> Self {
        Self {
            source_name: source_name.to_string(),
            feed_url: feed_url.to_string(),
            fixture: Some(content.to_string()),
            http: reqwest::Client::new(),
        }
    }

    async fn feed_xml(&self) -> Result<String> {
        if let Some(fixture) = &self.fixture {
            return Ok(fixture.clone());
        }
        let resp = self
            .http
            .get(&self.feed_url)
            .send()
            .await
            .with_context(|| format!("fetching feed {}", self.feed_url))?;
        if !resp.status().is_success() {
            anyhow::bail!("feed {} returned status {}", self.feed_url, resp.status());
        }
        resp.text().await.context("reading feed body")
    }
}

#[async_trait]
impl FeedProvider for RssFeedProvider {
    async fn fetch_latest(&self) -> Result<Vec<Article>> {
        let t0 = std::time::Instant::now();

        let xml = self.feed_xml().await?;
        let rss: Rss = from_str(&xml)
            .with_context(|| format!("parsing rss xml from {}", self.source_name))?;

        let mut out = Vec::with_capacity(rss.channel.item.len());
        for it in rss.channel.item {
            let title = normalize_text(it.title.as_deref().unwrap_or_default());
            let title = if title.is_empty() {
                "Untitled".to_string()
            } else {
                title
            };
            let link = it
                .link
                .as_deref()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .unwrap_or("https://example.com")
                .to_string();
            let content = it
                .description
                .as_deref()
                .map(normalize_text)
                .filter(|c| !c.is_empty());

            out.push(Article {
                id: stable_id(&format!("{title}-{link}")),
                title,
                link,
                source: SourceMeta {
                    name: self.source_name.clone(),
                    url: Some(self.feed_url.clone()),
                    bias_label: None,
                    reliability: None,
                },
                published: it.pub_date.as_deref().and_then(parse_rfc2822_to_rfc3339),
                content,
                category: None,
            });
        }

        let ms = t0.elapsed().as_secs_f64() * 1_000.0;
        histogram!("ingest_parse_ms").record(ms);
        counter!("ingest_events_total").increment(out.len() as u64);

        Ok(out)
    }

    fn name(&self) -> &str {
        &self.source_name
    }
}
