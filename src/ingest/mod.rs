// src/ingest/mod.rs
pub mod config;
pub mod providers;
pub mod types;

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge};
use once_cell::sync::OnceCell;

use crate::ingest::types::FeedProvider;
use crate::model::{Article, SourceMeta};
use crate::summarize::stable_id;

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("ingest_events_total", "Total articles parsed from feeds.");
        describe_counter!(
            "ingest_kept_total",
            "Articles kept after normalization + topic filtering."
        );
        describe_counter!(
            "ingest_filtered_total",
            "Articles dropped by the topic filter."
        );
        describe_counter!("ingest_provider_errors_total", "Feed fetch/parse errors.");
        describe_histogram!("ingest_parse_ms", "Feed parse time in milliseconds.");
        describe_gauge!(
            "ingest_last_run_ts",
            "Unix ts when article ingest last ran."
        );
    });
}

/// Normalize feed text: decode entities, strip tags, straighten quotes,
/// collapse whitespace. Sentence punctuation is kept; the summarizer
/// depends on it.
pub fn normalize_text(s: &str) -> String {
    // 1) HTML entity decode
    let mut out = html_escape::decode_html_entities(s).to_string();

    // 2) Strip HTML tags
    static RE_TAGS: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| regex::Regex::new(r"(?is)</?[^>]+>").unwrap());
    out = re_tags.replace_all(&out, "").to_string();

    // 3) Normalize “ ” ‘ ’ « » to ASCII quotes
    out = out
        .replace(['\u{201C}', '\u{201D}', '\u{00AB}', '\u{00BB}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'");

    // 4) Collapse whitespace
    static RE_WS: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| regex::Regex::new(r"\s+").unwrap());
    out = re_ws.replace_all(&out, " ").to_string();
    out = out.trim().to_string();

    // 5) Length cap: 5000 chars
    if out.chars().count() > 5000 {
        out = out.chars().take(5000).collect();
    }

    out
}

/// Lower-cased topic filters parsed from the request CSV, if any.
pub fn topic_filters(topics: Option<&str>) -> Option<Vec<String>> {
    let filters: Vec<String> = topics
        .unwrap_or_default()
        .split(',')
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();
    if filters.is_empty() {
        None
    } else {
        Some(filters)
    }
}

fn matches_topics(article: &Article, filters: &[String]) -> bool {
    let text = format!(
        "{} {}",
        article.title,
        article.content.as_deref().unwrap_or_default()
    )
    .to_lowercase();
    filters.iter().any(|t| text.contains(t.as_str()))
}

/// Deterministic stand-in article used when every feed comes back empty.
pub fn demo_article() -> Article {
    Article {
        id: stable_id("demo-item"),
        title: "Parliament passes key economic reform bill".to_string(),
        link: "https://example.com/demo".to_string(),
        source: SourceMeta {
            name: "Demo Source".to_string(),
            url: Some("https://example.com".to_string()),
            bias_label: None,
            reliability: None,
        },
        published: Some(chrono::Utc::now().to_rfc3339()),
        content: Some(
            "India's Parliament passed a significant economic reform bill aimed at simplifying \
             regulations and improving ease of doing business across states."
                .to_string(),
        ),
        category: None,
    }
}

/// Fetch up to `limit` articles across the providers, applying the topic
/// filter. Provider failures are logged and skipped; a totally failed
/// run falls back to the demo article rather than an error.
pub async fn fetch_articles(
    providers: &[Box<dyn FeedProvider>],
    limit: usize,
    topics: Option<&str>,
) -> Vec<Article> {
    ensure_metrics_described();

    let filters = topic_filters(topics);
    let mut items: Vec<Article> = Vec::new();
    let mut filtered_out = 0usize;

    'providers: for p in providers {
        let batch = match p.fetch_latest().await {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = ?e, provider = p.name(), "feed provider error");
                counter!("ingest_provider_errors_total").increment(1);
                continue;
            }
        };
        for candidate in batch {
            if let Some(f) = &filters {
                if !matches_topics(&candidate, f) {
                    filtered_out += 1;
                    continue;
                }
            }
            items.push(candidate);
            if items.len() >= limit {
                break 'providers;
            }
        }
    }

    let now = chrono::Utc::now().timestamp().max(0) as u64;
    counter!("ingest_kept_total").increment(items.len() as u64);
    counter!("ingest_filtered_total").increment(filtered_out as u64);
    gauge!("ingest_last_run_ts").set(now as f64);

    if items.is_empty() {
        items.push(demo_article());
    }
    items
}
