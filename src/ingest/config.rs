// src/ingest/config.rs
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const ENV_PATH: &str = "INGEST_FEEDS_PATH";

/// One configured feed.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct FeedSource {
    pub name: String,
    pub url: String,
}

/// Load the feed list from an explicit path. Supports TOML or JSON.
pub fn load_feeds_from(path: &Path) -> Result<Vec<FeedSource>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading feed config from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    parse_feeds(&content, ext.as_str())
}

/// Load the feed list using env var + fallbacks:
/// 1) $INGEST_FEEDS_PATH
/// 2) config/feeds.toml
/// 3) config/feeds.json
/// 4) built-in seed
pub fn load_feeds_default() -> Result<Vec<FeedSource>> {
    if let Ok(p) = std::env::var(ENV_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_feeds_from(&pb);
        } else {
            return Err(anyhow!("INGEST_FEEDS_PATH points to non-existent path"));
        }
    }
    let toml_p = PathBuf::from("config/feeds.toml");
    if toml_p.exists() {
        return load_feeds_from(&toml_p);
    }
    let json_p = PathBuf::from("config/feeds.json");
    if json_p.exists() {
        return load_feeds_from(&json_p);
    }
    Ok(default_seed())
}

/// Curated initial Indian news RSS sources.
pub fn default_seed() -> Vec<FeedSource> {
    let seed = [
        ("The Hindu", "https://www.thehindu.com/news/feeder/default.rss"),
        ("Indian Express", "https://indianexpress.com/section/india/feed/"),
        (
            "Hindustan Times",
            "https://www.hindustantimes.com/feeds/rss/india-news/rssfeed.xml",
        ),
        ("NDTV", "https://feeds.feedburner.com/ndtvnews-top-stories"),
        (
            "Times of India",
            "https://timesofindia.indiatimes.com/rssfeedstopstories.cms",
        ),
        ("Aaj Tak", "https://www.aajtak.in/rssfeeds/?id=home"),
    ];
    seed.into_iter()
        .map(|(name, url)| FeedSource {
            name: name.to_string(),
            url: url.to_string(),
        })
        .collect()
}

fn parse_feeds(s: &str, hint_ext: &str) -> Result<Vec<FeedSource>> {
    let try_toml = hint_ext == "toml" || s.contains("[[feeds]]");
    if try_toml {
        if let Ok(v) = parse_toml(s) {
            return Ok(v);
        }
    }
    if let Ok(v) = parse_json(s) {
        return Ok(v);
    }
    if !try_toml {
        if let Ok(v) = parse_toml(s) {
            return Ok(v);
        }
    }
    Err(anyhow!("unsupported feed config format"))
}

fn parse_toml(s: &str) -> Result<Vec<FeedSource>> {
    #[derive(serde::Deserialize)]
    struct TomlFeeds {
        feeds: Vec<FeedSource>,
    }
    let v: TomlFeeds = toml::from_str(s)?;
    Ok(clean_list(v.feeds))
}

fn parse_json(s: &str) -> Result<Vec<FeedSource>> {
    let v: Vec<FeedSource> = serde_json::from_str(s)?;
    Ok(clean_list(v))
}

fn clean_list(items: Vec<FeedSource>) -> Vec<FeedSource> {
    items
        .into_iter()
        .filter(|f| !f.name.trim().is_empty() && !f.url.trim().is_empty())
        .collect()
}
