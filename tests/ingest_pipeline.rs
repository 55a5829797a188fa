// tests/ingest_pipeline.rs
// Feed collection: provider traversal, topic filtering, the limit cap,
// and the demo fallback when every provider fails.

use anyhow::Result;
use async_trait::async_trait;
use news_buddy::ingest::types::FeedProvider;
use news_buddy::ingest::{demo_article, fetch_articles};
use news_buddy::model::{Article, SourceMeta};

struct StaticProvider {
    name: &'static str,
    items: Vec<Article>,
}

impl StaticProvider {
    fn with_titles(name: &'static str, titles: &[&str]) -> Self {
        let items = titles
            .iter()
            .map(|t| Article {
                id: news_buddy::summarize::stable_id(t),
                title: t.to_string(),
                link: format!("https://example.test/{}", t.len()),
                source: SourceMeta::named(name),
                published: None,
                content: None,
                category: None,
            })
            .collect();
        Self { name, items }
    }
}

#[async_trait]
impl FeedProvider for StaticProvider {
    async fn fetch_latest(&self) -> Result<Vec<Article>> {
        Ok(self.items.clone())
    }
    fn name(&self) -> &str {
        self.name
    }
}

struct BrokenProvider;

#[async_trait]
impl FeedProvider for BrokenProvider {
    async fn fetch_latest(&self) -> Result<Vec<Article>> {
        anyhow::bail!("feed unreachable")
    }
    fn name(&self) -> &str {
        "Broken"
    }
}

#[tokio::test]
async fn collects_across_providers_up_to_limit() {
    let providers: Vec<Box<dyn FeedProvider>> = vec![
        Box::new(StaticProvider::with_titles("A", &["one", "two"])),
        Box::new(StaticProvider::with_titles("B", &["three", "four"])),
    ];
    let got = fetch_articles(&providers, 3, None).await;
    assert_eq!(got.len(), 3);
    assert_eq!(got[0].source.name, "A");
    assert_eq!(got[2].source.name, "B");
}

#[tokio::test]
async fn topic_filter_matches_title_case_insensitively() {
    let providers: Vec<Box<dyn FeedProvider>> = vec![Box::new(StaticProvider::with_titles(
        "A",
        &["Cricket final tonight", "Budget session opens"],
    ))];
    let got = fetch_articles(&providers, 10, Some("CRICKET")).await;
    assert_eq!(got.len(), 1);
    assert_eq!(got[0].title, "Cricket final tonight");
}

#[tokio::test]
async fn broken_provider_is_skipped_not_fatal() {
    let providers: Vec<Box<dyn FeedProvider>> = vec![
        Box::new(BrokenProvider),
        Box::new(StaticProvider::with_titles("B", &["survivor"])),
    ];
    let got = fetch_articles(&providers, 10, None).await;
    assert_eq!(got.len(), 1);
    assert_eq!(got[0].title, "survivor");
}

#[tokio::test]
async fn total_failure_falls_back_to_the_demo_article() {
    let providers: Vec<Box<dyn FeedProvider>> = vec![Box::new(BrokenProvider)];
    let got = fetch_articles(&providers, 10, None).await;
    assert_eq!(got.len(), 1);
    assert_eq!(got[0].id, demo_article().id);
}

#[tokio::test]
async fn no_providers_also_falls_back() {
    let providers: Vec<Box<dyn FeedProvider>> = Vec::new();
    let got = fetch_articles(&providers, 5, None).await;
    assert_eq!(got.len(), 1);
    assert_eq!(got[0].source.name, "Demo Source");
}
