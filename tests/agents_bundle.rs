// tests/agents_bundle.rs
// Bundle completeness, verifier confidence behavior, and fan-out
// independence across the four analyzers.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use news_buddy::agents::run_agents;
use news_buddy::factcheck::{MockSearchClient, SearchClient};
use news_buddy::model::{Article, FactSource, SourceMeta};
use news_buddy::summarize::split_sentences;

struct FailingSearch;

#[async_trait]
impl SearchClient for FailingSearch {
    async fn search(&self, _query: &str, _max_results: usize) -> Result<Vec<FactSource>> {
        anyhow::bail!("collaborator down")
    }
    fn provider_name(&self) -> &'static str {
        "failing"
    }
}

fn article(title: &str, content: Option<&str>) -> Article {
    Article {
        id: news_buddy::summarize::stable_id(title),
        title: title.to_string(),
        link: "https://example.test/item".to_string(),
        source: SourceMeta::named("Demo"),
        published: None,
        content: content.map(str::to_string),
        category: None,
    }
}

#[tokio::test]
async fn bundle_has_all_four_slots_for_any_topics() {
    let search = Arc::new(MockSearchClient::canned(1));
    let a = article("A headline", Some("Some body text here."));
    for topics in [None, Some(""), Some("a,b,c"), Some(",,, ,")] {
        let b = run_agents(search.clone(), &a, topics).await.expect("bundle");
        assert_eq!(b.verifier.label, "Verifier");
        assert_eq!(b.context.label, "Context");
        assert_eq!(b.analysis.label, "Analysis");
        assert_eq!(b.impact.label, "Impact");
    }
}

#[tokio::test]
async fn verifier_confidence_grows_with_sources_and_caps() {
    let a = article("A headline", None);
    let mut last = 0.0f32;
    for n in 0..6 {
        let search = Arc::new(MockSearchClient::canned(n));
        let b = run_agents(search, &a, None).await.expect("bundle");
        let conf = b.verifier.confidence.expect("confidence");
        assert!(conf >= last, "confidence must be non-decreasing");
        assert!(conf <= 0.95);
        last = conf;
    }
}

#[tokio::test]
async fn zero_sources_is_exactly_the_floor() {
    let a = article("A headline", None);
    let b = run_agents(Arc::new(MockSearchClient::default()), &a, None)
        .await
        .expect("bundle");
    assert_eq!(b.verifier.confidence, Some(0.3));
    assert_eq!(b.verifier.sources.as_ref().map(Vec::len), Some(0));
}

#[tokio::test]
async fn failing_verifier_collaborator_leaves_other_slots_untouched() {
    let a = article(
        "Parliament passes economic reform bill",
        Some("The bill covers inflation and subsidy policy."),
    );
    let healthy = run_agents(Arc::new(MockSearchClient::canned(2)), &a, Some("cricket"))
        .await
        .expect("bundle");
    let degraded = run_agents(Arc::new(FailingSearch), &a, Some("cricket"))
        .await
        .expect("bundle");

    // Only the verifier slot may differ.
    assert_eq!(healthy.context, degraded.context);
    assert_eq!(healthy.analysis, degraded.analysis);
    assert_eq!(healthy.impact, degraded.impact);
    assert_ne!(healthy.verifier.confidence, degraded.verifier.confidence);
    assert_eq!(degraded.verifier.confidence, Some(0.3));
}

#[tokio::test]
async fn worked_example_economic_reform_bill() {
    let a = article(
        "Parliament passes economic reform bill",
        Some(
            "The bill targets inflation with a new subsidy framework. \
             Lawmakers debated the measure for weeks. \
             Businesses expect simpler compliance rules.",
        ),
    );
    let b = run_agents(Arc::new(MockSearchClient::canned(2)), &a, None)
        .await
        .expect("bundle");

    assert!(b.context.insight.contains("Economic context"));
    assert!(b.impact.insight.contains("cost of living"));
    assert!(split_sentences(&b.analysis.insight).len() <= 2);
    let conf = b.verifier.confidence.unwrap();
    assert!((0.3..=0.95).contains(&conf));
}

#[tokio::test]
async fn empty_article_degrades_each_analyzer_to_its_fallback() {
    let a = article("", None);
    let b = run_agents(Arc::new(MockSearchClient::default()), &a, None)
        .await
        .expect("bundle");
    assert!(b.analysis.insight.is_empty());
    assert!(b.context.insight.contains("Background"));
    assert!(b.impact.insight.contains("watch for"));
    assert_eq!(b.verifier.confidence, Some(0.3));
}
