// src/agents/verifier.rs
//! Verifier analyzer: fact-scans the article title against the external
//! search collaborator. The only analyzer with a real suspension point.

use crate::agents::AgentKind;
use crate::factcheck::{fact_check_title, DynSearchClient};
use crate::model::AgentOutput;

/// Never fails outward: a dead search collaborator degrades to zero
/// sources at the floor confidence inside `fact_check_title`.
pub async fn run(search: DynSearchClient, title: String) -> AgentOutput {
    let fact = fact_check_title(search.as_ref(), &title).await;
    AgentOutput {
        label: AgentKind::Verifier.label().to_string(),
        insight: fact.summary,
        confidence: Some(fact.confidence),
        sources: Some(fact.sources),
        meta: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factcheck::MockSearchClient;
    use std::sync::Arc;

    #[tokio::test]
    async fn verifier_reports_sources_and_confidence() {
        let out = run(Arc::new(MockSearchClient::canned(2)), "headline".into()).await;
        assert_eq!(out.label, "Verifier");
        assert_eq!(out.sources.as_ref().map(Vec::len), Some(2));
        assert!((out.confidence.unwrap() - 0.7).abs() < 1e-6);
    }

    #[tokio::test]
    async fn verifier_floor_with_no_sources() {
        let out = run(Arc::new(MockSearchClient::default()), "headline".into()).await;
        assert_eq!(out.sources.as_ref().map(Vec::len), Some(0));
        assert_eq!(out.confidence, Some(0.3));
    }
}
