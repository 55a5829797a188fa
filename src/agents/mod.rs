// src/agents/mod.rs
//! Analyzer fan-out: four independent heuristic analyzers per article,
//! run concurrently and joined into one `InsightBundle`.
//!
//! The set is closed: exactly four kinds, no dynamic registration. Each
//! handler degrades internally and never errors outward; the only failure
//! path of `run_agents` is the task substrate itself (a join fault), and
//! on that path no partial bundle is ever salvaged.

pub mod analysis;
pub mod context;
pub mod impact;
pub mod verifier;

use metrics::counter;

use crate::factcheck::DynSearchClient;
use crate::model::{Article, InsightBundle};

/// The closed set of analyzers, in bundle slot order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentKind {
    Verifier,
    Context,
    Analysis,
    Impact,
}

impl AgentKind {
    pub const ALL: [AgentKind; 4] = [
        AgentKind::Verifier,
        AgentKind::Context,
        AgentKind::Analysis,
        AgentKind::Impact,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AgentKind::Verifier => "Verifier",
            AgentKind::Context => "Context",
            AgentKind::Analysis => "Analysis",
            AgentKind::Impact => "Impact",
        }
    }
}

/// Infrastructure-level enrichment fault. Analyzer-level problems never
/// surface here; they degrade inside the handlers.
#[derive(Debug, thiserror::Error)]
pub enum EnrichError {
    #[error("analyzer task failed to join: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Split a comma-separated topic string into trimmed, non-empty topics.
pub fn parse_topics(topics_csv: Option<&str>) -> Vec<String> {
    topics_csv
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Run all four analyzers concurrently and assemble the bundle.
///
/// Each task gets an owned snapshot of the inputs, so the four share no
/// mutable state. The join waits for all of them; overall
/// latency is bounded by the slowest analyzer, not the sum. Slots are
/// assembled in the fixed order verifier, context, analysis, impact
/// regardless of which task finished first.
pub async fn run_agents(
    search: DynSearchClient,
    article: &Article,
    topics_csv: Option<&str>,
) -> Result<InsightBundle, EnrichError> {
    let topics = parse_topics(topics_csv);
    let title = article.title.clone();
    let text = article.base_text().to_string();

    let verifier = tokio::spawn(verifier::run(search, title));
    let context = tokio::spawn(context::run(text.clone()));
    let analysis = tokio::spawn(analysis::run(text.clone()));
    let impact = tokio::spawn(impact::run(text, topics));

    // Join all four before touching any result; a single join fault fails
    // the whole call with nothing salvaged.
    let (verifier, context, analysis, impact) = tokio::join!(verifier, context, analysis, impact);
    let bundle = InsightBundle {
        verifier: verifier?,
        context: context?,
        analysis: analysis?,
        impact: impact?,
    };

    counter!("enrich_bundles_total").increment(1);
    Ok(bundle)
}
