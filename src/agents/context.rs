// src/agents/context.rs
//! Context analyzer: keyword-rule classifier over the article text.
//! Pure, no external calls; fixed confidence.

use crate::agents::AgentKind;
use crate::model::AgentOutput;

const ECONOMIC_KEYWORDS: [&str; 6] = ["inflation", "gdp", "budget", "gst", "reform", "economy"];
const GOVERNANCE_KEYWORDS: [&str; 5] =
    ["election", "parliament", "minister", "supreme court", "bill"];
const SPORTS_KEYWORDS: [&str; 4] = ["ipl", "cricket", "hockey", "football"];

pub const ECONOMIC_NOTE: &str =
    "Economic context: impact on households, businesses, and fiscal policy.";
pub const GOVERNANCE_NOTE: &str = "Governance context: legal and political implications.";
pub const SPORTS_NOTE: &str =
    "Sports context: fan sentiment, league standings, and scheduling.";
pub const GENERIC_NOTE: &str =
    "Background: what led to this development and who is affected.";

const CONFIDENCE: f32 = 0.6;

fn matches_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| haystack.contains(k))
}

/// One explanatory sentence per matched category, concatenated in the
/// fixed category order; generic background sentence when nothing hits.
pub fn classify(text: &str) -> String {
    let lower = text.to_lowercase();
    let mut lines: Vec<&str> = Vec::new();
    if matches_any(&lower, &ECONOMIC_KEYWORDS) {
        lines.push(ECONOMIC_NOTE);
    }
    if matches_any(&lower, &GOVERNANCE_KEYWORDS) {
        lines.push(GOVERNANCE_NOTE);
    }
    if matches_any(&lower, &SPORTS_KEYWORDS) {
        lines.push(SPORTS_NOTE);
    }
    if lines.is_empty() {
        lines.push(GENERIC_NOTE);
    }
    lines.join(" ")
}

pub async fn run(text: String) -> AgentOutput {
    AgentOutput {
        label: AgentKind::Context.label().to_string(),
        insight: classify(&text),
        confidence: Some(CONFIDENCE),
        sources: None,
        meta: None,
    }
}
