// src/agents/impact.rs
//! Impact analyzer: maps the article onto the caller's interests and two
//! fixed keyword families. Pure, fixed confidence.

use crate::agents::AgentKind;
use crate::model::AgentOutput;

const COST_OF_LIVING_KEYWORDS: [&str; 5] = ["jobs", "prices", "tax", "subsidy", "loan"];
const EDUCATION_KEYWORDS: [&str; 4] = ["education", "exam", "admission", "university"];

pub const COST_OF_LIVING_NOTE: &str =
    "Personal impact: potential effects on cost of living or income.";
pub const EDUCATION_NOTE: &str =
    "Personal impact: students and parents may need to plan ahead.";
pub const GENERIC_NOTE: &str = "Impact: what you might do next or watch for.";

const CONFIDENCE: f32 = 0.55;

/// One sentence per matched user topic, then one per matched keyword
/// family; generic watch-for-updates line when nothing matches.
pub fn signals(text: &str, user_topics: &[String]) -> String {
    let lower = text.to_lowercase();
    let mut lines: Vec<String> = Vec::new();

    for topic in user_topics {
        let t = topic.trim();
        if !t.is_empty() && lower.contains(&t.to_lowercase()) {
            lines.push(format!("Relevant to your interest: {t}"));
        }
    }
    if COST_OF_LIVING_KEYWORDS.iter().any(|k| lower.contains(k)) {
        lines.push(COST_OF_LIVING_NOTE.to_string());
    }
    if EDUCATION_KEYWORDS.iter().any(|k| lower.contains(k)) {
        lines.push(EDUCATION_NOTE.to_string());
    }
    if lines.is_empty() {
        lines.push(GENERIC_NOTE.to_string());
    }
    lines.join(" ")
}

pub async fn run(text: String, user_topics: Vec<String>) -> AgentOutput {
    AgentOutput {
        label: AgentKind::Impact.label().to_string(),
        insight: signals(&text, &user_topics),
        confidence: Some(CONFIDENCE),
        sources: None,
        meta: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topics(ts: &[&str]) -> Vec<String> {
        ts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn user_topic_match_is_case_insensitive() {
        let out = signals("The Cricket league resumes", &topics(&["cricket"]));
        assert_eq!(out, "Relevant to your interest: cricket");
    }

    #[test]
    fn keyword_families_each_emit_one_sentence() {
        let out = signals(
            "New tax rules hit university admission fees",
            &topics(&[]),
        );
        assert_eq!(out, format!("{COST_OF_LIVING_NOTE} {EDUCATION_NOTE}"));
    }

    #[test]
    fn no_match_emits_generic_watch_line() {
        assert_eq!(signals("Weather stays dry", &topics(&[])), GENERIC_NOTE);
    }

    #[test]
    fn unmatched_topics_are_silent() {
        let out = signals("Subsidy changes announced", &topics(&["hockey"]));
        assert_eq!(out, COST_OF_LIVING_NOTE);
    }

    #[tokio::test]
    async fn output_shape_is_fixed() {
        let out = run("prices rising".into(), topics(&[])).await;
        assert_eq!(out.label, "Impact");
        assert_eq!(out.confidence, Some(0.55));
        assert!(out.sources.is_none());
    }
}
