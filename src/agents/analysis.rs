// src/agents/analysis.rs
//! Analysis analyzer: 2-sentence condensation via the summarizer, with a
//! truncated-prefix fallback for near-empty input.

use crate::agents::AgentKind;
use crate::model::AgentOutput;
use crate::summarize::summarize;

const MAX_SENTENCES: usize = 2;
const FALLBACK_PREFIX_CHARS: usize = 200;
const CONFIDENCE: f32 = 0.5;

pub fn condense(text: &str) -> String {
    let summary = summarize(text, MAX_SENTENCES);
    if summary.is_empty() {
        // char-boundary safe prefix
        text.chars().take(FALLBACK_PREFIX_CHARS).collect()
    } else {
        summary
    }
}

pub async fn run(text: String) -> AgentOutput {
    AgentOutput {
        label: AgentKind::Analysis.label().to_string(),
        insight: condense(&text),
        confidence: Some(CONFIDENCE),
        sources: None,
        meta: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn condensation_is_at_most_two_sentences() {
        let text = "One fact here. Second fact there. Third fact elsewhere. Fourth fact beyond.";
        let out = condense(text);
        let sentences = crate::summarize::split_sentences(&out);
        assert!(sentences.len() <= 2);
    }

    #[test]
    fn empty_text_falls_back_to_empty_prefix() {
        assert_eq!(condense(""), "");
        assert!(condense("   ").trim().is_empty());
    }

    #[tokio::test]
    async fn output_shape_is_fixed() {
        let out = run("Single sentence only.".into()).await;
        assert_eq!(out.label, "Analysis");
        assert_eq!(out.confidence, Some(0.5));
        assert_eq!(out.insight, "Single sentence only.");
    }
}
