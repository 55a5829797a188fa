// src/model.rs
//! Core data model shared by ingest, agents, and the HTTP surface.
//!
//! Everything here is plain serde data: immutable once constructed and
//! cheap to clone into analyzer tasks.

use serde::{Deserialize, Serialize};

/// Metadata about where an article came from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceMeta {
    pub name: String,
    pub url: Option<String>,
    pub bias_label: Option<String>,
    /// 0..1 subjective heuristic, if known.
    pub reliability: Option<f32>,
}

impl SourceMeta {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            url: None,
            bias_label: None,
            reliability: None,
        }
    }
}

/// One ingested news item prior to enrichment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Article {
    /// Stable id derived from title+link (see `summarize::stable_id`).
    pub id: String,
    pub title: String,
    pub link: String,
    pub source: SourceMeta,
    /// RFC 3339 string, if the feed carried one.
    pub published: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
}

impl Article {
    /// Body-or-title text the summarizer and analyzers operate on.
    pub fn base_text(&self) -> &str {
        match self.content.as_deref() {
            Some(c) if !c.is_empty() => c,
            _ => &self.title,
        }
    }
}

/// An external citation produced by the fact search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FactSource {
    pub title: String,
    pub url: String,
    pub snippet: Option<String>,
}

/// Result of one fact scan (direct or agent-derived).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FactCheck {
    /// 0..1
    pub confidence: f32,
    pub summary: String,
    pub sources: Vec<FactSource>,
}

/// Editorial-lean metadata for a source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BiasMeta {
    /// e.g. "Left", "Center", "Right", "Unknown"
    pub label: String,
    /// -1..1 left/right, if applicable.
    pub score: Option<f32>,
    pub rationale: Option<String>,
}

impl BiasMeta {
    pub fn unknown() -> Self {
        Self {
            label: "Unknown".to_string(),
            score: None,
            rationale: None,
        }
    }
}

/// Output of one analyzer invocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentOutput {
    /// Which analyzer produced it, e.g. "Verifier".
    pub label: String,
    pub insight: String,
    /// 0..1, absent for analyzers that do not score themselves.
    pub confidence: Option<f32>,
    pub sources: Option<Vec<FactSource>>,
    pub meta: Option<serde_json::Value>,
}

/// Fixed aggregate of all four analyzer results for one article.
/// All slots are required: a bundle either exists whole or not at all;
/// absence travels as `Option<InsightBundle>` one level up.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InsightBundle {
    pub verifier: AgentOutput,
    pub context: AgentOutput,
    pub analysis: AgentOutput,
    pub impact: AgentOutput,
}

/// Requested presentation mode for an enrichment run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Read,
    Listen,
    Watch,
    Multilingual,
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Read
    }
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Read => "read",
            Mode::Listen => "listen",
            Mode::Watch => "watch",
            Mode::Multilingual => "multilingual",
        }
    }
}

/// Terminal output of one Item Processor invocation. Serialized and
/// returned; no further lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnrichedItem {
    pub item: Article,
    pub summary: String,
    pub language: String,
    pub translation_language: Option<String>,
    pub fact_check: FactCheck,
    pub bias: BiasMeta,
    pub listen_url: Option<String>,
    pub slide_urls: Option<Vec<String>>,
    pub mode: Mode,
    /// `None` means enrichment degraded (the orchestrator join failed and
    /// only the direct fact scan ran). Never a half-filled bundle.
    pub agents: Option<InsightBundle>,
}
