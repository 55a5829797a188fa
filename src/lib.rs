// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod api;
pub mod bias;
pub mod factcheck;
pub mod ingest;
pub mod metrics;
pub mod model;
pub mod pipeline;
pub mod slides;
pub mod summarize;
pub mod translate;
pub mod tts;

// Analyzer fan-out (verifier, context, analysis, impact)
pub mod agents;

// ---- Re-exports for stable public API ----
pub use crate::api::{create_router, AppState};
pub use crate::model::{
    AgentOutput, Article, BiasMeta, EnrichedItem, FactCheck, FactSource, InsightBundle, Mode,
    SourceMeta,
};
pub use crate::pipeline::Processor;
pub use crate::summarize::summarize;
