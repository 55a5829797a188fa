// src/pipeline.rs
//! Item Processor: per-article enrichment flow.
//!
//! Summary first (the translation prerequisite), then the analyzer
//! fan-out, then mode-dependent side outputs. Every collaborator failure
//! degrades locally; an article always comes back as an `EnrichedItem`.

use std::path::PathBuf;

use metrics::{counter, describe_counter};
use once_cell::sync::OnceCell;

use crate::agents::run_agents;
use crate::bias::BiasConfig;
use crate::factcheck::{build_search_client, fact_check_title, DynSearchClient};
use crate::model::{AgentOutput, Article, EnrichedItem, FactCheck, Mode};
use crate::slides::generate_slides;
use crate::summarize::summarize;
use crate::translate::{build_translator, translate_text, DynTranslator};
use crate::tts::{build_speech_client, synthesize_speech, DynSpeechClient};

const SUMMARY_SENTENCES: usize = 3;

fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("items_processed_total", "Articles fully processed.");
        describe_counter!(
            "enrich_bundles_total",
            "Complete insight bundles assembled."
        );
        describe_counter!(
            "enrich_fallback_total",
            "Enrichments degraded to the direct fact scan."
        );
        describe_counter!("fact_search_errors_total", "Fact search call failures.");
        describe_counter!("translate_errors_total", "Translation call failures.");
        describe_counter!("tts_errors_total", "Speech synthesis call failures.");
    });
}

/// The top-level fact check is always rebuilt from the bundle's verifier
/// slot when the bundle assembled; the direct scan runs only on fan-out
/// failure.
fn fact_from_verifier(verifier: &AgentOutput) -> FactCheck {
    FactCheck {
        confidence: verifier.confidence.unwrap_or(0.5),
        summary: verifier.insight.clone(),
        sources: verifier.sources.clone().unwrap_or_default(),
    }
}

/// Shared, concurrent-safe collaborators for the enrichment flow.
pub struct Processor {
    search: DynSearchClient,
    translator: DynTranslator,
    speech: DynSpeechClient,
    bias: BiasConfig,
    static_root: PathBuf,
}

impl Processor {
    pub fn new(
        search: DynSearchClient,
        translator: DynTranslator,
        speech: DynSpeechClient,
        bias: BiasConfig,
        static_root: PathBuf,
    ) -> Self {
        ensure_metrics_described();
        Self {
            search,
            translator,
            speech,
            bias,
            static_root,
        }
    }

    /// Build with the env-configured providers (see the collaborator
    /// module factories for the `*_MODE` switches).
    pub fn from_env(static_root: PathBuf) -> Self {
        Self::new(
            build_search_client(),
            build_translator(),
            build_speech_client(),
            BiasConfig::load_default(),
            static_root,
        )
    }

    /// Enrich one article. Never fails: every degradation path produces
    /// a value, and the item is tagged degraded by `agents: None`.
    pub async fn process(
        &self,
        article: &Article,
        mode: Mode,
        language: &str,
        topics_csv: Option<&str>,
    ) -> EnrichedItem {
        let lang = if language.is_empty() { "en" } else { language };

        // 1) Base summary (sequential prerequisite for translation).
        let summary_en = summarize(article.base_text(), SUMMARY_SENTENCES);

        // 2) Translate when the target differs from the source language.
        let (summary, translation_language) = if !lang.eq_ignore_ascii_case("en") {
            (
                translate_text(self.translator.as_ref(), &summary_en, lang).await,
                Some(lang.to_string()),
            )
        } else {
            (summary_en, None)
        };

        // 3) Analyzer fan-out; on a join fault, degrade to one direct
        //    non-concurrent fact scan and leave the bundle absent.
        let (agents, fact_check) = match run_agents(self.search.clone(), article, topics_csv).await
        {
            Ok(bundle) => {
                let fact = fact_from_verifier(&bundle.verifier);
                (Some(bundle), fact)
            }
            Err(e) => {
                counter!("enrich_fallback_total").increment(1);
                tracing::warn!(error = ?e, article = %article.id, "analyzer fan-out failed, degrading to direct fact scan");
                let fact = fact_check_title(self.search.as_ref(), &article.title).await;
                (None, fact)
            }
        };

        // 4) Source bias lookup.
        let bias = self.bias.infer(&article.source.name);

        // 5) Mode-dependent side outputs; each degrades independently.
        let mut listen_url = None;
        let mut slide_urls = None;
        match mode {
            Mode::Listen => {
                match synthesize_speech(self.speech.as_ref(), &summary, lang, &self.static_root)
                    .await
                {
                    Ok(url) => listen_url = Some(url),
                    Err(e) => {
                        tracing::warn!(error = ?e, article = %article.id, "no audio for item");
                    }
                }
            }
            Mode::Watch => match generate_slides(&summary, lang, &self.static_root) {
                Ok(urls) => slide_urls = Some(urls),
                Err(e) => {
                    tracing::warn!(error = ?e, article = %article.id, "no slides for item");
                }
            },
            Mode::Read | Mode::Multilingual => {}
        }

        counter!("items_processed_total").increment(1);
        EnrichedItem {
            item: article.clone(),
            summary,
            language: lang.to_string(),
            translation_language,
            fact_check,
            bias,
            listen_url,
            slide_urls,
            mode,
            agents,
        }
    }

    /// Process a batch sequentially. Items share no mutable state, so a
    /// degraded item never affects its siblings.
    pub async fn process_batch(
        &self,
        articles: &[Article],
        mode: Mode,
        language: &str,
        topics_csv: Option<&str>,
    ) -> Vec<EnrichedItem> {
        let mut out = Vec::with_capacity(articles.len());
        for article in articles {
            out.push(self.process(article, mode, language, topics_csv).await);
        }
        out
    }
}
