// src/bias.rs
//! # Source Bias Lookup
//!
//! Static mapping from outlet names to editorial-lean metadata.
//!
//! - Loads from a JSON config (`config/bias_map.json`, overridable via
//!   `BIAS_CONFIG_PATH`), falling back to a built-in seed.
//! - Case-insensitive lookup: a configured key matches when it appears as
//!   a substring of the normalized source name.
//! - Deterministic: entries are checked in sorted key order.
//! - Unknown or empty source names map to the "Unknown" label.

use serde::Deserialize;
use std::{collections::BTreeMap, fs, path::Path};

use crate::model::BiasMeta;

const ENV_PATH: &str = "BIAS_CONFIG_PATH";
const DEFAULT_PATH: &str = "config/bias_map.json";

#[derive(Debug, Clone, Deserialize)]
pub struct BiasEntry {
    pub label: String,
    pub score: Option<f32>,
    pub rationale: Option<String>,
}

/// Bias table; keys are lower-cased outlet-name fragments.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct BiasConfig {
    #[serde(default)]
    pub entries: BTreeMap<String, BiasEntry>,
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

fn entry(label: &str, score: f32, rationale: &str) -> BiasEntry {
    BiasEntry {
        label: label.to_string(),
        score: Some(score),
        rationale: Some(rationale.to_string()),
    }
}

impl BiasConfig {
    /// Load from `$BIAS_CONFIG_PATH`, then the default path, then the seed.
    pub fn load_default() -> Self {
        let path = std::env::var(ENV_PATH).unwrap_or_else(|_| DEFAULT_PATH.to_string());
        Self::load_from_file(path)
    }

    /// Load from a JSON file, falling back to `default_seed()` on error.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(path) {
            Ok(s) => serde_json::from_str(&s).unwrap_or_else(|_| Self::default_seed()),
            Err(_) => Self::default_seed(),
        }
    }

    /// Built-in seed covering the major Indian outlets.
    pub fn default_seed() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(
            "ndtv".to_string(),
            entry("Center-Left", -0.3, "Assessed from editorial stance and external trackers"),
        );
        entries.insert(
            "the hindu".to_string(),
            entry("Center-Left", -0.2, "Known for policy-heavy reporting"),
        );
        entries.insert(
            "times of india".to_string(),
            entry("Center", 0.0, "Broad mainstream coverage"),
        );
        entries.insert(
            "republic".to_string(),
            entry("Right", 0.5, "Editorial tone and source assessments"),
        );
        entries.insert(
            "opindia".to_string(),
            entry("Right", 0.7, "Opinion-forward outlet"),
        );
        entries.insert(
            "the wire".to_string(),
            entry("Left", -0.6, "Investigative and opinion-heavy"),
        );
        entries.insert(
            "indian express".to_string(),
            entry("Center", 0.0, "Balanced reportage reputation"),
        );
        entries.insert(
            "hindustan times".to_string(),
            entry("Center", 0.0, "Mainstream metro daily"),
        );
        entries.insert(
            "aaj tak".to_string(),
            entry("Center", 0.0, "Hindi broadcast mainstream"),
        );
        entries.insert(
            "abp".to_string(),
            entry("Center", 0.0, "Broadcast mainstream"),
        );
        entries.insert(
            "scroll".to_string(),
            entry("Left", -0.4, "Long-form, progressive tilt"),
        );
        Self { entries }
    }

    /// Resolve a source name to bias metadata.
    pub fn infer(&self, source_name: &str) -> BiasMeta {
        let key = normalize(source_name);
        if key.is_empty() {
            return BiasMeta::unknown();
        }
        for (fragment, e) in &self.entries {
            if key.contains(fragment.as_str()) {
                return BiasMeta {
                    label: e.label.clone(),
                    score: e.score,
                    rationale: e.rationale.clone(),
                };
            }
        }
        BiasMeta::unknown()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_source_matches_case_insensitively() {
        let cfg = BiasConfig::default_seed();
        let b = cfg.infer("NDTV");
        assert_eq!(b.label, "Center-Left");
        assert_eq!(b.score, Some(-0.3));
    }

    #[test]
    fn fragment_matches_longer_names() {
        let cfg = BiasConfig::default_seed();
        assert_eq!(cfg.infer("Republic TV").label, "Right");
        assert_eq!(cfg.infer("The Times of India Online").label, "Center");
    }

    #[test]
    fn unknown_and_empty_sources_are_unknown() {
        let cfg = BiasConfig::default_seed();
        assert_eq!(cfg.infer("Village Gazette").label, "Unknown");
        assert_eq!(cfg.infer("").label, "Unknown");
        assert_eq!(cfg.infer("  ").label, "Unknown");
    }

    #[test]
    fn config_json_overrides_seed() {
        let json = r#"{"entries": {"gazette": {"label": "Satire", "score": null, "rationale": null}}}"#;
        let cfg: BiasConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.infer("Village Gazette").label, "Satire");
        assert_eq!(cfg.infer("NDTV").label, "Unknown");
    }
}
