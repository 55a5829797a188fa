// src/summarize.rs
//! Extractive summarizer: frequency-scored sentence selection.
//!
//! Pure and deterministic: same input, same output, no hidden state.
//! Several analyzers reuse this as a primitive, so the ordering rules
//! matter: ties break by earliest position and the output keeps the
//! source document order, never score order.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "a", "an", "and", "or", "but", "if", "while", "with", "to", "of", "in", "on",
        "for", "by", "is", "are", "was", "were", "be", "this", "that", "it", "as", "from", "at",
        "has", "have", "had", "will", "would", "can", "could", "should", "may", "might",
    ]
    .into_iter()
    .collect()
});

static RE_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z']+").expect("word regex"));

/// Split on sentence end marks (`.` `!` `?`) followed by whitespace.
/// Pieces are trimmed; empty pieces are dropped.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut cur = String::new();
    let mut chars = text.trim().chars().peekable();

    while let Some(c) = chars.next() {
        cur.push(c);
        if matches!(c, '.' | '!' | '?') && chars.peek().is_some_and(|n| n.is_whitespace()) {
            while chars.peek().is_some_and(|n| n.is_whitespace()) {
                chars.next();
            }
            let s = cur.trim();
            if !s.is_empty() {
                out.push(s.to_string());
            }
            cur.clear();
        }
    }
    let s = cur.trim();
    if !s.is_empty() {
        out.push(s.to_string());
    }
    out
}

/// Case-folded alphabetic words (apostrophes retained).
fn words(sentence: &str) -> impl Iterator<Item = String> + '_ {
    RE_WORD
        .find_iter(sentence)
        .map(|m| m.as_str().to_ascii_lowercase())
}

/// Frequency-based extractive summary.
///
/// - ≤ `max_sentences` sentences: pass through unchanged, original order.
/// - Otherwise: score each sentence by the summed global frequency of its
///   words (stop-words and words of length ≤ 2 contribute 0, repeats
///   count), take the top `max_sentences` (ties by earliest position),
///   re-assemble in original order.
pub fn summarize(text: &str, max_sentences: usize) -> String {
    if text.trim().is_empty() {
        return String::new();
    }
    let sentences = split_sentences(text);
    if sentences.len() <= max_sentences {
        return sentences.join(" ");
    }

    let mut word_freq: HashMap<String, u32> = HashMap::new();
    for sentence in &sentences {
        for word in words(sentence) {
            if STOPWORDS.contains(word.as_str()) || word.len() <= 2 {
                continue;
            }
            *word_freq.entry(word).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(u32, usize)> = sentences
        .iter()
        .enumerate()
        .map(|(idx, sentence)| {
            let score = words(sentence)
                .map(|w| word_freq.get(&w).copied().unwrap_or(0))
                .sum();
            (score, idx)
        })
        .collect();
    ranked.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

    let mut picked: Vec<usize> = ranked
        .into_iter()
        .take(max_sentences)
        .map(|(_, idx)| idx)
        .collect();
    picked.sort_unstable();

    picked
        .into_iter()
        .map(|idx| sentences[idx].as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Short stable hex id for a string (sha256, first 8 bytes).
pub fn stable_id(value: &str) -> String {
    use sha2::{Digest, Sha256};
    let digest = Sha256::digest(value.as_bytes());
    let mut out = String::with_capacity(16);
    for b in digest.iter().take(8) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

static RE_SLUG_BAD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z0-9_-]+").expect("slug regex"));
static RE_SLUG_DASH: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+").expect("dash regex"));

/// URL/file-safe slug; never empty.
pub fn slugify(value: &str) -> String {
    let v = RE_SLUG_BAD.replace_all(value.trim(), "-");
    let v = RE_SLUG_DASH.replace_all(&v, "-");
    let v = v.trim_matches('-');
    if v.is_empty() {
        "item".to_string()
    } else {
        v.to_string()
    }
}
