// src/slides.rs
//! Slide-rendering collaborator: wraps the summary into at most three
//! text segments and renders each as an SVG card under `static/slides/`.

use std::fs;
use std::io::Write as _;
use std::path::Path;

use anyhow::{Context, Result};

use crate::summarize::stable_id;

const SLIDE_WIDTH: u32 = 1280;
const SLIDE_HEIGHT: u32 = 720;
const WRAP_WIDTH: usize = 40;
const MAX_SLIDES: usize = 3;

/// Naive segmentation into up to three slides, split on sentence gaps.
pub fn segment_text(text: &str) -> Vec<String> {
    let mut segments: Vec<String> = text
        .split(". ")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if segments.is_empty() {
        segments.push(text.to_string());
    }
    segments.truncate(MAX_SLIDES);
    segments
}

/// Greedy word wrap at `width` characters.
fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            if line.is_empty() {
                line = word.to_string();
            } else if line.chars().count() + 1 + word.chars().count() <= width {
                line.push(' ');
                line.push_str(word);
            } else {
                lines.push(std::mem::take(&mut line));
                line = word.to_string();
            }
        }
        if !line.is_empty() {
            lines.push(line);
        }
    }
    lines
}

fn render_slide_svg(text: &str, language: &str) -> String {
    let mut body = String::new();
    let mut y = 120;
    for line in wrap_lines(text, WRAP_WIDTH) {
        let escaped = html_escape::encode_text(&line);
        body.push_str(&format!(
            "  <text x=\"80\" y=\"{y}\" font-family=\"sans-serif\" font-size=\"36\" fill=\"#14171a\">{escaped}</text>\n"
        ));
        y += 48;
    }
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{SLIDE_WIDTH}\" height=\"{SLIDE_HEIGHT}\" xml:lang=\"{language}\">\n\
         <rect width=\"100%\" height=\"100%\" fill=\"#f5f8fa\"/>\n{body}</svg>\n"
    )
}

/// Render slides for `text`, returning their `/static/...` URLs.
/// A slide that fails to render degrades to an empty placeholder file;
/// its URL is still reported.
pub fn generate_slides(text: &str, language: &str, static_root: &Path) -> Result<Vec<String>> {
    let dir = static_root.join("slides");
    fs::create_dir_all(&dir).context("creating slides dir")?;

    let uid = format!(
        "{}-{}",
        stable_id(text),
        chrono::Utc::now().timestamp_millis()
    );

    let mut urls = Vec::new();
    for (idx, segment) in segment_text(text).iter().enumerate() {
        let filename = format!("{uid}_{}.svg", idx + 1);
        let path = dir.join(&filename);
        let svg = render_slide_svg(segment, language);
        if let Err(e) = fs::File::create(&path).and_then(|mut f| f.write_all(svg.as_bytes())) {
            tracing::warn!(error = ?e, slide = %filename, "slide write failed, leaving placeholder");
            let _ = fs::File::create(&path);
        }
        urls.push(format!("/static/slides/{filename}"));
    }
    Ok(urls)
}
