//! # Parsing Pipeline
//!
//! Raw text → [`normalize`] → [`blocks`] (classification into sections,
//! inline runs resolved per fragment by [`inline`]) → ordered [`Section`]s.
//!
//! The pipeline never fails: malformed markup degrades to tolerant parses
//! and degenerate input produces the smallest valid structure.
//!
//! [`Section`]: crate::models::Section

pub mod blocks;
pub mod inline;
pub mod normalize;
pub mod scan;

#[cfg(test)]
mod tests;

use draftforge_config::HeadingHeuristics;

use crate::models::section::Section;

use blocks::SectionBuilder;

/// Outcome of input detection: either classified sections, or editor-native
/// Delta JSON passed through opaque for the external renderer's own decoder.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedInput {
    Sections(Vec<Section>),
    /// JSON-shaped input, untouched. Delta format is not parsed here.
    Delta(String),
}

/// Whether the input is editor-native JSON rather than markup.
pub fn looks_like_delta(raw: &str) -> bool {
    matches!(raw.trim_start().as_bytes().first(), Some(b'{' | b'['))
}

/// Detect the input shape and parse markup input into sections.
pub fn parse_input(raw: &str, heuristics: &HeadingHeuristics) -> ParsedInput {
    if looks_like_delta(raw) {
        return ParsedInput::Delta(raw.to_string());
    }
    ParsedInput::Sections(parse_sections(raw, heuristics))
}

/// Run the full markup pipeline: normalize, split, classify, accumulate.
pub fn parse_sections(raw: &str, heuristics: &HeadingHeuristics) -> Vec<Section> {
    let normalized = normalize::normalize(raw);
    let mut builder = SectionBuilder::new(heuristics);
    for frag in blocks::split_fragments(&normalized) {
        builder.push(&frag);
    }
    let sections = builder.finish();
    log::debug!(
        "parsed {} byte(s) of markup into {} section(s)",
        raw.len(),
        sections.len()
    );
    sections
}
