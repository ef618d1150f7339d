//! Fragment classification.
//!
//! Decides, per top-level fragment, whether it opens a new titled section,
//! carries list content, or is ordinary body content. The implicit-heading
//! rules are heuristics: a short declarative sentence without terminal
//! punctuation will sometimes classify as a heading. Tests pin that
//! behavior, and the thresholds live in [`HeadingHeuristics`] rather than
//! inline literals.

use std::sync::LazyLock;

use draftforge_config::HeadingHeuristics;
use regex::Regex;

use crate::parsing::scan::strip_tags;

use super::lower::fragment_runs;
use super::split::{Fragment, FragmentKind};

/// Punctuation that disqualifies a paragraph from the heading heuristics.
const TERMINAL_PUNCTUATION: &[char] = &['.', '?', '!'];

/// `"Prepared for:"`-style document labels that read as headings even when
/// the full line is long.
static LABEL_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:prepared (?:for|by)|submitted (?:to|by)|presented (?:to|by)|attn|attention|client|company|project|date|author):",
    )
    .expect("label heading pattern")
});

/// How the section builder should treat one fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentClass {
    /// An `<h1>`..`<h6>` fragment.
    ExplicitHeading(u8),
    /// A paragraph promoted to a heading by the heuristics.
    ImplicitHeading,
    /// A list fragment to attach, merge or open a list section with.
    List { ordered: bool },
    /// Everything else: body content for the open section.
    Content,
}

/// Classify one fragment. Precedence follows the section rules: explicit
/// headings, then the bold-run and short-paragraph promotions, then lists,
/// then content.
pub fn classify_fragment(frag: &Fragment, heuristics: &HeadingHeuristics) -> FragmentClass {
    match frag.kind {
        FragmentKind::Heading(level) => FragmentClass::ExplicitHeading(level),
        FragmentKind::List { ordered } => FragmentClass::List { ordered },
        FragmentKind::Quote | FragmentKind::Code | FragmentKind::Rule => FragmentClass::Content,
        FragmentKind::Paragraph => classify_paragraph(frag, heuristics),
    }
}

fn classify_paragraph(frag: &Fragment, heuristics: &HeadingHeuristics) -> FragmentClass {
    let plain = strip_tags(&frag.raw);
    let plain = plain.trim();
    if plain.is_empty() {
        return FragmentClass::Content;
    }

    let terminal = plain.ends_with(TERMINAL_PUNCTUATION);
    let len = plain.chars().count();

    // A paragraph that is one single bold run reads as a heading.
    if !terminal && len < heuristics.bold_max_len && is_single_bold_run(frag) {
        return FragmentClass::ImplicitHeading;
    }

    // Short free-standing paragraphs and document labels read as headings.
    if !terminal && len >= heuristics.short_min_len && len <= heuristics.short_max_len {
        return FragmentClass::ImplicitHeading;
    }
    if LABEL_HEADING.is_match(plain) {
        return FragmentClass::ImplicitHeading;
    }

    FragmentClass::Content
}

/// Whether the fragment's inline content is exactly one bold run (ignoring
/// whitespace-only runs around it).
fn is_single_bold_run(frag: &Fragment) -> bool {
    let runs = fragment_runs(frag);
    let mut visible = runs.iter().filter(|r| !r.text.trim().is_empty());
    match (visible.next(), visible.next()) {
        (Some(run), None) => run.style.bold,
        _ => false,
    }
}
