//! Secondary inline parser for text confirmed to contain no markup tags.
//!
//! Recognizes two plain-text conventions that show up in transcribed and
//! hand-typed proposal content:
//!
//! - `**double-asterisk**` bold spans,
//! - a leading `Label:` segment promoted to bold (the `"Prepared for:"`
//!   pattern), with the remainder of the line left plain.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::run::Run;
use crate::parsing::scan::{Token, tokenize};

/// Delimiter of the plain-text bold convention.
const BOLD_DELIM: &str = "**";

/// Longest leading segment the label heuristic will promote, in characters.
const LABEL_MAX_LEN: usize = 40;

/// A line-leading `word(s):` segment. The colon must be followed by
/// whitespace or end the line, so `http://` never counts as a label.
static LABEL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z][A-Za-z0-9 .&/()'-]*:)(\s|$)").expect("label pattern")
});

/// Whether a fragment contains real markup tags, which disqualifies it from
/// the plain-text conventions.
pub fn looks_like_markup(fragment: &str) -> bool {
    tokenize(fragment)
        .iter()
        .any(|t| matches!(t, Token::Open(_) | Token::Close(_) | Token::LineBreak))
}

/// Resolve plain (markup-free) text into runs, line by line.
pub fn resolve_plain_runs(text: &str) -> Vec<Run> {
    let mut out = Vec::new();
    for (i, line) in text.lines().enumerate() {
        if i > 0 {
            push(&mut out, Run::plain("\n"));
        }

        let rest = match leading_label(line) {
            Some(label) => {
                push(&mut out, Run::bold(label));
                &line[label.len()..]
            }
            None => line,
        };
        parse_asterisk_bold(rest, &mut out);
    }
    out
}

/// The leading `Label:` segment of a line, if the heuristic applies.
fn leading_label(line: &str) -> Option<&str> {
    let caps = LABEL_PATTERN.captures(line)?;
    let label = caps.get(1)?.as_str();
    if label.chars().count() > LABEL_MAX_LEN {
        return None;
    }
    Some(label)
}

/// Scan one line for `**bold**` spans; everything else is plain. An
/// unmatched `**` is literal text.
fn parse_asterisk_bold(line: &str, out: &mut Vec<Run>) {
    let mut rest = line;
    while let Some(open) = rest.find(BOLD_DELIM) {
        let after_open = &rest[open + BOLD_DELIM.len()..];
        match after_open.find(BOLD_DELIM) {
            Some(close) if close > 0 => {
                if open > 0 {
                    push(out, Run::plain(&rest[..open]));
                }
                push(out, Run::bold(&after_open[..close]));
                rest = &after_open[close + BOLD_DELIM.len()..];
            }
            _ => {
                // No closing delimiter (or an empty span): literal.
                push(out, Run::plain(&rest[..open + BOLD_DELIM.len()]));
                rest = after_open;
            }
        }
    }
    if !rest.is_empty() {
        push(out, Run::plain(rest));
    }
}

fn push(out: &mut Vec<Run>, run: Run) {
    if let Some(last) = out.last_mut() {
        if last.style == run.style {
            last.text.push_str(&run.text);
            return;
        }
    }
    out.push(run);
}
