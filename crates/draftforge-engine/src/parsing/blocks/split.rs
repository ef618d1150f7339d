//! Single-pass top-level fragment splitter.
//!
//! Walks normalized markup once, cutting it into block-level fragments:
//! paragraphs/divs, headings, lists, blockquotes, code blocks and rules.
//! Text that belongs to no block tag is collected into leftover paragraph
//! fragments. A block tag with no matching close runs to end of input; the
//! splitter never fails.

use crate::parsing::scan::{Cursor, scan_raw_tag, skip_markup_noise, strip_tags};

/// The shape of one top-level fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    /// `<p>`/`<div>`, or leftover text outside any block tag.
    Paragraph,
    /// `<h1>`..`<h6>` with its level.
    Heading(u8),
    List {
        ordered: bool,
    },
    Quote,
    Code,
    Rule,
}

/// One top-level fragment of normalized markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub kind: FragmentKind,
    /// The full fragment markup, tags included. Retained on sections so the
    /// layout renderer can re-scan it for alignment/indent hints.
    pub raw: String,
    /// Markup between the open and close tags (equal to `raw` for leftover
    /// fragments).
    pub inner: String,
    /// Raw attribute text of the opening tag.
    pub attrs: String,
}

fn block_kind(name: &str) -> Option<FragmentKind> {
    match name {
        "p" | "div" => Some(FragmentKind::Paragraph),
        "h1" => Some(FragmentKind::Heading(1)),
        "h2" => Some(FragmentKind::Heading(2)),
        "h3" => Some(FragmentKind::Heading(3)),
        "h4" => Some(FragmentKind::Heading(4)),
        "h5" => Some(FragmentKind::Heading(5)),
        "h6" => Some(FragmentKind::Heading(6)),
        "ul" => Some(FragmentKind::List { ordered: false }),
        "ol" => Some(FragmentKind::List { ordered: true }),
        "blockquote" => Some(FragmentKind::Quote),
        "pre" => Some(FragmentKind::Code),
        "hr" => Some(FragmentKind::Rule),
        _ => None,
    }
}

/// Split normalized markup into top-level fragments in document order.
pub fn split_fragments(markup: &str) -> Vec<Fragment> {
    let mut out = Vec::new();
    let mut cur = Cursor::new(markup);
    let mut leftover_start = 0;

    while !cur.eof() {
        if cur.peek() != Some(b'<') {
            let rest = cur.rest();
            let step = rest.find('<').unwrap_or(rest.len());
            cur.bump_n(step);
            continue;
        }

        if skip_markup_noise(&mut cur) {
            continue;
        }

        let tag_start = cur.pos();
        let Some(tag) = scan_raw_tag(&mut cur) else {
            cur.bump(); // stray '<' stays leftover text
            continue;
        };

        let Some(kind) = (!tag.closing)
            .then(|| block_kind(&tag.name))
            .flatten()
        else {
            // Inline or unmatched closing tag: part of the leftover run.
            continue;
        };

        flush_leftover(&mut out, markup, leftover_start, tag_start);

        if matches!(kind, FragmentKind::Rule) || tag.self_closing {
            out.push(Fragment {
                kind,
                raw: markup[tag_start..cur.pos()].to_string(),
                inner: String::new(),
                attrs: tag.attrs,
            });
            leftover_start = cur.pos();
            continue;
        }

        let inner_start = cur.pos();
        let (inner_end, fragment_end) = find_matching_close(&mut cur, markup, &tag.name);
        out.push(Fragment {
            kind,
            raw: markup[tag_start..fragment_end].to_string(),
            inner: markup[inner_start..inner_end].to_string(),
            attrs: tag.attrs,
        });
        leftover_start = fragment_end;
    }

    flush_leftover(&mut out, markup, leftover_start, markup.len());
    out
}

/// Collect text between blocks into a paragraph fragment. Runs whose text
/// content is empty after tag/comment stripping are not fragments.
fn flush_leftover(out: &mut Vec<Fragment>, markup: &str, start: usize, end: usize) {
    if start >= end {
        return;
    }
    let raw = &markup[start..end];
    if strip_tags(raw).trim().is_empty() {
        return;
    }
    out.push(Fragment {
        kind: FragmentKind::Paragraph,
        raw: raw.to_string(),
        inner: raw.to_string(),
        attrs: String::new(),
    });
}

/// Advance to the close tag matching `name`, tracking nesting of same-named
/// tags. Returns (inner end, fragment end); both run to end of input when no
/// close is found.
pub(crate) fn find_matching_close(cur: &mut Cursor<'_>, markup: &str, name: &str) -> (usize, usize) {
    let mut depth = 1usize;

    while !cur.eof() {
        if cur.peek() != Some(b'<') {
            let rest = cur.rest();
            let step = rest.find('<').unwrap_or(rest.len());
            cur.bump_n(step);
            continue;
        }

        if skip_markup_noise(cur) {
            continue;
        }

        let tag_start = cur.pos();
        let Some(tag) = scan_raw_tag(cur) else {
            cur.bump();
            continue;
        };
        if tag.name != name {
            continue;
        }
        if tag.closing {
            depth -= 1;
            if depth == 0 {
                return (tag_start, cur.pos());
            }
        } else if !tag.self_closing {
            depth += 1;
        }
    }

    log::warn!("unclosed <{name}> runs to end of input");
    (markup.len(), markup.len())
}
