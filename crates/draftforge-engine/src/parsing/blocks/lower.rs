//! Lowering of classified fragments into [`Block`]s.
//!
//! Each fragment lowers to at most one block; fragments whose content
//! vanishes (empty paragraphs, lists with no items, empty quotes) lower to
//! nothing. The layout renderer relies on this being deterministic when it
//! re-pairs a section's retained markup with its blocks.

use crate::models::block::{Block, BlockKind, ListItem};
use crate::models::run::Run;
use crate::parsing::inline::{looks_like_markup, resolve_plain_runs, resolve_runs};
use crate::parsing::scan::{Cursor, scan_raw_tag, skip_markup_noise, strip_tags};

use super::split::{Fragment, FragmentKind, find_matching_close, split_fragments};

/// Inline runs of a fragment. The plain-text conventions (`**bold**`,
/// `Label:` promotion) apply only when the fragment carries no real markup
/// tags at all.
pub(crate) fn fragment_runs(frag: &Fragment) -> Vec<Run> {
    if looks_like_markup(&frag.raw) {
        resolve_runs(&frag.inner)
    } else {
        resolve_plain_runs(&frag.inner)
    }
}

/// Lower one fragment to a block, or to nothing when its content vanishes.
pub fn lower_fragment(frag: &Fragment) -> Option<Block> {
    match frag.kind {
        FragmentKind::Paragraph => {
            let runs = fragment_runs(frag);
            if runs.iter().all(|r| r.text.trim().is_empty()) {
                return None;
            }
            Some(Block::new(BlockKind::Paragraph { runs }))
        }
        FragmentKind::Heading(level) => {
            let runs = fragment_runs(frag);
            if runs.iter().all(|r| r.text.trim().is_empty()) {
                return None;
            }
            Some(Block::new(BlockKind::Heading { level, runs }))
        }
        FragmentKind::List { ordered } => {
            let items = lower_list_items(&frag.inner);
            if items.is_empty() {
                // An empty list block is dropped during classification.
                return None;
            }
            Some(Block::new(BlockKind::List { ordered, items }))
        }
        FragmentKind::Quote => {
            let children: Vec<Block> = split_fragments(&frag.inner)
                .iter()
                .filter_map(lower_fragment)
                .collect();
            if children.is_empty() {
                return None;
            }
            Some(Block::new(BlockKind::Blockquote { children }))
        }
        FragmentKind::Code => {
            // Code text is opaque: inner styling is discarded with the tags.
            let text = strip_tags(&frag.inner);
            if text.trim().is_empty() {
                return None;
            }
            Some(Block::new(BlockKind::Code { text }))
        }
        FragmentKind::Rule => Some(Block::new(BlockKind::Rule)),
    }
}

/// The raw inner markup of each top-level `<li>` in a list fragment's body,
/// paired with the item tag's attribute text.
pub(crate) fn split_item_markup(list_inner: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    let mut cur = Cursor::new(list_inner);

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
        let Some(tag) = scan_raw_tag(&mut cur) else {
            cur.bump();
            continue;
        };
        if tag.closing || tag.name != "li" {
            continue;
        }
        let inner_start = cur.pos();
        let (inner_end, _) = find_matching_close(&mut cur, list_inner, "li");
        out.push((
            list_inner[inner_start..inner_end].to_string(),
            tag.attrs,
        ));
    }

    out
}

fn lower_list_items(list_inner: &str) -> Vec<ListItem> {
    split_item_markup(list_inner)
        .into_iter()
        .filter_map(|(item_inner, _attrs)| lower_list_item(&item_inner))
        .collect()
}

/// Attribute text of the items that survive lowering, in order. Mirrors the
/// filtering of [`lower_list_items`] so render-time hint pairing stays
/// index-aligned with the lowered items.
pub(crate) fn surviving_item_attrs(list_inner: &str) -> Vec<String> {
    split_item_markup(list_inner)
        .into_iter()
        .filter(|(item_inner, _)| lower_list_item(item_inner).is_some())
        .map(|(_, attrs)| attrs)
        .collect()
}

/// Lower one `<li>` body: its own runs plus nested blocks for sub-lists and
/// other block content inside the item.
fn lower_list_item(item_inner: &str) -> Option<ListItem> {
    let mut runs: Vec<Run> = Vec::new();
    let mut children: Vec<Block> = Vec::new();

    for frag in split_fragments(item_inner) {
        match frag.kind {
            FragmentKind::Paragraph if children.is_empty() => {
                // Leading text belongs to the item itself.
                runs.extend(fragment_runs(&frag));
            }
            _ => {
                if let Some(block) = lower_fragment(&frag) {
                    children.push(block);
                }
            }
        }
    }

    if runs.iter().all(|r| r.text.trim().is_empty()) && children.is_empty() {
        return None;
    }

    Some(ListItem {
        runs,
        children,
        ..ListItem::new(Vec::new())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fragment_of(markup: &str) -> Fragment {
        let mut frags = split_fragments(markup);
        assert_eq!(frags.len(), 1, "expected one fragment from {markup}");
        frags.remove(0)
    }

    #[test]
    fn paragraph_lowers_to_runs() {
        let block = lower_fragment(&fragment_of("<p>We will build X.</p>")).unwrap();
        match block.kind {
            BlockKind::Paragraph { runs } => {
                assert_eq!(runs.len(), 1);
                assert_eq!(runs[0].text, "We will build X.");
            }
            other => panic!("expected paragraph, got {other:?}"),
        }
    }

    #[test]
    fn empty_paragraph_lowers_to_nothing() {
        assert!(lower_fragment(&fragment_of("<p>   </p>")).is_none());
    }

    #[test]
    fn list_items_are_extracted() {
        let block = lower_fragment(&fragment_of("<ul><li>Design</li><li>Build</li></ul>")).unwrap();
        match block.kind {
            BlockKind::List { ordered, items } => {
                assert!(!ordered);
                assert_eq!(items.len(), 2);
                assert_eq!(items[0].text(), "Design");
                assert_eq!(items[1].text(), "Build");
            }
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn empty_list_is_dropped() {
        assert!(lower_fragment(&fragment_of("<ul></ul>")).is_none());
        assert!(lower_fragment(&fragment_of("<ul><li> </li></ul>")).is_none());
    }

    #[test]
    fn nested_list_becomes_item_children() {
        let block =
            lower_fragment(&fragment_of("<ul><li>a<ul><li>b</li></ul></li></ul>")).unwrap();
        match block.kind {
            BlockKind::List { items, .. } => {
                assert_eq!(items.len(), 1);
                assert_eq!(items[0].runs[0].text, "a");
                assert_eq!(items[0].children.len(), 1);
                match &items[0].children[0].kind {
                    BlockKind::List { items, .. } => assert_eq!(items[0].text(), "b"),
                    other => panic!("expected nested list, got {other:?}"),
                }
            }
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn quote_children_lower_recursively() {
        let block = lower_fragment(&fragment_of(
            "<blockquote><p>quoted</p><pre>code</pre></blockquote>",
        ))
        .unwrap();
        match block.kind {
            BlockKind::Blockquote { children } => {
                assert_eq!(children.len(), 2);
                assert!(matches!(children[0].kind, BlockKind::Paragraph { .. }));
                assert!(matches!(children[1].kind, BlockKind::Code { .. }));
            }
            other => panic!("expected quote, got {other:?}"),
        }
    }

    #[test]
    fn code_strips_inner_tags() {
        let block = lower_fragment(&fragment_of("<pre>let <b>x</b> = 1;</pre>")).unwrap();
        match block.kind {
            BlockKind::Code { text } => assert_eq!(text, "let x = 1;"),
            other => panic!("expected code, got {other:?}"),
        }
    }

    #[test]
    fn plain_text_fragment_uses_plain_conventions() {
        let block = lower_fragment(&fragment_of("budget is **firm** here")).unwrap();
        match block.kind {
            BlockKind::Paragraph { runs } => {
                assert_eq!(runs.len(), 3);
                assert!(runs[1].style.bold);
                assert_eq!(runs[1].text, "firm");
            }
            other => panic!("expected paragraph, got {other:?}"),
        }
    }

    #[test]
    fn markup_fragment_keeps_asterisks_literal() {
        let block = lower_fragment(&fragment_of("<p>budget is **firm** here</p>")).unwrap();
        match block.kind {
            BlockKind::Paragraph { runs } => {
                assert_eq!(runs.len(), 1);
                assert_eq!(runs[0].text, "budget is **firm** here");
            }
            other => panic!("expected paragraph, got {other:?}"),
        }
    }
}
