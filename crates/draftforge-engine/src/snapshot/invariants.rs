use crate::models::block::{Block, BlockKind, INDENT_MAX, ListItem};
use crate::models::section::Section;
use crate::parsing::scan::strip_tags;

/// Validates model invariants over parsed sections.
///
/// Asserts that:
/// - Every block and list item carries an indent within `[0, INDENT_MAX]`
/// - No list block has zero items
///
/// # Panics
/// Panics with a descriptive message if any invariant is violated.
pub fn check(sections: &[Section]) {
    for section in sections {
        for block in &section.content {
            check_block(block, &section.id);
        }
    }
}

fn check_block(block: &Block, section_id: &str) {
    assert!(
        block.indent <= INDENT_MAX,
        "block indent {} out of bounds in section {section_id}",
        block.indent
    );
    match &block.kind {
        BlockKind::List { items, .. } => {
            assert!(
                !items.is_empty(),
                "empty list block survived classification in section {section_id}"
            );
            for item in items {
                check_item(item, section_id);
            }
        }
        BlockKind::Blockquote { children } => {
            for child in children {
                check_block(child, section_id);
            }
        }
        _ => {}
    }
}

fn check_item(item: &ListItem, section_id: &str) {
    assert!(
        item.indent <= INDENT_MAX,
        "item indent {} out of bounds in section {section_id}",
        item.indent
    );
    for child in &item.children {
        check_block(child, section_id);
    }
}

/// Validates the no-text-loss property: every non-whitespace character of
/// the normalized markup appears in the parsed sections, except characters
/// consumed as structural bullet markers.
///
/// Comparison ignores whitespace and bullet glyphs on both sides, which is
/// exactly the "modulo recognized structural markers" carve-out.
///
/// # Panics
/// Panics when characters were lost or invented.
pub fn check_text_preservation(normalized_markup: &str, sections: &[Section]) {
    let expected = squash(&strip_tags(normalized_markup));
    let actual = squash(
        &sections
            .iter()
            .map(Section::text)
            .collect::<Vec<_>>()
            .join("\n"),
    );
    assert_eq!(
        expected, actual,
        "parsed text diverges from normalized input"
    );
}

fn squash(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace() && *c != crate::parsing::normalize::BULLET)
        .collect()
}
