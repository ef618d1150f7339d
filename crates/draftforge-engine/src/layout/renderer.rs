//! Section-to-layout rendering.
//!
//! Consumes classified sections and emits the node tree handed to the
//! external paginating engine. Every section is preceded by a
//! [`LayoutNode::SectionMark`] so the paginator can report which page the
//! section starts on. Alignment/indent hints come from a second scan of the
//! section's retained markup (see [`hints`]).
//!
//! [`hints`]: crate::layout::hints

use crate::models::block::{Block, BlockKind, ListItem};
use crate::models::section::Section;
use crate::parsing::blocks::lower::surviving_item_attrs;
use crate::parsing::blocks::{Fragment, lower_fragment, split_fragments};
use crate::parsing::normalize::BULLET;

use super::hints::{StyleHints, scan_hints};
use super::nodes::{LayoutItem, LayoutNode, SECTION_TITLE_LEVEL, heading_preset};

/// Render sections into the layout tree for the paginating engine.
pub fn render_sections(sections: &[Section]) -> Vec<LayoutNode> {
    let mut out = Vec::new();

    for section in sections {
        out.push(LayoutNode::SectionMark {
            section_id: section.id.clone(),
        });

        // Second scan of the retained markup, for style hints only.
        let fragments = split_fragments(&section.raw_source);
        let mut fragments = fragments.iter();

        if !section.title.is_empty() {
            // The first fragment is always the one that titled the section.
            let title_hints = fragments
                .next()
                .map(|f| scan_hints(&f.attrs))
                .unwrap_or_default();
            out.push(LayoutNode::Heading {
                preset: heading_preset(SECTION_TITLE_LEVEL),
                runs: section.title.clone(),
                alignment: title_hints.alignment,
                indent: title_hints.indent,
            });
        }

        // Re-pair remaining fragments with content blocks. Lowering is
        // deterministic, so fragments that produced no block are filtered
        // the same way they were during classification.
        let mut content_fragments =
            fragments.filter(|frag| lower_fragment(frag).is_some());
        for block in &section.content {
            let fragment = content_fragments.next();
            out.push(render_block(block, fragment));
        }
    }

    log::debug!(
        "rendered {} section(s) into {} layout node(s)",
        sections.len(),
        out.len()
    );
    out
}

fn render_block(block: &Block, fragment: Option<&Fragment>) -> LayoutNode {
    let hints = fragment
        .map(|f| scan_hints(&f.attrs))
        .unwrap_or(StyleHints {
            alignment: block.alignment,
            indent: block.indent,
        });

    match &block.kind {
        BlockKind::Heading { level, runs } => LayoutNode::Heading {
            preset: heading_preset(*level),
            runs: runs.clone(),
            alignment: hints.alignment,
            indent: hints.indent,
        },
        BlockKind::Paragraph { runs } => LayoutNode::Paragraph {
            runs: runs.clone(),
            alignment: hints.alignment,
            indent: hints.indent,
        },
        BlockKind::List { ordered, items } => render_list(*ordered, items, fragment),
        BlockKind::Blockquote { children } => LayoutNode::Quote {
            children: children.iter().map(|b| render_block(b, None)).collect(),
        },
        BlockKind::Code { text } => LayoutNode::Code { text: text.clone() },
        BlockKind::Rule => LayoutNode::Rule,
    }
}

/// Render a list with a running marker counter. The counter restarts for
/// every list node, including nested ones.
fn render_list(ordered: bool, items: &[ListItem], fragment: Option<&Fragment>) -> LayoutNode {
    let item_attrs: Vec<String> = fragment
        .map(|f| surviving_item_attrs(&f.inner))
        .unwrap_or_default();

    let rendered: Vec<LayoutItem> = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let marker = if ordered {
                format!("{}.", index + 1)
            } else {
                BULLET.to_string()
            };
            let hints = item_attrs
                .get(index)
                .map(|attrs| scan_hints(attrs))
                .unwrap_or(StyleHints {
                    alignment: item.alignment,
                    indent: item.indent,
                });
            LayoutItem {
                marker,
                runs: item.runs.clone(),
                children: item
                    .children
                    .iter()
                    .map(|b| render_block(b, None))
                    .collect(),
                alignment: hints.alignment,
                indent: hints.indent,
            }
        })
        .collect();

    LayoutNode::List {
        ordered,
        items: rendered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use draftforge_config::HeadingHeuristics;
    use pretty_assertions::assert_eq;

    use crate::models::block::Alignment;
    use crate::parsing::parse_sections;

    fn render(markup: &str) -> Vec<LayoutNode> {
        let sections = parse_sections(markup, &HeadingHeuristics::default());
        render_sections(&sections)
    }

    #[test]
    fn every_section_starts_with_a_mark() {
        let nodes = render("<h2>One</h2><h2>Two</h2>");
        assert_eq!(nodes.len(), 4);
        assert!(matches!(nodes[0], LayoutNode::SectionMark { .. }));
        assert!(matches!(nodes[1], LayoutNode::Heading { .. }));
        assert!(matches!(nodes[2], LayoutNode::SectionMark { .. }));
        assert!(matches!(nodes[3], LayoutNode::Heading { .. }));
    }

    #[test]
    fn section_marks_carry_section_ids() {
        let sections = parse_sections("<h2>Scope</h2>", &HeadingHeuristics::default());
        let nodes = render_sections(&sections);
        match &nodes[0] {
            LayoutNode::SectionMark { section_id } => assert_eq!(section_id, &sections[0].id),
            other => panic!("expected mark, got {other:?}"),
        }
    }

    #[test]
    fn ordered_markers_count_per_list() {
        let nodes = render("<ol><li>a</li><li>b</li><li>c</li></ol>");
        match &nodes[1] {
            LayoutNode::List { ordered, items } => {
                assert!(ordered);
                let markers: Vec<&str> = items.iter().map(|i| i.marker.as_str()).collect();
                assert_eq!(markers, vec!["1.", "2.", "3."]);
            }
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn nested_list_counter_restarts() {
        let nodes = render("<ol><li>a</li><li>b<ol><li>x</li></ol></li></ol>");
        match &nodes[1] {
            LayoutNode::List { items, .. } => {
                assert_eq!(items[1].marker, "2.");
                match &items[1].children[0] {
                    LayoutNode::List { items, .. } => assert_eq!(items[0].marker, "1."),
                    other => panic!("expected nested list, got {other:?}"),
                }
            }
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn unordered_markers_are_bullets() {
        let nodes = render("<ul><li>a</li></ul>");
        match &nodes[1] {
            LayoutNode::List { items, .. } => assert_eq!(items[0].marker, "•"),
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn alignment_hint_is_rescanned_from_markup() {
        let long = "This centered paragraph is long enough to be classified as body content.";
        let nodes = render(&format!(r#"<p class="ql-align-center">{long}</p>"#));
        match &nodes[1] {
            LayoutNode::Paragraph { alignment, .. } => assert_eq!(*alignment, Alignment::Center),
            other => panic!("expected paragraph, got {other:?}"),
        }
    }

    #[test]
    fn item_indent_hint_is_rescanned_and_clamped() {
        let nodes = render(r#"<ul><li class="ql-indent-2">a</li><li class="ql-indent-12">b</li></ul>"#);
        match &nodes[1] {
            LayoutNode::List { items, .. } => {
                assert_eq!(items[0].indent, 2);
                assert_eq!(items[1].indent, 8);
            }
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn quote_children_render_recursively() {
        let nodes = render("<blockquote><p>outer</p><blockquote><p>inner</p></blockquote></blockquote>");
        match &nodes[1] {
            LayoutNode::Quote { children } => {
                assert_eq!(children.len(), 2);
                assert!(matches!(children[0], LayoutNode::Paragraph { .. }));
                assert!(matches!(children[1], LayoutNode::Quote { .. }));
            }
            other => panic!("expected quote, got {other:?}"),
        }
    }

    #[test]
    fn title_heading_uses_section_preset() {
        let nodes = render("<h4>Scope</h4>");
        match &nodes[1] {
            LayoutNode::Heading { preset, .. } => {
                assert_eq!(*preset, heading_preset(SECTION_TITLE_LEVEL));
            }
            other => panic!("expected heading, got {other:?}"),
        }
    }

    #[test]
    fn rule_renders_as_separator() {
        let long = "Some ordinary body text that will not be promoted to a heading here.";
        let nodes = render(&format!("<p>{long}</p><hr>"));
        assert!(matches!(nodes[2], LayoutNode::Rule));
    }

    #[test]
    fn code_renders_opaque() {
        let nodes = render("<h2>Api</h2><pre>let <b>x</b> = 1;</pre>");
        match &nodes[2] {
            LayoutNode::Code { text } => assert_eq!(text, "let x = 1;"),
            other => panic!("expected code, got {other:?}"),
        }
    }
}
