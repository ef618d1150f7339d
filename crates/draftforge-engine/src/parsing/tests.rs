//! Integration tests for the parsing pipeline: the section accumulator's
//! transitions, merge behavior, and degenerate inputs.

use draftforge_config::HeadingHeuristics;
use pretty_assertions::assert_eq;

use crate::models::block::BlockKind;
use crate::models::section::SectionKind;
use crate::parsing::{ParsedInput, parse_input, parse_sections};

fn parse(raw: &str) -> Vec<crate::models::section::Section> {
    parse_sections(raw, &HeadingHeuristics::default())
}

#[test]
fn heading_then_paragraph_is_one_titled_section() {
    let sections = parse("<h2>Scope</h2><p>We will build X.</p>");
    assert_eq!(sections.len(), 1);

    let section = &sections[0];
    assert_eq!(section.kind, SectionKind::Title);
    assert_eq!(section.title_text(), "Scope");
    assert_eq!(section.content.len(), 1);
    match &section.content[0].kind {
        BlockKind::Paragraph { runs } => {
            assert_eq!(runs.len(), 1);
            assert_eq!(runs[0].text, "We will build X.");
        }
        other => panic!("expected paragraph, got {other:?}"),
    }
}

#[test]
fn bullet_paragraphs_become_one_bullets_section() {
    let sections = parse("<p>• Design</p><p>• Build</p>");
    assert_eq!(sections.len(), 1);

    let section = &sections[0];
    assert_eq!(section.kind, SectionKind::Bullets);
    assert!(section.title.is_empty());
    match &section.content[0].kind {
        BlockKind::List { ordered, items } => {
            assert!(!ordered);
            let texts: Vec<String> = items.iter().map(|i| i.text()).collect();
            assert_eq!(texts, vec!["Design".to_string(), "Build".to_string()]);
        }
        other => panic!("expected list, got {other:?}"),
    }
}

#[test]
fn list_attaches_to_preceding_empty_title() {
    let sections = parse("<h3>Deliverables</h3><ul><li>App</li><li>Docs</li></ul>");
    assert_eq!(sections.len(), 1);

    let section = &sections[0];
    assert_eq!(section.kind, SectionKind::Bullets);
    assert_eq!(section.title_text(), "Deliverables");
}

#[test]
fn ordered_list_makes_numbered_section() {
    let sections = parse("<h3>Steps</h3><ol><li>one</li><li>two</li></ol>");
    assert_eq!(sections[0].kind, SectionKind::Numbered);
}

#[test]
fn adjacent_same_kind_lists_merge_item_counts() {
    // Separated by a comment so the normalizer's textual merge does not fire;
    // the accumulator itself must merge the two fragments.
    let sections = parse("<ul><li>a</li><li>b</li></ul><!-- x --><ul><li>c</li></ul>");
    assert_eq!(sections.len(), 1);
    match &sections[0].content[0].kind {
        BlockKind::List { items, .. } => assert_eq!(items.len(), 3),
        other => panic!("expected list, got {other:?}"),
    }
}

#[test]
fn kind_mismatch_splits_sections() {
    let sections = parse("<ul><li>a</li></ul><ol><li>b</li></ol>");
    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].kind, SectionKind::Bullets);
    assert_eq!(sections[1].kind, SectionKind::Numbered);
}

#[test]
fn paragraph_after_list_opens_plain_section() {
    let long = "This paragraph is long enough that the heading heuristics leave it alone, clearly.";
    let sections = parse(&format!("<ul><li>a</li></ul><p>{long}</p>"));
    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].kind, SectionKind::Bullets);
    assert_eq!(sections[1].kind, SectionKind::Plain);
}

#[test]
fn title_section_accumulates_body_blocks() {
    let body1 = "First paragraph of the section body, written out at length to stay body text.";
    let body2 = "Second paragraph of the section body, also long enough to avoid promotion.";
    let sections = parse(&format!("<h2>Approach</h2><p>{body1}</p><p>{body2}</p>"));
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].content.len(), 2);
}

#[test]
fn two_headings_make_two_sections() {
    let sections = parse("<h2>One</h2><h2>Two</h2>");
    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].title_text(), "One");
    assert!(sections[0].content.is_empty());
    assert_eq!(sections[1].title_text(), "Two");
}

#[test]
fn implicit_bold_heading_opens_section() {
    let body = "The full statement of work follows in the sections below this heading.";
    let sections = parse(&format!("<p><b>Statement of Work</b></p><p>{body}</p>"));
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].kind, SectionKind::Title);
    assert_eq!(sections[0].title_text(), "Statement of Work");
    assert!(sections[0].title[0].style.bold);
}

#[test]
fn quote_and_code_extend_open_section() {
    let sections = parse("<h2>Notes</h2><blockquote><p>as discussed</p></blockquote><pre>fn x() {}</pre>");
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].content.len(), 2);
    assert!(matches!(
        sections[0].content[0].kind,
        BlockKind::Blockquote { .. }
    ));
    assert!(matches!(sections[0].content[1].kind, BlockKind::Code { .. }));
}

#[test]
fn empty_input_yields_no_sections() {
    assert!(parse("").is_empty());
    assert!(parse("   \n  ").is_empty());
}

#[test]
fn single_line_yields_one_section() {
    let line = "A single line of content with no structure around it at all, as pasted.";
    let sections = parse(line);
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].kind, SectionKind::Plain);
}

#[test]
fn json_shaped_input_passes_through_opaque() {
    let delta = r#"{"ops":[{"insert":"Hello"}]}"#;
    match parse_input(delta, &HeadingHeuristics::default()) {
        ParsedInput::Delta(raw) => assert_eq!(raw, delta),
        other => panic!("expected delta passthrough, got {other:?}"),
    }

    let array = r#"[{"insert":"Hello"}]"#;
    assert!(matches!(
        parse_input(array, &HeadingHeuristics::default()),
        ParsedInput::Delta(_)
    ));
}

#[test]
fn markup_input_is_classified() {
    match parse_input("<h2>Scope</h2>", &HeadingHeuristics::default()) {
        ParsedInput::Sections(sections) => assert_eq!(sections.len(), 1),
        other => panic!("expected sections, got {other:?}"),
    }
}

#[test]
fn raw_source_is_retained_per_section() {
    let sections = parse("<h2>Scope</h2><ul><li>a</li></ul>");
    assert_eq!(sections[0].raw_source, "<h2>Scope</h2><ul><li>a</li></ul>");
}

#[test]
fn tight_heuristics_change_classification() {
    let heuristics = HeadingHeuristics {
        short_min_len: 2,
        short_max_len: 4,
        ..HeadingHeuristics::default()
    };
    // Eleven characters: a heading under defaults, content under the
    // tightened ceiling.
    let sections = parse_sections("<p>Projectplan</p>", &heuristics);
    assert_eq!(sections[0].kind, SectionKind::Plain);
}
