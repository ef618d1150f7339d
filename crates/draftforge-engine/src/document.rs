//! Versioned document container.
//!
//! Holds the ordered section list behind a version counter. Every mutation
//! bumps the version, which is how the host knows to invalidate published
//! page offsets and arm the render debouncer. There is no incremental
//! update anywhere: edits replace content and the whole document re-renders.

use draftforge_config::HeadingHeuristics;

use crate::layout::{LayoutNode, render_sections};
use crate::models::section::Section;
use crate::parsing::blocks::{lower_fragment, split_fragments};
use crate::parsing::normalize::normalize;
use crate::parsing::parse_sections;

pub struct Document {
    sections: Vec<Section>,
    version: u64,
    heuristics: HeadingHeuristics,
}

impl Document {
    pub fn new(heuristics: HeadingHeuristics) -> Self {
        Self {
            sections: Vec::new(),
            version: 0,
            heuristics,
        }
    }

    /// Build a document by classifying raw markup.
    pub fn from_markup(raw: &str, heuristics: HeadingHeuristics) -> Self {
        let sections = parse_sections(raw, &heuristics);
        Self {
            sections,
            version: 0,
            heuristics,
        }
    }

    /// Version counter, incremented by every mutation.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section_ids(&self) -> Vec<String> {
        self.sections.iter().map(|s| s.id.clone()).collect()
    }

    /// Discard everything and classify `raw` from scratch.
    pub fn reset(&mut self, raw: &str) {
        self.sections = parse_sections(raw, &self.heuristics);
        self.bump();
    }

    /// Append freshly classified sections from `raw`.
    pub fn append_markup(&mut self, raw: &str) {
        self.sections.extend(parse_sections(raw, &self.heuristics));
        self.bump();
    }

    /// Replace one section's body in place from edited markup, keeping its
    /// id and title. Returns false when the id is unknown.
    pub fn replace_section_content(&mut self, section_id: &str, raw: &str) -> bool {
        let Some(section) = self.sections.iter_mut().find(|s| s.id == section_id) else {
            return false;
        };

        let normalized = normalize(raw);
        section.content = split_fragments(&normalized)
            .iter()
            .filter_map(lower_fragment)
            .collect();
        section.raw_source = normalized;
        self.bump();
        true
    }

    /// Remove one section. Returns false when the id is unknown.
    pub fn remove_section(&mut self, section_id: &str) -> bool {
        let before = self.sections.len();
        self.sections.retain(|s| s.id != section_id);
        if self.sections.len() == before {
            return false;
        }
        self.bump();
        true
    }

    /// Render the current sections into the layout tree.
    pub fn layout(&self) -> Vec<LayoutNode> {
        render_sections(&self.sections)
    }

    fn bump(&mut self) {
        self.version += 1;
        log::debug!("document now at version {}", self.version);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::block::BlockKind;
    use crate::models::section::SectionKind;

    fn doc(raw: &str) -> Document {
        Document::from_markup(raw, HeadingHeuristics::default())
    }

    #[test]
    fn mutations_bump_version() {
        let mut document = doc("<h2>One</h2>");
        assert_eq!(document.version(), 0);

        document.append_markup("<h2>Two</h2>");
        assert_eq!(document.version(), 1);

        let id = document.section_ids()[0].clone();
        document.replace_section_content(&id, "<p>New body text for the first section here.</p>");
        assert_eq!(document.version(), 2);

        document.remove_section(&id);
        assert_eq!(document.version(), 3);

        document.reset("");
        assert_eq!(document.version(), 4);
    }

    #[test]
    fn replace_keeps_id_and_title() {
        let mut document = doc("<h2>Scope</h2><p>Original body for the scope section here.</p>");
        let id = document.section_ids()[0].clone();

        assert!(document.replace_section_content(&id, "<p>Rewritten body for the scope section.</p>"));

        let section = &document.sections()[0];
        assert_eq!(section.id, id);
        assert_eq!(section.title_text(), "Scope");
        match &section.content[0].kind {
            BlockKind::Paragraph { runs } => {
                assert_eq!(runs[0].text, "Rewritten body for the scope section.");
            }
            other => panic!("expected paragraph, got {other:?}"),
        }
    }

    #[test]
    fn replace_unknown_id_is_refused() {
        let mut document = doc("<h2>Scope</h2>");
        assert!(!document.replace_section_content("missing", "<p>x</p>"));
        assert_eq!(document.version(), 0);
    }

    #[test]
    fn reset_discards_old_sections() {
        let mut document = doc("<h2>One</h2><h2>Two</h2>");
        let old_ids = document.section_ids();

        document.reset("<h2>Fresh</h2>");
        let new_ids = document.section_ids();

        assert_eq!(new_ids.len(), 1);
        assert!(!old_ids.contains(&new_ids[0]));
        assert_eq!(document.sections()[0].kind, SectionKind::Title);
    }

    #[test]
    fn layout_emits_marks_for_current_sections() {
        let document = doc("<h2>One</h2><h2>Two</h2>");
        let marks = document
            .layout()
            .into_iter()
            .filter(|n| matches!(n, crate::layout::LayoutNode::SectionMark { .. }))
            .count();
        assert_eq!(marks, 2);
    }
}
