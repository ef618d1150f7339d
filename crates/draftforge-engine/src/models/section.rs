use serde::Serialize;
use uuid::Uuid;

use super::block::Block;
use super::run::{Run, runs_text};

/// What a section is, decided by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SectionKind {
    /// Opened by an explicit or implicit heading; may accumulate body blocks.
    Title,
    /// Untitled prose.
    Plain,
    /// An unordered list section.
    Bullets,
    /// An ordered list section.
    Numbered,
}

/// The document's addressable unit: a titled or untitled group of blocks.
///
/// Sections are created by the classifier from paste/import events, edited in
/// place by the application, and replaced wholesale on document reset. The
/// `raw_source` keeps the markup the section was built from; the layout
/// renderer re-scans it for alignment/indent hints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub id: String,
    pub kind: SectionKind,
    pub title: Vec<Run>,
    pub content: Vec<Block>,
    pub raw_source: String,
}

impl Section {
    pub fn new(kind: SectionKind) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            title: Vec::new(),
            content: Vec::new(),
            raw_source: String::new(),
        }
    }

    pub fn title_text(&self) -> String {
        runs_text(&self.title)
    }

    /// Concatenated run text of the whole section, title first.
    pub fn text(&self) -> String {
        let mut parts = Vec::new();
        let title = self.title_text();
        if !title.is_empty() {
            parts.push(title);
        }
        parts.extend(self.content.iter().map(Block::text));
        parts.join("\n")
    }
}
