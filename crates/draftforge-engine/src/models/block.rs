use serde::Serialize;

use super::run::Run;

/// Deepest indent level a block or list item may carry.
pub const INDENT_MAX: u8 = 8;

/// Horizontal alignment of a block's content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Alignment {
    #[default]
    Start,
    Center,
    End,
    Justify,
}

/// Clamp a raw indent hint into the supported `[0, INDENT_MAX]` range.
pub fn clamp_indent(raw: u32) -> u8 {
    raw.min(u32::from(INDENT_MAX)) as u8
}

/// A typed structural unit of a section's content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    pub kind: BlockKind,
    pub alignment: Alignment,
    pub indent: u8,
}

impl Block {
    pub fn new(kind: BlockKind) -> Self {
        Self {
            kind,
            alignment: Alignment::default(),
            indent: 0,
        }
    }

    pub fn with_hints(kind: BlockKind, alignment: Alignment, indent: u8) -> Self {
        Self {
            kind,
            alignment,
            indent: indent.min(INDENT_MAX),
        }
    }

    /// Concatenated run text of this block and its descendants, structural
    /// markers excluded. Used by classification and the no-text-loss check.
    pub fn text(&self) -> String {
        match &self.kind {
            BlockKind::Heading { runs, .. } | BlockKind::Paragraph { runs } => {
                runs.iter().map(|r| r.text.as_str()).collect()
            }
            BlockKind::List { items, .. } => items
                .iter()
                .map(ListItem::text)
                .collect::<Vec<_>>()
                .join("\n"),
            BlockKind::Blockquote { children } => children
                .iter()
                .map(Block::text)
                .collect::<Vec<_>>()
                .join("\n"),
            BlockKind::Code { text } => text.clone(),
            BlockKind::Rule => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum BlockKind {
    /// Heading with level 1..=6.
    Heading { level: u8, runs: Vec<Run> },
    Paragraph {
        runs: Vec<Run>,
    },
    /// Never empty: the classifier drops lists with zero items.
    List {
        ordered: bool,
        items: Vec<ListItem>,
    },
    Blockquote {
        children: Vec<Block>,
    },
    /// Inline styling inside code is discarded; the text is opaque.
    Code {
        text: String,
    },
    Rule,
}

/// One item of a list block: its own runs, nested blocks for sub-lists,
/// and per-item alignment/indent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListItem {
    pub runs: Vec<Run>,
    pub children: Vec<Block>,
    pub alignment: Alignment,
    pub indent: u8,
}

impl ListItem {
    pub fn new(runs: Vec<Run>) -> Self {
        Self {
            runs,
            children: Vec::new(),
            alignment: Alignment::default(),
            indent: 0,
        }
    }

    pub fn text(&self) -> String {
        let own: String = self.runs.iter().map(|r| r.text.as_str()).collect();
        if self.children.is_empty() {
            own
        } else {
            let nested = self
                .children
                .iter()
                .map(Block::text)
                .collect::<Vec<_>>()
                .join("\n");
            if own.is_empty() {
                nested
            } else {
                format!("{own}\n{nested}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_respects_ceiling() {
        assert_eq!(clamp_indent(0), 0);
        assert_eq!(clamp_indent(8), 8);
        assert_eq!(clamp_indent(9), 8);
        assert_eq!(clamp_indent(u32::MAX), 8);
    }

    #[test]
    fn with_hints_clamps_indent() {
        let block = Block::with_hints(BlockKind::Rule, Alignment::Center, 12);
        assert_eq!(block.indent, INDENT_MAX);
        assert_eq!(block.alignment, Alignment::Center);
    }

    #[test]
    fn block_text_walks_nested_structure() {
        let block = Block::new(BlockKind::Blockquote {
            children: vec![
                Block::new(BlockKind::Paragraph {
                    runs: vec![Run::plain("outer")],
                }),
                Block::new(BlockKind::List {
                    ordered: false,
                    items: vec![ListItem::new(vec![Run::plain("inner")])],
                }),
            ],
        });
        assert_eq!(block.text(), "outer\ninner");
    }
}
