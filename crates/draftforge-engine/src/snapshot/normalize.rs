use serde::Serialize;

use crate::models::block::{Block, BlockKind, ListItem};
use crate::models::run::Run;
use crate::models::section::Section;

/// Serializable snapshot of a parsed document for test assertions.
#[derive(Debug, PartialEq, Serialize)]
pub struct Snap {
    pub sections: Vec<SectionSnap>,
}

/// Snapshot of one section.
#[derive(Debug, PartialEq, Serialize)]
pub struct SectionSnap {
    /// Kind as a string (e.g. "Title", "Bullets").
    pub kind: String,
    pub title: String,
    pub blocks: Vec<BlockSnap>,
}

/// Snapshot of one block: its kind label, text preview and runs.
#[derive(Debug, PartialEq, Serialize)]
pub struct BlockSnap {
    /// Kind as a string (e.g. "Paragraph", "List(ordered)", "Heading(2)").
    pub kind: String,
    pub text: String,
    pub runs: Vec<RunSnap>,
    pub children: Vec<BlockSnap>,
}

/// Snapshot of one run with its style flags compressed to a label.
#[derive(Debug, PartialEq, Serialize)]
pub struct RunSnap {
    pub text: String,
    /// Style flags joined with `+` (e.g. "bold+italic"), empty for default.
    pub style: String,
}

/// Convert sections into a serializable snapshot.
pub fn normalize(sections: &[Section]) -> Snap {
    Snap {
        sections: sections
            .iter()
            .map(|section| SectionSnap {
                kind: format!("{:?}", section.kind),
                title: section.title_text(),
                blocks: section.content.iter().map(block_snap).collect(),
            })
            .collect(),
    }
}

fn block_snap(block: &Block) -> BlockSnap {
    let (kind, runs, children) = match &block.kind {
        BlockKind::Heading { level, runs } => (format!("Heading({level})"), runs.clone(), vec![]),
        BlockKind::Paragraph { runs } => ("Paragraph".to_string(), runs.clone(), vec![]),
        BlockKind::List { ordered, items } => {
            let label = if *ordered { "List(ordered)" } else { "List(bullets)" };
            (label.to_string(), vec![], items.iter().map(item_snap).collect())
        }
        BlockKind::Blockquote { children } => (
            "Blockquote".to_string(),
            vec![],
            children.iter().map(block_snap).collect(),
        ),
        BlockKind::Code { .. } => ("Code".to_string(), vec![], vec![]),
        BlockKind::Rule => ("Rule".to_string(), vec![], vec![]),
    };

    BlockSnap {
        kind,
        text: block.text(),
        runs: runs.iter().map(run_snap).collect(),
        children,
    }
}

fn item_snap(item: &ListItem) -> BlockSnap {
    BlockSnap {
        kind: "Item".to_string(),
        text: item.text(),
        runs: item.runs.iter().map(run_snap).collect(),
        children: item.children.iter().map(block_snap).collect(),
    }
}

fn run_snap(run: &Run) -> RunSnap {
    let mut flags = Vec::new();
    if run.style.bold {
        flags.push("bold");
    }
    if run.style.italic {
        flags.push("italic");
    }
    if run.style.underline {
        flags.push("underline");
    }
    if run.style.strikethrough {
        flags.push("strike");
    }
    if run.style.monospace {
        flags.push("mono");
    }
    if run.style.link.is_some() {
        flags.push("link");
    }

    RunSnap {
        text: run.text.clone(),
        style: flags.join("+"),
    }
}
