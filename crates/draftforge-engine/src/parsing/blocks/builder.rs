//! Section accumulation state machine.
//!
//! The builder threads an explicit accumulator through the fragment stream
//! instead of a process-wide "current section" pointer. States are: no open
//! section, open `Title` with empty body, open `Title` with body, open
//! `Bullets`, open `Numbered`, open `Plain`. Transitions are the
//! classification rules; the terminal action flushes whatever is open.

use draftforge_config::HeadingHeuristics;

use crate::models::block::{Block, BlockKind};
use crate::models::section::{Section, SectionKind};

use super::classify::{FragmentClass, classify_fragment};
use super::lower::{fragment_runs, lower_fragment};
use super::split::Fragment;

pub struct SectionBuilder<'a> {
    heuristics: &'a HeadingHeuristics,
    open: Option<Section>,
    out: Vec<Section>,
}

impl<'a> SectionBuilder<'a> {
    pub fn new(heuristics: &'a HeadingHeuristics) -> Self {
        Self {
            heuristics,
            open: None,
            out: Vec::new(),
        }
    }

    /// Feed one fragment through the classification rules.
    pub fn push(&mut self, frag: &Fragment) {
        match classify_fragment(frag, self.heuristics) {
            FragmentClass::ExplicitHeading(_) | FragmentClass::ImplicitHeading => {
                self.open_title(frag);
            }
            FragmentClass::List { ordered } => self.push_list(frag, ordered),
            FragmentClass::Content => self.push_content(frag),
        }
    }

    /// Flush the open section and return everything built.
    pub fn finish(mut self) -> Vec<Section> {
        self.flush();
        self.out
    }

    /// Rules 1–3: any heading closes the current section and opens a fresh
    /// `Title` with the heading as its title and an empty body.
    fn open_title(&mut self, frag: &Fragment) {
        self.flush();
        let mut section = Section::new(SectionKind::Title);
        section.title = fragment_runs(frag);
        section.raw_source = frag.raw.clone();
        self.open = Some(section);
    }

    /// Rule 4: list fragments attach to an empty `Title`, merge into an open
    /// same-kind list section, or open a new list section.
    fn push_list(&mut self, frag: &Fragment, ordered: bool) {
        let Some(block) = lower_fragment(frag) else {
            return; // empty list fragment, dropped
        };
        let kind = if ordered {
            SectionKind::Numbered
        } else {
            SectionKind::Bullets
        };

        match self.open.as_mut() {
            Some(open) if open.kind == SectionKind::Title && open.content.is_empty() => {
                open.kind = kind;
                open.content.push(block);
                open.raw_source.push_str(&frag.raw);
            }
            Some(open) if open.kind == kind => {
                merge_list_block(open, block, ordered);
                open.raw_source.push_str(&frag.raw);
            }
            _ => {
                self.flush();
                let mut section = Section::new(kind);
                section.content.push(block);
                section.raw_source = frag.raw.clone();
                self.open = Some(section);
            }
        }
    }

    /// Rule 5: ordinary content closes list sections, otherwise extends the
    /// open section's body (or opens a `Plain` one).
    fn push_content(&mut self, frag: &Fragment) {
        let Some(block) = lower_fragment(frag) else {
            return; // degenerate fragment with no content
        };

        let list_open = matches!(
            self.open.as_ref().map(|s| s.kind),
            Some(SectionKind::Bullets | SectionKind::Numbered)
        );
        if list_open {
            self.flush();
        }

        match self.open.as_mut() {
            Some(open) => {
                open.content.push(block);
                open.raw_source.push_str(&frag.raw);
            }
            None => {
                let mut section = Section::new(SectionKind::Plain);
                section.content.push(block);
                section.raw_source = frag.raw.clone();
                self.open = Some(section);
            }
        }
    }

    fn flush(&mut self) {
        if let Some(section) = self.open.take() {
            log::debug!(
                "closed {:?} section {} with {} block(s)",
                section.kind,
                section.id,
                section.content.len()
            );
            self.out.push(section);
        }
    }
}

/// Append a same-kind list block to a list section, merging items into the
/// trailing list block so adjacent fragments become one list.
fn merge_list_block(section: &mut Section, block: Block, ordered: bool) {
    if let Some(Block {
        kind:
            BlockKind::List {
                ordered: last_ordered,
                items: last_items,
            },
        ..
    }) = section.content.last_mut()
    {
        if *last_ordered == ordered {
            if let BlockKind::List { items, .. } = block.kind {
                last_items.extend(items);
                return;
            }
        }
    }
    section.content.push(block);
}
