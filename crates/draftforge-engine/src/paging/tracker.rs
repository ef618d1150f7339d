//! Section page-offset tracking.
//!
//! The external paginating engine reports `(section_id, page_number)` once
//! per marker occurrence per rendered page, from inside its own render
//! callback. Those reports must never mutate shared state synchronously, so
//! the sink queues generation-tagged messages on a channel and the tracker
//! applies them only when the host declares the pass complete.
//!
//! Every pass carries a monotonically increasing generation. Only the latest
//! requested generation may publish; anything else drains to nowhere. The
//! published map is replaced whole, never patched, so stale section ids
//! cannot survive a rebuild.

use std::collections::HashMap;

use crossbeam_channel::{Receiver, Sender, unbounded};

/// Monotonically increasing render-pass tag.
pub type Generation = u64;

/// Section id → zero-based starting physical page.
pub type PageOffsetMap = HashMap<String, usize>;

/// One queued marker report.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PageMark {
    generation: Generation,
    section_id: String,
    page_number: usize,
}

/// Cloneable sink handed to the paginator for one render pass.
///
/// `report` is fire-and-forget and safe to call from inside the paginator's
/// render callback: it only enqueues.
#[derive(Debug, Clone)]
pub struct MarkerSink {
    generation: Generation,
    tx: Sender<PageMark>,
}

impl MarkerSink {
    /// Report that a section's marker was encountered on a page. Pages are
    /// 1-based in the callback contract; zero is ignored.
    pub fn report(&self, section_id: &str, page_number: usize) {
        if page_number == 0 {
            log::warn!("ignoring page report 0 for section {section_id}");
            return;
        }
        // The tracker may already be gone during shutdown; that is fine.
        let _ = self.tx.send(PageMark {
            generation: self.generation,
            section_id: section_id.to_string(),
            page_number,
        });
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }
}

/// Whether the published offsets reflect the latest rendered document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerState {
    /// Awaiting a render pass; published offsets may lag the document.
    Stale,
    /// Offsets reflect the latest completed pass.
    Current,
}

/// What happened when a pass completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassOutcome {
    Published,
    /// The pass was superseded by a newer one (or invalidated by an edit);
    /// its results were dropped.
    DiscardedStale,
}

pub struct OffsetTracker {
    state: TrackerState,
    offsets: PageOffsetMap,
    next_generation: Generation,
    /// The latest requested pass: its generation and the section ids of the
    /// document version it renders.
    pending: Option<(Generation, Vec<String>)>,
    tx: Sender<PageMark>,
    rx: Receiver<PageMark>,
}

impl OffsetTracker {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self {
            state: TrackerState::Stale,
            offsets: PageOffsetMap::new(),
            next_generation: 0,
            pending: None,
            tx,
            rx,
        }
    }

    pub fn state(&self) -> TrackerState {
        self.state
    }

    /// The last published offsets. Retained through edits and failed passes;
    /// check [`state`](Self::state) for freshness.
    pub fn offsets(&self) -> &PageOffsetMap {
        &self.offsets
    }

    pub fn offset_of(&self, section_id: &str) -> Option<usize> {
        self.offsets.get(section_id).copied()
    }

    /// An edit arrived: published offsets no longer describe the document,
    /// and any in-flight pass must not publish.
    pub fn invalidate(&mut self) {
        self.state = TrackerState::Stale;
        self.pending = None;
    }

    /// Start a render pass for a document version with the given section
    /// ids. Supersedes any in-flight pass.
    pub fn begin_pass(&mut self, section_ids: Vec<String>) -> MarkerSink {
        self.next_generation += 1;
        let generation = self.next_generation;

        // Anything still queued belongs to an abandoned pass.
        let dropped = self.rx.try_iter().count();
        if dropped > 0 {
            log::debug!("dropped {dropped} marker(s) from abandoned passes");
        }

        self.pending = Some((generation, section_ids));
        log::debug!("render pass generation {generation} begun");
        MarkerSink {
            generation,
            tx: self.tx.clone(),
        }
    }

    /// The paginator finished the pass: drain the queue and, if this is
    /// still the latest requested generation, atomically publish a fresh
    /// offset map.
    pub fn complete_pass(&mut self, sink: &MarkerSink) -> PassOutcome {
        // Staleness is decided before touching the queue: a late completion
        // must not consume markers belonging to a newer in-flight pass.
        let Some((generation, section_ids)) = self.pending.take() else {
            log::debug!(
                "discarding completed pass {} with no pass pending",
                sink.generation
            );
            return PassOutcome::DiscardedStale;
        };
        if generation != sink.generation {
            self.pending = Some((generation, section_ids));
            log::debug!(
                "discarding stale pass {} (latest is {generation})",
                sink.generation
            );
            return PassOutcome::DiscardedStale;
        }

        let marks: Vec<PageMark> = self.rx.try_iter().collect();
        let mut fresh = PageOffsetMap::new();
        for mark in marks {
            if mark.generation != generation {
                continue;
            }
            if !section_ids.contains(&mark.section_id) {
                log::warn!(
                    "marker for unknown section {} in generation {generation}",
                    mark.section_id
                );
                continue;
            }
            // Zero-based publish. Duplicate and out-of-order reports resolve
            // to the lowest page, which makes the result order-independent
            // and matches first-seen under in-order delivery.
            let page = mark.page_number - 1;
            fresh
                .entry(mark.section_id)
                .and_modify(|existing| *existing = (*existing).min(page))
                .or_insert(page);
        }

        self.offsets = fresh;
        self.state = TrackerState::Current;
        log::debug!(
            "published {} offset(s) for generation {generation}",
            self.offsets.len()
        );
        PassOutcome::Published
    }

    /// The paginator failed mid-pass. Previous offsets are retained; queued
    /// markers for the failed pass are dropped.
    pub fn fail_pass(&mut self, sink: &MarkerSink) {
        if matches!(self.pending, Some((generation, _)) if generation == sink.generation) {
            self.pending = None;
            let _ = self.rx.try_iter().count();
        }
        log::warn!(
            "render pass {} failed; keeping previous offsets",
            sink.generation
        );
    }
}

impl Default for OffsetTracker {
    fn default() -> Self {
        Self::new()
    }
}
