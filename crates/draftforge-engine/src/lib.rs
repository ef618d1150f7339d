pub mod document;
pub mod layout;
pub mod models;
pub mod paging;
pub mod parsing;
pub mod snapshot;
pub mod table;

// Re-export key types for easier usage
pub use document::Document;
pub use layout::{LayoutItem, LayoutNode, render_sections};
pub use models::{
    Alignment, Block, BlockKind, INDENT_MAX, ListItem, Run, RunStyle, Script, Section, SectionKind,
    TableHeaders, TableRecord, TableRow,
};
pub use paging::{MarkerSink, OffsetTracker, PageOffsetMap, PassOutcome, RenderDebouncer, TrackerState};
pub use parsing::{ParsedInput, parse_input, parse_sections};
pub use table::parse_table;
