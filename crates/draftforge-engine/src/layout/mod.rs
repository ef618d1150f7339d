//! # Layout Rendering
//!
//! Converts classified sections into the typed node tree consumed by the
//! external paginating engine.
//!
//! ## Modules
//!
//! - **`nodes`**: [`LayoutNode`] tree, heading presets and layout constants
//! - **`hints`**: render-time re-scan of retained markup for alignment and
//!   indent hints
//! - **`renderer`**: section walk, list marker counters, quote recursion

pub mod hints;
pub mod nodes;
pub mod renderer;

pub use hints::{StyleHints, scan_hints};
pub use nodes::{
    HEADING_PRESETS, HeadingPreset, INDENT_STEP_PT, LayoutItem, LayoutNode, MARKER_COLUMN_PT,
    QUOTE_TEXT_COLOR, RULE_THICKNESS_PT, SECTION_TITLE_LEVEL, heading_preset,
};
pub use renderer::render_sections;
