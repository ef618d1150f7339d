use serde::Serialize;

use crate::models::block::Alignment;
use crate::models::run::Run;

/// Fixed type preset for one heading level.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct HeadingPreset {
    pub size_pt: f32,
    pub weight: u16,
}

/// The six heading presets, levels 1 through 6.
pub const HEADING_PRESETS: [HeadingPreset; 6] = [
    HeadingPreset {
        size_pt: 24.0,
        weight: 700,
    },
    HeadingPreset {
        size_pt: 20.0,
        weight: 700,
    },
    HeadingPreset {
        size_pt: 17.0,
        weight: 600,
    },
    HeadingPreset {
        size_pt: 15.0,
        weight: 600,
    },
    HeadingPreset {
        size_pt: 13.0,
        weight: 600,
    },
    HeadingPreset {
        size_pt: 12.0,
        weight: 600,
    },
];

/// Preset for a heading level, out-of-range levels clamped.
pub fn heading_preset(level: u8) -> HeadingPreset {
    HEADING_PRESETS[(level.clamp(1, 6) - 1) as usize]
}

/// Heading level used for section titles.
pub const SECTION_TITLE_LEVEL: u8 = 2;

/// Horizontal offset added per indent level, in points.
pub const INDENT_STEP_PT: f32 = 18.0;

/// Width of the right-aligned list marker column, in points.
pub const MARKER_COLUMN_PT: f32 = 22.0;

/// Text color applied to blockquote content, lighter than body text. The
/// quote's left rule uses the same color.
pub const QUOTE_TEXT_COLOR: &str = "#555555";

/// Thickness of a horizontal rule, in points.
pub const RULE_THICKNESS_PT: f32 = 0.75;

/// A laid-out node consumable by the external paginating engine.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum LayoutNode {
    /// Zero-height marker at the head of each section. The paginator reports
    /// `(section_id, page_number)` for the first page each marker lands on.
    SectionMark { section_id: String },
    Heading {
        preset: HeadingPreset,
        runs: Vec<Run>,
        alignment: Alignment,
        indent: u8,
    },
    Paragraph {
        runs: Vec<Run>,
        alignment: Alignment,
        indent: u8,
    },
    List {
        ordered: bool,
        items: Vec<LayoutItem>,
    },
    /// Children render with a left rule in [`QUOTE_TEXT_COLOR`].
    Quote { children: Vec<LayoutNode> },
    /// Opaque monospace text; inline styling was discarded at parse time.
    Code { text: String },
    Rule,
}

/// One laid-out list item: resolved marker text in a right-aligned column of
/// [`MARKER_COLUMN_PT`], then the item content.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LayoutItem {
    /// `"1."`, `"2."`, … for ordered lists; the bullet glyph otherwise.
    pub marker: String,
    pub runs: Vec<Run>,
    pub children: Vec<LayoutNode>,
    pub alignment: Alignment,
    pub indent: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_cover_all_levels_and_clamp() {
        assert_eq!(heading_preset(1), HEADING_PRESETS[0]);
        assert_eq!(heading_preset(6), HEADING_PRESETS[5]);
        assert_eq!(heading_preset(0), HEADING_PRESETS[0]);
        assert_eq!(heading_preset(9), HEADING_PRESETS[5]);
    }

    #[test]
    fn preset_sizes_decrease_with_level() {
        for pair in HEADING_PRESETS.windows(2) {
            assert!(pair[0].size_pt > pair[1].size_pt);
        }
    }
}
