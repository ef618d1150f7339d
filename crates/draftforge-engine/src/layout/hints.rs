//! Render-time alignment/indent hint scanning.
//!
//! Hints are read from the classifier's retained markup when the renderer
//! runs, not carried on the parsed blocks. The same fragment is scanned
//! twice: once by the classifier for grouping, once here for style hints.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::block::{Alignment, clamp_indent};
use crate::parsing::scan::{attr_value, style_declaration};

/// Pixels of margin treated as one indent level in legacy exports.
const MARGIN_PX_PER_INDENT: f32 = 40.0;

static EDITOR_ALIGN_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ql-align-(center|right|justify)").expect("align class"));

static EDITOR_INDENT_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ql-indent-(\d+)").expect("indent class"));

/// Alignment and indent resolved for one block or list item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StyleHints {
    pub alignment: Alignment,
    pub indent: u8,
}

/// Scan one tag's raw attribute text for hints. Recognizes the `align`
/// attribute, `text-align` declarations, editor alignment/indent classes,
/// and `margin-left`/`padding-left` declarations from word-processor
/// exports.
pub fn scan_hints(attrs: &str) -> StyleHints {
    StyleHints {
        alignment: scan_alignment(attrs),
        indent: scan_indent(attrs),
    }
}

fn scan_alignment(attrs: &str) -> Alignment {
    let declared = attr_value(attrs, "align")
        .or_else(|| style_declaration(attrs, "text-align"))
        .map(|v| v.to_ascii_lowercase());

    if let Some(value) = declared {
        return match value.as_str() {
            "center" => Alignment::Center,
            "right" | "end" => Alignment::End,
            "justify" => Alignment::Justify,
            _ => Alignment::Start,
        };
    }

    if let Some(caps) = EDITOR_ALIGN_CLASS.captures(attrs) {
        return match &caps[1] {
            "center" => Alignment::Center,
            "right" => Alignment::End,
            _ => Alignment::Justify,
        };
    }

    Alignment::Start
}

fn scan_indent(attrs: &str) -> u8 {
    if let Some(caps) = EDITOR_INDENT_CLASS.captures(attrs) {
        if let Ok(level) = caps[1].parse::<u32>() {
            return clamp_indent(level);
        }
    }

    let margin = style_declaration(attrs, "margin-left")
        .or_else(|| style_declaration(attrs, "padding-left"));
    if let Some(value) = margin {
        if let Some(px) = value
            .trim()
            .strip_suffix("px")
            .and_then(|v| v.trim().parse::<f32>().ok())
        {
            return clamp_indent((px / MARGIN_PX_PER_INDENT).floor().max(0.0) as u32);
        }
    }

    0
}
