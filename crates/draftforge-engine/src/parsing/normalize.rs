//! Input normalization, applied before any classification.
//!
//! Pasted rich text arrives with entity-encoded characters, word-processor
//! bullet glyphs from symbol fonts, bullets wrapped in paragraph tags, and
//! split list fragments. The normalizer repairs all of that in one fixed
//! order so the classifier only ever sees canonical list markup.
//!
//! Normalization never fails; anything unrecognized passes through unchanged.

use std::sync::LazyLock;

use regex::Regex;

/// The canonical bullet every fake glyph is rewritten to.
pub const BULLET: char = '•';

/// Glyphs that word processors and symbol fonts use as bullets. The
/// private-use codepoints are the classic Wingdings/Symbol exports.
pub const FAKE_BULLET_GLYPHS: &[char] = &[
    '·', '○', '§', '◦', '▪', '⁃', '∙', '➢', '\u{f0b7}', '\u{f0a7}', '\u{f0d8}',
];

/// Named entities decoded by the explicit table. `&amp;` is handled by the
/// scanner itself so decoded output is never re-scanned.
const NAMED_ENTITIES: &[(&str, &str)] = &[
    ("&nbsp;", "\u{a0}"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&apos;", "'"),
    ("&mdash;", "\u{2014}"),
    ("&ndash;", "\u{2013}"),
    ("&lsquo;", "\u{2018}"),
    ("&rsquo;", "\u{2019}"),
    ("&ldquo;", "\u{201c}"),
    ("&rdquo;", "\u{201d}"),
    ("&hellip;", "\u{2026}"),
    ("&bull;", "\u{2022}"),
    ("&middot;", "\u{b7}"),
    ("&amp;", "&"),
];

/// Decode HTML entities in a single left-to-right pass.
///
/// Named references come from the explicit table; numeric references
/// (`&#8217;`, `&#x2019;`) are handed to the `html-escape` decoder one token
/// at a time. Single-pass scanning means already-decoded output is never
/// decoded again (`&amp;lt;` yields the literal text `&lt;`).
pub fn decode_entities(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        if let Some((entity, replacement)) = NAMED_ENTITIES
            .iter()
            .find(|(entity, _)| rest.starts_with(entity))
        {
            out.push_str(replacement);
            rest = &rest[entity.len()..];
            continue;
        }

        if rest.starts_with("&#") {
            if let Some(semi) = rest.find(';') {
                let token = &rest[..=semi];
                out.push_str(&html_escape::decode_html_entities(token));
                rest = &rest[semi + 1..];
                continue;
            }
        }

        out.push('&');
        rest = &rest[1..];
    }

    out.push_str(rest);
    out
}

static GLYPH_AT_LINE_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^([ \t\u{a0}]*)(?:[·○§◦▪⁃∙➢\u{f0b7}\u{f0a7}\u{f0d8}]|o )[ \t\u{a0}]*")
        .expect("bullet glyph pattern")
});

static GLYPH_AFTER_BLOCK_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?s)(<(?i:p|li|div)(?:\s[^>]*)?>)[ \t\u{a0}]*(?:[·○§◦▪⁃∙➢\u{f0b7}\u{f0a7}\u{f0d8}]|o )[ \t\u{a0}]*",
    )
    .expect("bullet glyph pattern")
});

static BULLET_PARAGRAPH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<p[^>]*>[ \t\u{a0}]*•[ \t\u{a0}]*(.*?)</p>").expect("bullet paragraph pattern")
});

static ADJACENT_UL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)</ul>\s*<ul[^>]*>").expect("list merge pattern"));

static ADJACENT_OL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)</ol>\s*<ol[^>]*>").expect("list merge pattern"));

static LINE_BREAK_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("line break pattern"));

/// Canonicalize fake bullet glyphs in leading position (the start of a
/// line, or immediately after a block-opening tag) to [`BULLET`].
/// Mid-sentence occurrences are never touched.
fn canonicalize_bullets(input: &str) -> String {
    let pass1 = GLYPH_AT_LINE_START.replace_all(input, "${1}• ");
    GLYPH_AFTER_BLOCK_TAG
        .replace_all(&pass1, "${1}• ")
        .into_owned()
}

/// Normalize raw markup. Steps run in a fixed order:
///
/// 1. entity decoding,
/// 2. fake-bullet canonicalization (leading position only),
/// 3. paragraph-wrapped bullets become real list items,
/// 4. adjacent same-kind list fragments merge into one,
/// 5. explicit line-break markers become paragraph boundaries.
pub fn normalize(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }

    let decoded = decode_entities(input);
    let bulleted = canonicalize_bullets(&decoded);
    let listed = BULLET_PARAGRAPH.replace_all(&bulleted, "<ul><li>$1</li></ul>");
    let merged = ADJACENT_UL.replace_all(&listed, "");
    let merged = ADJACENT_OL.replace_all(&merged, "");
    let out = LINE_BREAK_TAG.replace_all(&merged, "</p><p>");

    log::trace!(
        "normalized {} bytes of markup into {}",
        input.len(),
        out.len()
    );
    out.into_owned()
}
