//! Tag-level tokenizer shared by the fragment splitter and the inline
//! resolver.
//!
//! Splits a markup fragment into alternating literal-text and tag tokens
//! with a byte cursor, rather than one monolithic pattern, so failure modes
//! (unbalanced tags, stray `<`) stay explicit. Anything that does not parse
//! as a tag is literal text; the scanner never fails.

use crate::parsing::normalize::decode_entities;

/// A byte cursor over one markup fragment.
#[derive(Clone)]
pub struct Cursor<'a> {
    s: &'a str,
    i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    pub fn pos(&self) -> usize {
        self.i
    }

    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    pub fn bump(&mut self) -> Option<u8> {
        let b = self.s.as_bytes().get(self.i).copied()?;
        self.i += 1;
        Some(b)
    }

    pub fn bump_n(&mut self, n: usize) {
        self.i = (self.i + n).min(self.s.len());
    }

    pub fn starts_with(&self, pat: &str) -> bool {
        self.s.as_bytes()[self.i..].starts_with(pat.as_bytes())
    }

    pub fn rest(&self) -> &'a str {
        &self.s[self.i..]
    }

    /// Advance to just past the next occurrence of `byte`, returning the
    /// consumed slice excluding it. `None` leaves the cursor untouched.
    pub fn take_until(&mut self, byte: u8) -> Option<&'a str> {
        let off = self.rest().bytes().position(|b| b == byte)?;
        let start = self.i;
        self.i += off + 1;
        Some(&self.s[start..start + off])
    }
}

/// An opening tag with its raw attribute text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagToken {
    /// Lowercased element name.
    pub name: String,
    /// Raw text between the name and `>`, untouched.
    pub attrs: String,
    pub self_closing: bool,
}

/// One token of a markup fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Literal text, entities not yet decoded.
    Text(String),
    Open(TagToken),
    /// Lowercased element name of a closing tag.
    Close(String),
    /// `<br>` in any of its spellings.
    LineBreak,
}

/// Tokenize a fragment into text and tag tokens.
///
/// A `<` that does not begin a well-formed tag is literal text. Comments and
/// declarations (`<!-- -->`, `<!...>`) are skipped entirely.
pub fn tokenize(fragment: &str) -> Vec<Token> {
    let mut cur = Cursor::new(fragment);
    let mut out = Vec::new();
    let mut text = String::new();

    while !cur.eof() {
        if cur.peek() != Some(b'<') {
            // Literal text runs to the next '<' or EOF.
            let rest = cur.rest();
            let end = rest.find('<').unwrap_or(rest.len());
            text.push_str(&rest[..end]);
            cur.bump_n(end);
            continue;
        }

        // At '<': try comment, declaration, close tag, open tag, in that order.
        if skip_markup_noise(&mut cur) {
            flush_text(&mut out, &mut text);
            continue;
        }

        match scan_tag(&mut cur) {
            Some(token) => {
                flush_text(&mut out, &mut text);
                out.push(token);
            }
            None => {
                // Stray '<' is literal text.
                cur.bump();
                text.push('<');
            }
        }
    }

    flush_text(&mut out, &mut text);
    out
}

fn flush_text(out: &mut Vec<Token>, text: &mut String) {
    if !text.is_empty() {
        out.push(Token::Text(std::mem::take(text)));
    }
}

fn skip_comment(cur: &mut Cursor<'_>) {
    cur.bump_n(4); // <!--
    while !cur.eof() {
        if cur.starts_with("-->") {
            cur.bump_n(3);
            return;
        }
        cur.bump();
    }
}

/// Skip a comment or `<!...>` declaration sitting at the cursor. Returns
/// whether anything was consumed.
pub(crate) fn skip_markup_noise(cur: &mut Cursor<'_>) -> bool {
    if cur.starts_with("<!--") {
        skip_comment(cur);
        return true;
    }
    if cur.starts_with("<!") {
        cur.bump_n(2);
        let _ = cur.take_until(b'>');
        return true;
    }
    false
}

/// A tag scanned in place, before token classification. Used directly by the
/// fragment splitter, which needs byte positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawTag {
    pub name: String,
    pub attrs: String,
    pub closing: bool,
    pub self_closing: bool,
}

/// Scan one tag at the cursor, which must sit on `<`. On success the cursor
/// advances past the closing `>`; otherwise it is restored and `None` is
/// returned (the input was not tag-shaped).
pub(crate) fn scan_raw_tag(cur: &mut Cursor<'_>) -> Option<RawTag> {
    let saved = cur.clone();
    cur.bump(); // <

    let closing = cur.peek() == Some(b'/');
    if closing {
        cur.bump();
    }

    let name_start = cur.pos();
    while matches!(cur.peek(), Some(b) if b.is_ascii_alphanumeric()) {
        cur.bump();
    }
    if cur.pos() == name_start || !cur.rest().contains('>') {
        *cur = saved;
        return None;
    }
    let name = saved.s[name_start..cur.pos()].to_ascii_lowercase();

    let attrs_start = cur.pos();
    // Attribute values may contain '>'; honor quoting while hunting the end.
    let mut quote: Option<u8> = None;
    loop {
        match cur.peek() {
            None => {
                *cur = saved;
                return None;
            }
            Some(b'"') | Some(b'\'') => {
                let b = cur.bump().unwrap_or(0);
                match quote {
                    Some(q) if q == b => quote = None,
                    None => quote = Some(b),
                    _ => {}
                }
            }
            Some(b'>') if quote.is_none() => break,
            _ => {
                cur.bump();
            }
        }
    }
    let attrs_end = cur.pos();
    cur.bump(); // >

    let raw_attrs = &saved.s[attrs_start..attrs_end];
    let self_closing = raw_attrs.trim_end().ends_with('/');
    let attrs = raw_attrs.trim_end().trim_end_matches('/').trim().to_string();

    Some(RawTag {
        name,
        attrs,
        closing,
        self_closing,
    })
}

/// Token-level wrapper around [`scan_raw_tag`].
fn scan_tag(cur: &mut Cursor<'_>) -> Option<Token> {
    let tag = scan_raw_tag(cur)?;
    if tag.closing {
        return Some(Token::Close(tag.name));
    }
    if tag.name == "br" {
        return Some(Token::LineBreak);
    }
    Some(Token::Open(TagToken {
        name: tag.name,
        attrs: tag.attrs,
        self_closing: tag.self_closing,
    }))
}

/// Text content of a fragment with all tags removed and entities decoded.
/// Line breaks become `\n`. Used for classification only; output paths
/// always re-parse inline runs from the original fragment.
pub fn strip_tags(fragment: &str) -> String {
    let mut out = String::new();
    for token in tokenize(fragment) {
        match token {
            Token::Text(t) => out.push_str(&decode_entities(&t)),
            Token::LineBreak => out.push('\n'),
            Token::Open(_) | Token::Close(_) => {}
        }
    }
    out
}

/// Extract a quoted or bare attribute value from a tag's raw attribute text.
pub fn attr_value(attrs: &str, name: &str) -> Option<String> {
    let lower = attrs.to_ascii_lowercase();
    let mut search = 0;
    while let Some(rel) = lower[search..].find(name) {
        let at = search + rel;
        search = at + name.len();
        // Must be a whole attribute name.
        let before_ok = at == 0
            || lower.as_bytes()[at - 1].is_ascii_whitespace()
            || lower.as_bytes()[at - 1] == b';';
        let after = lower[at + name.len()..].trim_start();
        if !before_ok || !after.starts_with('=') {
            continue;
        }
        let value_raw = after[1..].trim_start();
        let value_off = attrs.len() - value_raw.len();
        let value = &attrs[value_off..];
        return Some(match value.as_bytes().first() {
            Some(&q @ (b'"' | b'\'')) => {
                let inner = &value[1..];
                inner
                    .find(q as char)
                    .map(|end| inner[..end].to_string())
                    .unwrap_or_else(|| inner.to_string())
            }
            _ => value
                .split_whitespace()
                .next()
                .unwrap_or_default()
                .to_string(),
        });
    }
    None
}

/// Look up one CSS declaration inside a tag's `style="..."` attribute.
pub fn style_declaration(attrs: &str, property: &str) -> Option<String> {
    let style = attr_value(attrs, "style")?;
    for decl in style.split(';') {
        let Some((name, value)) = decl.split_once(':') else {
            continue;
        };
        if name.trim().eq_ignore_ascii_case(property) {
            return Some(value.trim().to_string());
        }
    }
    None
}
