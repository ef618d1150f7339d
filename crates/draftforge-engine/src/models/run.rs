use serde::Serialize;

/// Vertical script position of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Script {
    #[default]
    Normal,
    Superscript,
    Subscript,
}

/// Style snapshot carried by a [`Run`].
///
/// Assembled by the inline resolver's style stack: opening a tag clones the
/// top-of-stack style and overrides the fields that tag affects, closing a
/// tag pops. There is no dynamic merging anywhere else; every field is set
/// explicitly by [`RunStyle`] methods or by the resolver.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub script: Script,
    pub monospace: bool,
    /// Text color as a CSS color string, when declared.
    pub color: Option<String>,
    /// Background color as a CSS color string, when declared.
    pub background: Option<String>,
    /// Font family, when declared.
    pub font_family: Option<String>,
    /// Font size in pixels, when declared.
    pub font_size: Option<f32>,
    /// Hyperlink target captured from an anchor tag.
    pub link: Option<String>,
}

impl RunStyle {
    /// Field-by-field override: apply the declarations of `other` on top of
    /// `self`, keeping inherited values where `other` declares nothing.
    ///
    /// Boolean attributes only ever turn on through an override; a nested tag
    /// cannot un-bold its parent.
    #[must_use]
    pub fn overridden_by(&self, other: &StyleOverride) -> RunStyle {
        let mut out = self.clone();
        if other.bold {
            out.bold = true;
        }
        if other.italic {
            out.italic = true;
        }
        if other.underline {
            out.underline = true;
        }
        if other.strikethrough {
            out.strikethrough = true;
        }
        if other.monospace {
            out.monospace = true;
        }
        if let Some(script) = other.script {
            out.script = script;
        }
        if let Some(color) = &other.color {
            out.color = Some(color.clone());
        }
        if let Some(background) = &other.background {
            out.background = Some(background.clone());
        }
        if let Some(family) = &other.font_family {
            out.font_family = Some(family.clone());
        }
        if let Some(size) = other.font_size {
            out.font_size = Some(size);
        }
        if let Some(link) = &other.link {
            out.link = Some(link.clone());
        }
        out
    }
}

/// The set of style fields a single tag declares.
///
/// `None`/`false` means "inherit"; the resolver builds one of these per
/// opening tag and applies it with [`RunStyle::overridden_by`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleOverride {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub monospace: bool,
    pub script: Option<Script>,
    pub color: Option<String>,
    pub background: Option<String>,
    pub font_family: Option<String>,
    pub font_size: Option<f32>,
    pub link: Option<String>,
}

/// A contiguous span of text with one resolved style. Immutable once built;
/// a block's inline content is an ordered sequence of these.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Run {
    pub text: String,
    pub style: RunStyle,
}

impl Run {
    pub fn new(text: impl Into<String>, style: RunStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// A run of plain text in the default style.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, RunStyle::default())
    }

    /// A run of bold text, otherwise default-styled.
    pub fn bold(text: impl Into<String>) -> Self {
        Self::new(
            text,
            RunStyle {
                bold: true,
                ..RunStyle::default()
            },
        )
    }
}

/// Concatenated text of a run sequence, used for classification heuristics
/// and the no-text-loss invariant check.
pub fn runs_text(runs: &[Run]) -> String {
    runs.iter().map(|r| r.text.as_str()).collect()
}
