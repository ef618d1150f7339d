use crate::models::run::{Run, RunStyle, Script, StyleOverride};
use crate::parsing::normalize::decode_entities;
use crate::parsing::scan::{TagToken, Token, attr_value, style_declaration, tokenize};

/// Link text color applied by anchor tags.
const LINK_COLOR: &str = "#1155cc";
/// Background tint applied by inline code.
const CODE_BACKGROUND: &str = "#f0f0f0";
/// Size ratio for superscript/subscript text.
const SCRIPT_SIZE_RATIO: f32 = 0.75;
/// Assumed size when a script tag has no inherited size to scale.
const BASE_FONT_PX: f32 = 16.0;

/// Resolve one markup fragment into styled runs.
///
/// Tolerates unbalanced markup: closing an empty stack is a no-op and an
/// unclosed tag simply styles the rest of the fragment. Unknown tags behave
/// as generic inline containers (inherit everything, apply any declared
/// color/background/size/family).
pub fn resolve_runs(fragment: &str) -> Vec<Run> {
    let mut stack: Vec<RunStyle> = vec![RunStyle::default()];
    let mut out: Vec<Run> = Vec::new();

    for token in tokenize(fragment) {
        match token {
            Token::Open(tag) => {
                let top = stack.last().cloned().unwrap_or_default();
                let next = top.overridden_by(&override_for(&tag, &top));
                if !tag.self_closing {
                    stack.push(next);
                }
            }
            Token::Close(_) => {
                // Keep the default style as the floor; popping past it means
                // the markup was unbalanced.
                if stack.len() > 1 {
                    stack.pop();
                } else {
                    log::warn!("ignoring close tag with no matching open");
                }
            }
            Token::LineBreak => {
                let style = stack.last().cloned().unwrap_or_default();
                push_run(&mut out, Run::new("\n", style));
            }
            Token::Text(text) => {
                let decoded = decode_entities(&text);
                if !decoded.is_empty() {
                    let style = stack.last().cloned().unwrap_or_default();
                    push_run(&mut out, Run::new(decoded, style));
                }
            }
        }
    }

    out
}

/// Append a run, merging into the previous one when styles are identical.
fn push_run(out: &mut Vec<Run>, run: Run) {
    if let Some(last) = out.last_mut() {
        if last.style == run.style {
            last.text.push_str(&run.text);
            return;
        }
    }
    out.push(run);
}

/// The style effect of one opening tag on top of the inherited style.
fn override_for(tag: &TagToken, inherited: &RunStyle) -> StyleOverride {
    let mut effect = StyleOverride::default();

    match tag.name.as_str() {
        "b" | "strong" => effect.bold = true,
        "i" | "em" => effect.italic = true,
        "u" => effect.underline = true,
        "s" | "strike" | "del" => effect.strikethrough = true,
        "sup" => {
            effect.script = Some(Script::Superscript);
            effect.font_size = Some(script_size(inherited));
        }
        "sub" => {
            effect.script = Some(Script::Subscript);
            effect.font_size = Some(script_size(inherited));
        }
        "code" => {
            effect.monospace = true;
            effect.background = Some(CODE_BACKGROUND.to_string());
        }
        "a" => {
            effect.underline = true;
            effect.color = Some(LINK_COLOR.to_string());
            effect.link = attr_value(&tag.attrs, "href");
        }
        // Generic inline container: inherit, then apply declarations below.
        _ => {}
    }

    // Inline declarations apply to any tag that carries them.
    if let Some(color) = style_declaration(&tag.attrs, "color")
        .or_else(|| attr_value(&tag.attrs, "color").filter(|_| tag.name == "font"))
    {
        effect.color = Some(color);
    }
    if let Some(background) = style_declaration(&tag.attrs, "background-color")
        .or_else(|| style_declaration(&tag.attrs, "background"))
    {
        effect.background = Some(background);
    }
    if let Some(family) = style_declaration(&tag.attrs, "font-family")
        .or_else(|| attr_value(&tag.attrs, "face").filter(|_| tag.name == "font"))
    {
        effect.font_family = Some(family.trim_matches(['\'', '"']).to_string());
    }
    if let Some(size) = style_declaration(&tag.attrs, "font-size").and_then(|v| parse_size_px(&v)) {
        effect.font_size = Some(size);
    }

    effect
}

fn script_size(inherited: &RunStyle) -> f32 {
    inherited.font_size.unwrap_or(BASE_FONT_PX) * SCRIPT_SIZE_RATIO
}

/// Parse a CSS size declaration into pixels. Points convert at 4/3.
fn parse_size_px(value: &str) -> Option<f32> {
    let v = value.trim();
    if let Some(px) = v.strip_suffix("px") {
        return px.trim().parse().ok();
    }
    if let Some(pt) = v.strip_suffix("pt") {
        return pt.trim().parse::<f32>().ok().map(|p| p * 4.0 / 3.0);
    }
    v.parse().ok()
}
