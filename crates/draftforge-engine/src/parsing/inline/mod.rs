//! # Inline Run Resolution
//!
//! Turns one markup fragment into an ordered sequence of styled [`Run`]s.
//!
//! The resolver walks the fragment's token stream with an explicit style
//! stack: opening a tag clones the top style and applies that tag's effect,
//! closing a tag pops (guarded, so unbalanced markup never panics), literal
//! text emits a run carrying the current top-of-stack style.
//!
//! A secondary parser in [`plain`] handles text that contains no real markup
//! tags, recognizing the `**bold**` convention and the `Label:` auto-bold
//! heuristic.
//!
//! [`Run`]: crate::models::Run

pub mod parser;
pub mod plain;

pub use parser::resolve_runs;
pub use plain::{looks_like_markup, resolve_plain_runs};
