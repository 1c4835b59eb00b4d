//! # Directive Normalizer
//!
//! First stage of the pipeline. Works line by line on the raw markup:
//! - short section aliases (`{soc}`, `{eov}`, `{c: ...}`) are rewritten to
//!   their canonical long form (`{start_of_chorus}`, `{end_of_verse}`,
//!   `{comment: ...}`)
//! - every `{transpose: N}` line is dropped, whatever N is, so a previously
//!   written transposition marker is never applied on top of the current one
//! - any other line, including unknown directives, passes through unchanged
//!
//! ## Example
//! ```rust
//! use chordsheet::normalize;
//!
//! let raw = "{SOC}\n[G]Glory\n{transpose: 3}\n{eoc}";
//! assert_eq!(normalize(raw), "{start_of_chorus}\n[G]Glory\n{end_of_chorus}");
//! ```

use crate::settings::TransposeState;

/// Short directive names and their canonical form.
pub const ALIASES: [(&str, &str); 10] = [
    ("soc", "start_of_chorus"),
    ("eoc", "end_of_chorus"),
    ("sov", "start_of_verse"),
    ("eov", "end_of_verse"),
    ("sob", "start_of_bridge"),
    ("eob", "end_of_bridge"),
    ("c", "comment"),
    ("ci", "comment_italic"),
    ("t", "title"),
    ("st", "subtitle"),
];

pub const TRANSPOSE: &str = "transpose";

/// A `{name}` or `{name: value}` line.
#[derive(Debug, Clone, PartialEq)]
pub struct Directive<'a> {
    /// Lower-cased name as written (not alias-expanded).
    pub name: String,
    pub value: Option<&'a str>,
}

impl Directive<'_> {
    /// Name with aliases expanded.
    pub fn canonical_name(&self) -> &str {
        canonical_name(&self.name).unwrap_or(&self.name)
    }
}

/// Parse a line as a directive, if it is one.
pub fn parse_directive(line: &str) -> Option<Directive<'_>> {
    let body = line.trim().strip_prefix('{')?.strip_suffix('}')?;
    let (name, value) = match body.split_once(':') {
        Some((name, value)) => (name, Some(value.trim())),
        None => (body, None),
    };
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some(Directive {
        name: name.to_lowercase(),
        value,
    })
}

/// Canonical form of a short alias (case-insensitive).
pub fn canonical_name(name: &str) -> Option<&'static str> {
    ALIASES
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(name))
        .map(|(_, canonical)| *canonical)
}

pub fn is_transpose_directive(line: &str) -> bool {
    parse_directive(line).is_some_and(|d| d.name == TRANSPOSE)
}

/// Directive text for a name and optional value.
pub fn format_directive(name: &str, value: Option<&str>) -> String {
    match value {
        Some(value) => format!("{{{}: {}}}", name, value),
        None => format!("{{{}}}", name),
    }
}

/// The `{transpose: N}` marker for a non-zero transposition.
pub fn transpose_directive(delta: TransposeState) -> Option<String> {
    if delta.is_identity() {
        return None;
    }
    Some(format_directive(TRANSPOSE, Some(&delta.signed().to_string())))
}

/// Rewrite aliases to canonical directives and strip transpose directives.
///
/// Splits on `'\n'` only, so trailing blank lines keep their exact count and
/// a second pass returns its input unchanged.
pub fn normalize(raw: &str) -> String {
    raw.split('\n')
        .filter(|line| !is_transpose_directive(line))
        .map(|line| match parse_directive(line) {
            Some(directive) => match canonical_name(&directive.name) {
                Some(canonical) => format_directive(canonical, directive.value),
                None => line.to_string(),
            },
            None => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
