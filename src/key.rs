//! Key resolver for the song header.
//!
//! Runs its own tiny pipeline on a one-chord pseudo-document holding only the
//! original key, so the header label is computed without touching (or
//! re-transposing) the song body.

use crate::notation::translate_document;
use crate::parser::parse_normalized;
use crate::settings::{NotationSystem, TransposeState};
use crate::transpose::transpose_document;

/// Displayed key for `original_key` after transposition and translation.
///
/// Returns `None` for a missing or blank key. A key that cannot be parsed as a
/// chord symbol is shown as written.
pub fn resolve_key(
    original_key: Option<&str>,
    delta: TransposeState,
    notation: NotationSystem,
) -> Option<String> {
    let key = original_key.map(str::trim).filter(|k| !k.is_empty())?;

    let pseudo = format!("[{}]", key);
    let resolved = parse_normalized(&pseudo, NotationSystem::Latin)
        .ok()
        .and_then(|doc| {
            let doc = translate_document(&transpose_document(&doc, delta), notation);
            let name = doc.chords().next().map(|chord| chord.to_string());
            name
        });

    Some(resolved.unwrap_or_else(|| key.to_string()))
}
