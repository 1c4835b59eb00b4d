//! # Public API
//!
//! Entry points that run the whole pipeline on caller-supplied inputs.
//!
//! ## Pipeline
//! 1. Normalize directives (aliases expanded, transpose markers dropped)
//! 2. Parse into a fresh `Document`
//! 3. Transpose a new copy of the document
//! 4. Translate chord names to the requested notation
//! 5. Resolve the header key on its own one-chord pseudo-document
//! 6. Render with metadata and style settings
//!
//! Every call starts again from the raw markup. Nothing is carried over from
//! a previous call, so the same inputs always give byte-identical output and
//! concurrent calls never interfere.
//!
//! ## Functions
//! - [`process()`] - never fails; errors become [`Status::Error`] with a fallback message
//! - [`render_song()`] - same pipeline, returning the underlying error
//! - [`prepare_document()`] - steps 1-4 only, for callers that want the tree
//! - [`write_source()`] - steps 1-4, then writes markup back out instead of rendering
//!
//! [`Session`] wraps `process()` with the Idle/Processing/Ready/Error state
//! machine and skips recomputation when inputs did not change.
//!
//! ## Example
//! ```rust
//! use chordsheet::{process, NotationSystem, ProcessInput, Status};
//!
//! let input = ProcessInput {
//!     raw_markup: "{title: Grace}\n[G]Amazing [D]grace".to_string(),
//!     transpose_semitones: 2,
//!     notation: NotationSystem::Latin,
//!     ..Default::default()
//! };
//! let output = process(&input);
//! assert_eq!(output.status, Status::Ready);
//! assert!(output.rendered_markup.contains("<span class=\"chord\">A</span>"));
//! ```

use crate::ast::Document;
use crate::chordpro::to_chordpro;
use crate::directive::normalize;
use crate::error::ChordError;
use crate::key::resolve_key;
use crate::notation::translate_document;
use crate::parser::parse_normalized;
use crate::render::render;
use crate::settings::{NotationSystem, RenderSettings, SongMeta, TransposeState};
use crate::transpose::transpose_document;

/// Text returned in place of the song when processing fails.
pub const FALLBACK_MESSAGE: &str = "This song could not be displayed.";

/// Everything the host supplies for one processing pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProcessInput {
    pub raw_markup: String,
    /// Any integer; normalized internally.
    pub transpose_semitones: i32,
    pub notation: NotationSystem,
    pub settings: RenderSettings,
    pub meta: SongMeta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ready,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessOutput {
    pub rendered_markup: String,
    pub status: Status,
}

/// Normalize, parse, transpose and translate raw Latin-notation markup.
pub fn prepare_document(
    raw_markup: &str,
    delta: TransposeState,
    notation: NotationSystem,
) -> Result<Document, ChordError> {
    let normalized = normalize(raw_markup);
    let document = parse_normalized(&normalized, NotationSystem::Latin)?;
    let transposed = transpose_document(&document, delta);
    Ok(translate_document(&transposed, notation))
}

/// Run the full pipeline, returning the rendered markup or the first error.
pub fn render_song(input: &ProcessInput) -> Result<String, ChordError> {
    let delta = TransposeState::new(input.transpose_semitones);
    let document = prepare_document(&input.raw_markup, delta, input.notation)?;

    let meta = input.meta.merged_with(&document.header);
    let display_key = resolve_key(meta.original_key.as_deref(), delta, input.notation);

    Ok(render(
        &document,
        &input.settings,
        &meta,
        display_key.as_deref(),
        delta,
    ))
}

/// Transform the markup and write it back as source text.
///
/// Caller metadata is folded into the header the same way [`render_song()`]
/// merges it for display, so `{artist}`, `{key}` and `{capo}` in the output
/// reflect what the caller supplied.
pub fn write_source(input: &ProcessInput) -> Result<String, ChordError> {
    let delta = TransposeState::new(input.transpose_semitones);
    let mut document = prepare_document(&input.raw_markup, delta, input.notation)?;

    let meta = input.meta.merged_with(&document.header);
    document.header.artist = meta.author;
    document.header.key = meta.original_key;
    document.header.capo = meta.capo;

    Ok(to_chordpro(&document, delta))
}

/// Run the full pipeline. Never fails: errors are logged and replaced by
/// [`FALLBACK_MESSAGE`] with [`Status::Error`].
pub fn process(input: &ProcessInput) -> ProcessOutput {
    let _span = tracing::debug_span!(
        "process",
        transpose = input.transpose_semitones,
        notation = ?input.notation
    )
    .entered();

    match render_song(input) {
        Ok(rendered_markup) => ProcessOutput {
            rendered_markup,
            status: Status::Ready,
        },
        Err(e) => {
            tracing::warn!(error = %e, "falling back after processing failure");
            ProcessOutput {
                rendered_markup: FALLBACK_MESSAGE.to_string(),
                status: Status::Error,
            }
        }
    }
}

/// Lifecycle of a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Processing,
    Ready,
    Error,
}

/// Caller-owned memo around [`process()`].
///
/// Any change to the inputs moves the session through `Processing` to
/// `Ready` or `Error`. Identical inputs return the cached output.
#[derive(Debug, Default)]
pub struct Session {
    state: SessionState,
    last: Option<(ProcessInput, ProcessOutput)>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Output of the last completed pass, if any.
    pub fn output(&self) -> Option<&ProcessOutput> {
        self.last.as_ref().map(|(_, output)| output)
    }

    pub fn update(&mut self, input: &ProcessInput) -> &ProcessOutput {
        let output = match self.last.take() {
            Some((last, output)) if last == *input => output,
            _ => {
                self.state = SessionState::Processing;
                let output = process(input);
                self.state = match output.status {
                    Status::Ready => SessionState::Ready,
                    Status::Error => SessionState::Error,
                };
                output
            }
        };
        &self.last.insert((input.clone(), output)).1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(markup: &str) -> ProcessInput {
        ProcessInput {
            raw_markup: markup.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_process_ready() {
        let output = process(&input("[G]Amazing"));
        assert_eq!(output.status, Status::Ready);
        assert!(output.rendered_markup.contains("Amazing"));
    }

    #[test]
    fn test_process_error_fallback() {
        let output = process(&input("[G Amazing"));
        assert_eq!(output.status, Status::Error);
        assert_eq!(output.rendered_markup, FALLBACK_MESSAGE);
    }

    #[test]
    fn test_empty_markup_is_ready() {
        let output = process(&input(""));
        assert_eq!(output.status, Status::Ready);
        assert!(!output.rendered_markup.contains("<section"));
    }

    #[test]
    fn test_header_key_used_when_meta_missing() {
        let mut i = input("{key: C}\n{artist: Someone}\n[C]La");
        i.transpose_semitones = 2;
        i.notation = NotationSystem::Solfege;
        let output = process(&i);
        assert!(output.rendered_markup.contains("Key: Re"));
        assert!(output.rendered_markup.contains("<span class=\"author\">Someone</span>"));
        assert!(output.rendered_markup.contains("<span class=\"chord\">Re</span>"));
    }

    #[test]
    fn test_write_source_uses_caller_meta() {
        let mut i = input("{artist: Header}\n{key: C}\n[C]La");
        i.transpose_semitones = 2;
        i.meta = SongMeta {
            author: Some("Caller".to_string()),
            original_key: Some("G".to_string()),
            capo: Some(3),
        };
        let written = write_source(&i).unwrap();
        assert_eq!(
            written,
            "{artist: Caller}\n{key: A}\n{capo: 3}\n{transpose: 2}\n\n[D]La\n"
        );

        // header values fill what the caller left blank
        i.meta = SongMeta {
            author: Some("  ".to_string()),
            ..Default::default()
        };
        let written = write_source(&i).unwrap();
        assert!(written.starts_with("{artist: Header}\n{key: D}\n{transpose: 2}\n"));

        assert!(write_source(&input("[C broken")).is_err());
    }

    #[test]
    fn test_session_state_machine() {
        let mut session = Session::new();
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.output().is_none());

        let good = input("[C]ok");
        assert_eq!(session.update(&good).status, Status::Ready);
        assert_eq!(session.state(), SessionState::Ready);

        let bad = input("[C ok");
        assert_eq!(session.update(&bad).status, Status::Error);
        assert_eq!(session.state(), SessionState::Error);

        // recovers on the next good input
        assert_eq!(session.update(&good).status, Status::Ready);
        assert_eq!(session.state(), SessionState::Ready);
    }

    #[test]
    fn test_session_reuses_unchanged_input() {
        let mut session = Session::new();
        let i = input("[C]ok");
        let first = session.update(&i).clone();
        let second = session.update(&i).clone();
        assert_eq!(first, second);
        assert_eq!(first, process(&i));
    }
}
