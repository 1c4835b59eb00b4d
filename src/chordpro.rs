//! Source writer: turns a transformed document back into markup.
//!
//! Output uses canonical long-form directives and the chords' current
//! spelling. Chord names are always written in Latin notation, the alphabet
//! the markup is read in, so a document translated to Solfège for display
//! still writes text that parses back to the same pitches. A single `{transpose: N}` marker is re-injected after the header
//! when the document was transposed; [`crate::directive::normalize`] strips it
//! again on the next pass, so writing and re-reading never stacks markers.

use crate::ast::{Document, Item, Line, SectionKind};
use crate::directive::{format_directive, transpose_directive};
use crate::key::resolve_key;
use crate::notation::translate_document;
use crate::settings::{NotationSystem, TransposeState};

/// Write `doc` (already transposed by `delta`) as markup.
pub fn to_chordpro(doc: &Document, delta: TransposeState) -> String {
    let doc = translate_document(doc, NotationSystem::Latin);
    let mut lines: Vec<String> = Vec::new();
    let header = &doc.header;

    for (name, value) in [
        ("title", &header.title),
        ("subtitle", &header.subtitle),
        ("artist", &header.artist),
    ] {
        if let Some(value) = value {
            lines.push(format_directive(name, Some(value.as_str())));
        }
    }
    // the header key is still the original one; write the key the chords are now in
    if let Some(key) = resolve_key(header.key.as_deref(), delta, NotationSystem::Latin) {
        lines.push(format_directive("key", Some(key.as_str())));
    }
    if let Some(capo) = header.capo {
        lines.push(format_directive("capo", Some(capo.to_string().as_str())));
    }
    if let Some(directive) = transpose_directive(delta) {
        lines.push(directive);
    }

    for section in &doc.sections {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        match section.kind {
            SectionKind::Plain | SectionKind::Comment => {
                lines.extend(section.lines.iter().map(line_to_source));
            }
            kind => {
                let stem = kind.as_str();
                lines.push(format_directive(
                    &format!("start_of_{}", stem),
                    section.label.as_deref(),
                ));
                lines.extend(section.lines.iter().map(line_to_source));
                lines.push(format_directive(&format!("end_of_{}", stem), None));
            }
        }
    }

    let mut out = lines.join("\n");
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

fn line_to_source(line: &Line) -> String {
    let mut out = String::new();
    for item in &line.items {
        match item {
            Item::ChordLyricPair { chord, lyric } => {
                if let Some(chord) = chord {
                    out.push('[');
                    out.push_str(&chord.to_string());
                    out.push(']');
                }
                out.push_str(lyric);
            }
            Item::CommentText { text, italic } => {
                let name = if *italic { "comment_italic" } else { "comment" };
                out.push_str(&format_directive(name, Some(text.as_str())));
            }
        }
    }
    out
}
