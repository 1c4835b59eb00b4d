//! # Document Types
//!
//! The structural tree produced by the parser and consumed by every transform
//! stage and the renderer.
//!
//! ## Type Hierarchy
//! ```text
//! Document
//!   ├── SongHeader (title, subtitle, artist, key, capo from header directives)
//!   └── Vec<Section>
//!         ├── kind: SectionKind (Verse | Chorus | Bridge | Comment | Plain)
//!         ├── label: Option<String>
//!         └── Vec<Line>
//!               └── Vec<Item>
//!                     ├── ChordLyricPair { chord: Option<ChordSymbol>, lyric }
//!                     └── CommentText { text, italic }
//!
//! ChordSymbol
//!   ├── root: Root (Pitch { class, accidental } | Unresolved)
//!   ├── quality: String (verbatim suffix: "m", "7", "maj7", "sus4", ...)
//!   ├── bass: Option<Box<ChordSymbol>> (slash chords)
//!   └── notation: NotationSystem (alphabet used when formatting)
//! ```
//!
//! ## Lifecycle (CRITICAL)
//! A `Document` is built fresh from raw markup on every processing pass.
//! Transform stages return a new `Document` via [`Document::map_chords`] and
//! never mutate their input, so transposition can never be applied twice to
//! the same chords.

use crate::settings::NotationSystem;

/// One of the 12 chromatic steps, 0 = C through 11 = B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PitchClass(u8);

impl PitchClass {
    /// Build a pitch class from any integer, wrapping into 0..12.
    pub fn new(value: i32) -> Self {
        Self(value.rem_euclid(12) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

/// Accidental the root was written with; drives sharp/flat spelling on output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Accidental {
    #[default]
    Natural,
    Sharp,
    Flat,
}

/// Root of a chord symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Root {
    Pitch {
        class: PitchClass,
        accidental: Accidental,
    },
    /// No recognizable root letter; the whole token lives in `quality`.
    Unresolved,
}

/// A parsed chord token such as `C#m7` or `G/B`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChordSymbol {
    pub root: Root,
    pub quality: String,
    pub bass: Option<Box<ChordSymbol>>,
    pub notation: NotationSystem,
}

impl ChordSymbol {
    pub fn is_resolved(&self) -> bool {
        matches!(self.root, Root::Pitch { .. })
    }

    /// Pitch class of the root, if it resolved.
    pub fn pitch_class(&self) -> Option<PitchClass> {
        match self.root {
            Root::Pitch { class, .. } => Some(class),
            Root::Unresolved => None,
        }
    }
}

/// Structural role of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Verse,
    Chorus,
    Bridge,
    Comment,
    Plain,
}

impl SectionKind {
    /// CSS class / directive stem for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            SectionKind::Verse => "verse",
            SectionKind::Chorus => "chorus",
            SectionKind::Bridge => "bridge",
            SectionKind::Comment => "comment",
            SectionKind::Plain => "plain",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    ChordLyricPair {
        chord: Option<ChordSymbol>,
        lyric: String,
    },
    CommentText {
        text: String,
        /// Written as `{comment_italic}` (`{ci}`).
        italic: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Line {
    pub items: Vec<Item>,
}

impl Line {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Concatenated lyric text of the line, chords left out.
    pub fn lyrics(&self) -> String {
        self.items
            .iter()
            .filter_map(|item| match item {
                Item::ChordLyricPair { lyric, .. } => Some(lyric.as_str()),
                Item::CommentText { .. } => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub kind: SectionKind,
    pub label: Option<String>,
    pub lines: Vec<Line>,
}

impl Section {
    pub fn new(kind: SectionKind, label: Option<String>) -> Self {
        Self {
            kind,
            label,
            lines: Vec::new(),
        }
    }
}

/// Song information declared inside the markup through header directives.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SongHeader {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub artist: Option<String>,
    pub key: Option<String>,
    pub capo: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub header: SongHeader,
    pub sections: Vec<Section>,
}

impl Document {
    /// Build a new document with `f` applied to every chord symbol, leaving
    /// lyrics, comments and structure untouched.
    pub fn map_chords<F>(&self, f: F) -> Document
    where
        F: Fn(&ChordSymbol) -> ChordSymbol,
    {
        let sections = self
            .sections
            .iter()
            .map(|section| Section {
                kind: section.kind,
                label: section.label.clone(),
                lines: section
                    .lines
                    .iter()
                    .map(|line| Line {
                        items: line
                            .items
                            .iter()
                            .map(|item| match item {
                                Item::ChordLyricPair { chord, lyric } => Item::ChordLyricPair {
                                    chord: chord.as_ref().map(&f),
                                    lyric: lyric.clone(),
                                },
                                Item::CommentText { text, italic } => Item::CommentText {
                                    text: text.clone(),
                                    italic: *italic,
                                },
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect();

        Document {
            header: self.header.clone(),
            sections,
        }
    }

    /// All chord symbols in document order.
    pub fn chords(&self) -> impl Iterator<Item = &ChordSymbol> {
        self.sections
            .iter()
            .flat_map(|s| s.lines.iter())
            .flat_map(|l| l.items.iter())
            .filter_map(|item| match item {
                Item::ChordLyricPair { chord, .. } => chord.as_ref(),
                Item::CommentText { .. } => None,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chord(class: i32) -> ChordSymbol {
        ChordSymbol {
            root: Root::Pitch {
                class: PitchClass::new(class),
                accidental: Accidental::Natural,
            },
            quality: String::new(),
            bass: None,
            notation: NotationSystem::Latin,
        }
    }

    #[test]
    fn test_pitch_class_wraps() {
        assert_eq!(PitchClass::new(12).value(), 0);
        assert_eq!(PitchClass::new(-1).value(), 11);
        assert_eq!(PitchClass::new(26).value(), 2);
    }

    #[test]
    fn test_map_chords_preserves_structure() {
        let doc = Document {
            header: SongHeader::default(),
            sections: vec![Section {
                kind: SectionKind::Chorus,
                label: Some("Chorus".to_string()),
                lines: vec![Line {
                    items: vec![
                        Item::ChordLyricPair { chord: Some(chord(0)), lyric: "Hel".to_string() },
                        Item::CommentText { text: "softly".to_string(), italic: true },
                    ],
                }],
            }],
        };

        let mapped = doc.map_chords(|_| chord(7));
        assert_eq!(mapped.sections.len(), 1);
        assert_eq!(mapped.sections[0].kind, SectionKind::Chorus);
        assert_eq!(mapped.sections[0].lines[0].lyrics(), "Hel");
        assert_eq!(mapped.chords().next().and_then(|c| c.pitch_class()), Some(PitchClass::new(7)));
        assert_eq!(
            mapped.sections[0].lines[0].items[1],
            Item::CommentText { text: "softly".to_string(), italic: true }
        );
        // input untouched
        assert_eq!(doc.chords().next().and_then(|c| c.pitch_class()), Some(PitchClass::new(0)));
    }
}
