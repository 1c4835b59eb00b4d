//! # Parser Module
//!
//! Turns normalized markup into a [`Document`].
//!
//! ## Line Classification
//! Each source line is exactly one of:
//! - **Directive** (`{name}` / `{name: value}`): section boundaries
//!   (`start_of_verse`, `end_of_chorus`, ...), comments, or header fields
//!   (`title`, `subtitle`, `artist`, `key`, `capo`). Never becomes a `Line`.
//! - **Blank**: an empty `Line` inside an explicit section; outside one it
//!   ends the current plain paragraph.
//! - **Chord/lyric line**: lexed into `[chord]` tokens and lyric text. Each
//!   chord is paired with the lyric that follows it; text before the first
//!   chord is paired with no chord.
//!
//! ## Sections
//! Explicit sections are kept even when empty. Implicit `Plain` sections
//! are emitted only when they hold at least one line.
//!
//! ## Example
//! ```rust
//! use chordsheet::{parse, SectionKind};
//!
//! let source = "{title: Amazing Grace}\n{soc}\n[G]Amazing [G7]grace\n{eoc}";
//! let doc = parse(source).unwrap();
//! assert_eq!(doc.header.title.as_deref(), Some("Amazing Grace"));
//! assert_eq!(doc.sections.len(), 1);
//! assert_eq!(doc.sections[0].kind, SectionKind::Chorus);
//! assert_eq!(doc.sections[0].lines[0].items.len(), 2);
//! ```
//!
//! ## Related Modules
//! - `directive` - normalizes the markup before it gets here
//! - `lexer` - splits a chord/lyric line into tokens
//! - `chord` - parses chord token text into `ChordSymbol`s

use crate::ast::*;
use crate::chord::parse_chord;
use crate::directive::{normalize, parse_directive, Directive, TRANSPOSE};
use crate::error::ChordError;
use crate::lexer::{Lexer, Token};
use crate::settings::NotationSystem;

/// Parser state for one document
struct Parser {
    notation: NotationSystem,
    header: SongHeader,
    sections: Vec<Section>,
    current: Section,
    explicit: bool,
}

impl Parser {
    fn new(notation: NotationSystem) -> Self {
        Self {
            notation,
            header: SongHeader::default(),
            sections: Vec::new(),
            current: Section::new(SectionKind::Plain, None),
            explicit: false,
        }
    }

    /// Push the current section (if it should be kept) and start a plain one.
    fn close_section(&mut self) {
        let section = std::mem::replace(&mut self.current, Section::new(SectionKind::Plain, None));
        if self.explicit || !section.lines.is_empty() {
            self.sections.push(section);
        }
        self.explicit = false;
    }

    fn open_section(&mut self, kind: SectionKind, label: Option<&str>) {
        self.close_section();
        let label = label.filter(|l| !l.is_empty()).map(str::to_string);
        self.current = Section::new(kind, label);
        self.explicit = true;
    }

    fn parse_line(&mut self, line: &str, line_number: usize) -> Result<(), ChordError> {
        if let Some(directive) = parse_directive(line) {
            self.apply_directive(&directive);
            return Ok(());
        }

        if line.trim().is_empty() {
            if self.explicit {
                self.current.lines.push(Line::default());
            } else {
                self.close_section();
            }
            return Ok(());
        }

        let tokens = Lexer::new(line, line_number).tokenize()?;
        let mut items = Vec::new();
        for located in tokens {
            match located.token {
                Token::Chord(text) => items.push(Item::ChordLyricPair {
                    chord: Some(parse_chord(&text, self.notation)),
                    lyric: String::new(),
                }),
                Token::Text(text) => match items.last_mut() {
                    Some(Item::ChordLyricPair { lyric, .. }) => lyric.push_str(&text),
                    _ => items.push(Item::ChordLyricPair { chord: None, lyric: text }),
                },
            }
        }
        self.current.lines.push(Line { items });
        Ok(())
    }

    fn apply_directive(&mut self, directive: &Directive<'_>) {
        let value = directive.value;
        match directive.canonical_name() {
            "start_of_verse" => self.open_section(SectionKind::Verse, value),
            "start_of_chorus" => self.open_section(SectionKind::Chorus, value),
            "start_of_bridge" => self.open_section(SectionKind::Bridge, value),
            "end_of_verse" | "end_of_chorus" | "end_of_bridge" => self.close_section(),
            name @ ("comment" | "comment_italic") => {
                let line = Line {
                    items: vec![Item::CommentText {
                        text: value.unwrap_or_default().to_string(),
                        italic: name == "comment_italic",
                    }],
                };
                if self.explicit {
                    self.current.lines.push(line);
                } else {
                    self.close_section();
                    let mut section = Section::new(SectionKind::Comment, None);
                    section.lines.push(line);
                    self.sections.push(section);
                }
            }
            "title" => self.header.title = value.map(str::to_string),
            "subtitle" => self.header.subtitle = value.map(str::to_string),
            "artist" => self.header.artist = value.map(str::to_string),
            "key" => self.header.key = value.map(str::to_string),
            "capo" => {
                self.header.capo = value.and_then(|v| v.parse().ok());
                if self.header.capo.is_none() {
                    tracing::debug!(value = ?value, "ignoring invalid capo directive");
                }
            }
            TRANSPOSE => tracing::debug!("transpose directive reached the parser; ignored"),
            other => tracing::debug!(directive = other, "ignoring unsupported directive"),
        }
    }

    fn finish(mut self) -> Document {
        self.close_section();
        Document {
            header: self.header,
            sections: self.sections,
        }
    }
}

/// Parse already-normalized markup whose chord roots use `notation`.
pub fn parse_normalized(source: &str, notation: NotationSystem) -> Result<Document, ChordError> {
    let mut parser = Parser::new(notation);
    for (idx, line) in source.lines().enumerate() {
        parser.parse_line(line, idx + 1)?;
    }
    Ok(parser.finish())
}

/// Normalize and parse raw markup written with Latin chord names.
pub fn parse(source: &str) -> Result<Document, ChordError> {
    parse_normalized(&normalize(source), NotationSystem::Latin)
}

/// Normalize and parse raw markup whose chords use `notation`.
pub fn parse_with_notation(source: &str, notation: NotationSystem) -> Result<Document, ChordError> {
    parse_normalized(&normalize(source), notation)
}
