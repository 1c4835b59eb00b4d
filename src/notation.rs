//! # Notation Translator
//!
//! Maps chord root names between the Latin (A-G) and Solfège (Do-Si)
//! alphabets through one static bidirectional table. Only root and bass
//! names change; chord qualities and lyrics are never touched.
//!
//! ## Example
//! ```rust
//! use chordsheet::{parse, translate_document, NotationSystem};
//!
//! let doc = parse("[Am]Hello [F#7]world").unwrap();
//! let solfege = translate_document(&doc, NotationSystem::Solfege);
//! let names: Vec<String> = solfege.chords().map(|c| c.to_string()).collect();
//! assert_eq!(names, vec!["Lam", "Fa#7"]);
//! ```

use crate::ast::{ChordSymbol, Document};
use crate::settings::NotationSystem;

/// Latin ↔ Solfège root names: 7 naturals, each also sharp and flat.
pub const ROOT_NAMES: [(&str, &str); 21] = [
    ("C", "Do"),
    ("C#", "Do#"),
    ("Cb", "Dob"),
    ("D", "Re"),
    ("D#", "Re#"),
    ("Db", "Reb"),
    ("E", "Mi"),
    ("E#", "Mi#"),
    ("Eb", "Mib"),
    ("F", "Fa"),
    ("F#", "Fa#"),
    ("Fb", "Fab"),
    ("G", "Sol"),
    ("G#", "Sol#"),
    ("Gb", "Solb"),
    ("A", "La"),
    ("A#", "La#"),
    ("Ab", "Lab"),
    ("B", "Si"),
    ("B#", "Si#"),
    ("Bb", "Sib"),
];

/// Natural syllables with the letter they stand for, longest first so
/// prefix matching never stops short.
pub(crate) const SOLFEGE_NATURALS: [(&str, char); 7] = [
    ("Sol", 'G'),
    ("Do", 'C'),
    ("Re", 'D'),
    ("Mi", 'E'),
    ("Fa", 'F'),
    ("La", 'A'),
    ("Si", 'B'),
];

pub fn to_solfege(latin: &str) -> Option<&'static str> {
    ROOT_NAMES
        .iter()
        .find(|(l, _)| *l == latin)
        .map(|(_, s)| *s)
}

pub fn to_latin(solfege: &str) -> Option<&'static str> {
    ROOT_NAMES
        .iter()
        .find(|(_, s)| *s == solfege)
        .map(|(l, _)| *l)
}

/// Translate a bare root name between alphabets. Names missing from the
/// table come back unchanged.
pub fn translate_name(name: &str, from: NotationSystem, to: NotationSystem) -> String {
    let translated = match (from, to) {
        (NotationSystem::Latin, NotationSystem::Solfege) => to_solfege(name),
        (NotationSystem::Solfege, NotationSystem::Latin) => to_latin(name),
        _ => None,
    };
    translated.unwrap_or(name).to_string()
}

/// Re-express a chord (and its bass) in the `target` alphabet.
pub fn translate_chord(chord: &ChordSymbol, target: NotationSystem) -> ChordSymbol {
    ChordSymbol {
        root: chord.root,
        quality: chord.quality.clone(),
        bass: chord
            .bass
            .as_ref()
            .map(|bass| Box::new(translate_chord(bass, target))),
        notation: target,
    }
}

/// Build a new document with every chord shown in `target` notation.
pub fn translate_document(doc: &Document, target: NotationSystem) -> Document {
    doc.map_chords(|chord| translate_chord(chord, target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chord::parse_chord;

    #[test]
    fn test_table_round_trip() {
        for (latin, _) in ROOT_NAMES.iter() {
            let solfege = translate_name(latin, NotationSystem::Latin, NotationSystem::Solfege);
            let back = translate_name(&solfege, NotationSystem::Solfege, NotationSystem::Latin);
            assert_eq!(&back, latin);
        }
    }

    #[test]
    fn test_unknown_names_pass_through() {
        assert_eq!(translate_name("H", NotationSystem::Latin, NotationSystem::Solfege), "H");
        assert_eq!(translate_name("Ut", NotationSystem::Solfege, NotationSystem::Latin), "Ut");
        assert_eq!(translate_name("C", NotationSystem::Latin, NotationSystem::Latin), "C");
    }

    #[test]
    fn test_translate_minor_chord() {
        let chord = parse_chord("Am", NotationSystem::Latin);
        assert_eq!(translate_chord(&chord, NotationSystem::Solfege).to_string(), "Lam");
    }

    #[test]
    fn test_translate_slash_chord() {
        let chord = parse_chord("Bb/D", NotationSystem::Latin);
        let solfege = translate_chord(&chord, NotationSystem::Solfege);
        assert_eq!(solfege.to_string(), "Sib/Re");
        assert_eq!(translate_chord(&solfege, NotationSystem::Latin).to_string(), "Bb/D");
    }

    #[test]
    fn test_translate_unresolved_untouched() {
        let chord = parse_chord("N.C.", NotationSystem::Latin);
        assert_eq!(translate_chord(&chord, NotationSystem::Solfege).to_string(), "N.C.");
    }

    #[test]
    fn test_solfege_naturals_match_table() {
        for (syllable, letter) in SOLFEGE_NATURALS.iter() {
            assert_eq!(to_latin(syllable), Some(letter.to_string().as_str()));
        }
    }
}
