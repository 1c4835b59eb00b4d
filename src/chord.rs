//! Chord symbol parsing and formatting.
//!
//! Parses chord tokens (`C`, `Am`, `F#m7`, `Bbmaj7`, `G/B`, ...) into
//! [`ChordSymbol`]s and prints them back out.
//!
//! # Grammar
//! - **Root**: a letter `A`-`G` (or a syllable `Do`-`Si` when parsing Solfège)
//! - **Accidental**: optional `#`, `b`, `♯` or `♭` right after the root
//! - **Quality**: everything after the root up to a `/`, kept verbatim
//! - **Bass**: text after the first `/`, parsed recursively
//!
//! A token without a recognizable root is not an error: it becomes an
//! unresolved symbol whose `quality` holds the whole token, and every later
//! stage passes it through untouched.
//!
//! # Examples
//! ```
//! use chordsheet::{parse_chord, NotationSystem};
//!
//! assert_eq!(parse_chord("C#m7", NotationSystem::Latin).to_string(), "C#m7");
//! assert_eq!(parse_chord("G/B", NotationSystem::Latin).to_string(), "G/B");
//! assert_eq!(parse_chord("Lam", NotationSystem::Solfege).to_string(), "Lam");
//! assert!(!parse_chord("N.C.", NotationSystem::Latin).is_resolved());
//! ```

use crate::ast::{Accidental, ChordSymbol, Root};
use crate::notation::{to_solfege, SOLFEGE_NATURALS};
use crate::pitch::{latin_name, letter_to_class, pitch_class};
use crate::settings::NotationSystem;
use std::fmt;

/// Parse chord token text written in `notation`.
pub fn parse_chord(text: &str, notation: NotationSystem) -> ChordSymbol {
    let Some((letter_class, rest)) = parse_root_name(text, notation) else {
        tracing::debug!(chord = text, "unresolved chord root");
        return ChordSymbol {
            root: Root::Unresolved,
            quality: text.to_string(),
            bass: None,
            notation,
        };
    };

    let (accidental, rest) = parse_accidental(rest);
    let (quality, bass) = match rest.find('/') {
        Some(slash) => (
            &rest[..slash],
            Some(Box::new(parse_chord(&rest[slash + 1..], notation))),
        ),
        None => (rest, None),
    };

    ChordSymbol {
        root: Root::Pitch {
            class: pitch_class(letter_class, accidental),
            accidental,
        },
        quality: quality.to_string(),
        bass,
        notation,
    }
}

/// Match a natural root name at the start of `text`.
/// Returns the letter's pitch class and the remaining text.
fn parse_root_name(text: &str, notation: NotationSystem) -> Option<(u8, &str)> {
    match notation {
        NotationSystem::Latin => {
            let first = text.chars().next()?;
            let class = letter_to_class(first)?;
            Some((class, &text[first.len_utf8()..]))
        }
        NotationSystem::Solfege => SOLFEGE_NATURALS.iter().find_map(|(syllable, letter)| {
            let rest = text.strip_prefix(*syllable)?;
            Some((letter_to_class(*letter)?, rest))
        }),
    }
}

fn parse_accidental(text: &str) -> (Accidental, &str) {
    let mut chars = text.chars();
    match chars.next() {
        Some('#') | Some('♯') => (Accidental::Sharp, chars.as_str()),
        Some('b') | Some('♭') => (Accidental::Flat, chars.as_str()),
        _ => (Accidental::Natural, text),
    }
}

impl fmt::Display for ChordSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Root::Pitch { class, accidental } = self.root {
            let latin = latin_name(class, accidental);
            match self.notation {
                NotationSystem::Latin => f.write_str(&latin)?,
                NotationSystem::Solfege => f.write_str(to_solfege(&latin).unwrap_or(&latin))?,
            }
        }
        f.write_str(&self.quality)?;
        if let Some(bass) = &self.bass {
            write!(f, "/{}", bass)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::PitchClass;

    fn latin(text: &str) -> ChordSymbol {
        parse_chord(text, NotationSystem::Latin)
    }

    #[test]
    fn test_root_pitch_classes() {
        let cases = [
            ("C", 0), ("C#", 1), ("Db", 1), ("D", 2), ("D#", 3), ("Eb", 3), ("E", 4),
            ("F", 5), ("F#", 6), ("Gb", 6), ("G", 7), ("G#", 8), ("Ab", 8), ("A", 9),
            ("A#", 10), ("Bb", 10), ("B", 11),
        ];
        for (text, class) in cases {
            assert_eq!(latin(text).pitch_class(), Some(PitchClass::new(class)), "{}", text);
        }
    }

    #[test]
    fn test_quality_captured_verbatim() {
        let chord = latin("Bbmaj7");
        assert_eq!(chord.pitch_class(), Some(PitchClass::new(10)));
        assert_eq!(chord.quality, "maj7");

        assert_eq!(latin("Dsus4").quality, "sus4");
        assert_eq!(latin("C#m7").quality, "m7");
        assert_eq!(latin("E").quality, "");
    }

    #[test]
    fn test_slash_chord() {
        let chord = latin("G/B");
        assert_eq!(chord.pitch_class(), Some(PitchClass::new(7)));
        let bass = chord.bass.as_ref().unwrap();
        assert_eq!(bass.pitch_class(), Some(PitchClass::new(11)));
        assert_eq!(chord.to_string(), "G/B");
    }

    #[test]
    fn test_slash_with_quality() {
        let chord = latin("Am7/G");
        assert_eq!(chord.quality, "m7");
        assert_eq!(chord.to_string(), "Am7/G");
    }

    #[test]
    fn test_unresolved_root() {
        let chord = latin("N.C.");
        assert!(!chord.is_resolved());
        assert_eq!(chord.quality, "N.C.");
        assert_eq!(chord.to_string(), "N.C.");

        // lowercase letters are not roots
        assert!(!latin("am").is_resolved());
        assert_eq!(latin("").to_string(), "");
    }

    #[test]
    fn test_unresolved_bass_kept() {
        let chord = latin("C6/9");
        assert_eq!(chord.quality, "6");
        assert!(!chord.bass.as_ref().unwrap().is_resolved());
        assert_eq!(chord.to_string(), "C6/9");
    }

    #[test]
    fn test_unicode_accidentals() {
        assert_eq!(latin("F♯m").to_string(), "F#m");
        assert_eq!(latin("B♭").to_string(), "Bb");
    }

    #[test]
    fn test_solfege_roots() {
        let chord = parse_chord("Sol7", NotationSystem::Solfege);
        assert_eq!(chord.pitch_class(), Some(PitchClass::new(7)));
        assert_eq!(chord.quality, "7");

        let chord = parse_chord("Sib/Re", NotationSystem::Solfege);
        assert_eq!(chord.pitch_class(), Some(PitchClass::new(10)));
        assert_eq!(chord.to_string(), "Sib/Re");

        assert!(!parse_chord("Am", NotationSystem::Solfege).is_resolved());
    }
}
