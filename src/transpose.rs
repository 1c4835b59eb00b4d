use crate::ast::{ChordSymbol, Document, PitchClass, Root};
use crate::pitch::preferred_accidental;
use crate::settings::TransposeState;

/// Transpose a single chord, including its bass note.
///
/// The new root is spelled from the fixed preferred-spelling table. A zero
/// delta returns the chord exactly as written; unresolved roots never move.
pub fn transpose_chord(chord: &ChordSymbol, delta: TransposeState) -> ChordSymbol {
    if delta.is_identity() {
        return chord.clone();
    }

    let root = match chord.root {
        Root::Pitch { class, .. } => {
            let class = PitchClass::new(class.value() as i32 + delta.semitones() + 12);
            Root::Pitch {
                class,
                accidental: preferred_accidental(class),
            }
        }
        Root::Unresolved => Root::Unresolved,
    };

    ChordSymbol {
        root,
        quality: chord.quality.clone(),
        bass: chord
            .bass
            .as_ref()
            .map(|bass| Box::new(transpose_chord(bass, delta))),
        notation: chord.notation,
    }
}

/// Transpose every chord of a document by `delta` semitones.
///
/// Always called on a freshly parsed document: the input is left untouched
/// and a new document is returned, so deltas never compound across passes.
pub fn transpose_document(doc: &Document, delta: TransposeState) -> Document {
    doc.map_chords(|chord| transpose_chord(chord, delta))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chord::parse_chord;
    use crate::settings::NotationSystem;

    fn transposed(text: &str, delta: i32) -> String {
        let chord = parse_chord(text, NotationSystem::Latin);
        transpose_chord(&chord, TransposeState::new(delta)).to_string()
    }

    #[test]
    fn test_transpose_up_whole_step() {
        assert_eq!(transposed("G", 2), "A");
    }

    #[test]
    fn test_transpose_keeps_quality() {
        assert_eq!(transposed("C#m7", 1), "Dm7");
        assert_eq!(transposed("Cmaj7", 3), "Ebmaj7");
        assert_eq!(transposed("Dsus4", 4), "F#sus4");
    }

    #[test]
    fn test_transpose_slash_chord() {
        assert_eq!(transposed("G/B", 2), "A/C#");
        assert_eq!(transposed("D/F#", -2), "C/E");
    }

    #[test]
    fn test_transpose_wraps_around_octave() {
        assert_eq!(transposed("B", 1), "C");
        assert_eq!(transposed("C", -1), "B");
        assert_eq!(transposed("A", 14), "B");
        assert_eq!(transposed("A", -13), "Ab");
    }

    #[test]
    fn test_transpose_uses_preferred_spelling() {
        // a full octave normalizes to no transposition at all
        assert_eq!(transposed("Db", 12), "Db");
        assert_eq!(transposed("C", 1), "C#");
        assert_eq!(transposed("E", 6), "Bb");
        assert_eq!(transposed("A", 5), "D");
    }

    #[test]
    fn test_zero_delta_keeps_author_spelling() {
        assert_eq!(transposed("A#m", 0), "A#m");
        assert_eq!(transposed("Gb", 0), "Gb");
    }

    #[test]
    fn test_unresolved_untouched() {
        assert_eq!(transposed("N.C.", 5), "N.C.");
        assert_eq!(transposed("C6/9", 2), "D6/9");
    }
}
