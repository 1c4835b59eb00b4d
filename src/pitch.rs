//! Pitch-class arithmetic and enharmonic spelling.
//!
//! Every table here is compiled-in constant data and safe to share across
//! threads.

use crate::ast::{Accidental, PitchClass};

/// Natural letter names and their pitch classes.
pub const LETTERS: [(char, u8); 7] = [
    ('C', 0),
    ('D', 2),
    ('E', 4),
    ('F', 5),
    ('G', 7),
    ('A', 9),
    ('B', 11),
];

/// Spelling used for a root after transposition, indexed by pitch class.
///
/// 0=C 1=C# 2=D 3=Eb 4=E 5=F 6=F# 7=G 8=Ab 9=A 10=Bb 11=B
pub const PREFERRED_SPELLING: [Accidental; 12] = [
    Accidental::Natural, // C
    Accidental::Sharp,   // C#
    Accidental::Natural, // D
    Accidental::Flat,    // Eb
    Accidental::Natural, // E
    Accidental::Natural, // F
    Accidental::Sharp,   // F#
    Accidental::Natural, // G
    Accidental::Flat,    // Ab
    Accidental::Natural, // A
    Accidental::Flat,    // Bb
    Accidental::Natural, // B
];

pub fn letter_to_class(letter: char) -> Option<u8> {
    LETTERS
        .iter()
        .find(|(l, _)| *l == letter)
        .map(|(_, class)| *class)
}

fn class_to_letter(class: u8) -> Option<char> {
    LETTERS
        .iter()
        .find(|(_, c)| *c == class)
        .map(|(l, _)| *l)
}

/// Pitch class of a natural letter raised or lowered by an accidental.
pub fn pitch_class(letter_class: u8, accidental: Accidental) -> PitchClass {
    let offset = match accidental {
        Accidental::Natural => 0,
        Accidental::Sharp => 1,
        Accidental::Flat => -1,
    };
    PitchClass::new(letter_class as i32 + offset)
}

/// Preferred accidental for a pitch class reached by transposition.
pub fn preferred_accidental(class: PitchClass) -> Accidental {
    PREFERRED_SPELLING[class.value() as usize]
}

/// Letter and accidental used to print `class`.
///
/// White-key pitch classes always print as the natural letter. Black keys use
/// the letter below plus a sharp, or the letter above plus a flat; a natural
/// preference on a black key falls back to [`PREFERRED_SPELLING`].
pub fn spell(class: PitchClass, accidental: Accidental) -> (char, Accidental) {
    if let Some(letter) = class_to_letter(class.value()) {
        return (letter, Accidental::Natural);
    }

    let accidental = match accidental {
        Accidental::Natural => preferred_accidental(class),
        other => other,
    };
    let neighbour = match accidental {
        Accidental::Flat => class.value() as i32 + 1,
        _ => class.value() as i32 - 1,
    };
    match class_to_letter(PitchClass::new(neighbour).value()) {
        Some(letter) => (letter, accidental),
        // Unreachable for a 12-tone chromatic class: every black key neighbours two white keys.
        None => ('C', Accidental::Natural),
    }
}

/// Latin name of a pitch class, e.g. `C#` or `Bb`.
pub fn latin_name(class: PitchClass, accidental: Accidental) -> String {
    let (letter, accidental) = spell(class, accidental);
    let mut name = String::with_capacity(2);
    name.push(letter);
    match accidental {
        Accidental::Sharp => name.push('#'),
        Accidental::Flat => name.push('b'),
        Accidental::Natural => {}
    }
    name
}
