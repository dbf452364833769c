use std::{convert::Infallible, str::FromStr};

/// A note letter name
///
/// Enharmonic spellings share a semitone offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Letter {
    A,
    Ash,
    Bb,
    B,
    C,
    Csh,
    Db,
    D,
    Dsh,
    Eb,
    E,
    F,
    Fsh,
    Gb,
    G,
    Gsh,
    Ab,
}

impl Letter {
    /// Semitone offset from A within the reference octave
    pub fn semitones(self) -> i32 {
        match self {
            Letter::A => 0,
            Letter::Ash | Letter::Bb => 1,
            Letter::B => 2,
            Letter::C => 3,
            Letter::Csh | Letter::Db => 4,
            Letter::D => 5,
            Letter::Dsh | Letter::Eb => 6,
            Letter::E => 7,
            Letter::F => 8,
            Letter::Fsh | Letter::Gb => 9,
            Letter::G => 10,
            Letter::Gsh | Letter::Ab => 11,
        }
    }
}

impl FromStr for Letter {
    type Err = Infallible;
    /// Unrecognized note names fall back to `Letter::A` (offset 0)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_uppercase().as_str() {
            "A" => Letter::A,
            "A#" => Letter::Ash,
            "BB" => Letter::Bb,
            "B" => Letter::B,
            "C" => Letter::C,
            "C#" => Letter::Csh,
            "DB" => Letter::Db,
            "D" => Letter::D,
            "D#" => Letter::Dsh,
            "EB" => Letter::Eb,
            "E" => Letter::E,
            "F" => Letter::F,
            "F#" => Letter::Fsh,
            "GB" => Letter::Gb,
            "G" => Letter::G,
            "G#" => Letter::Gsh,
            "AB" => Letter::Ab,
            _ => Letter::A,
        })
    }
}

/// The frequency in Hz of a letter at an octave, relative to A4 = 440
pub fn freq(letter: Letter, octave: i32) -> f32 {
    let n = letter.semitones() + 12 * (octave - 4);
    440.0 * 2f32.powf(n as f32 / 12.0)
}

/// The C-major pentatonic scale degrees used by melody playback (C4 D4 E4 G4 A4)
pub const PENTATONIC: [f32; 5] = [261.63, 293.66, 329.63, 392.0, 440.0];

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn a4_is_exactly_440() {
        assert_eq!(freq(Letter::A, 4), 440.0);
    }

    #[test]
    fn octaves_double_the_frequency() {
        assert!(close(freq(Letter::A, 5), 880.0));
        assert!(close(freq(Letter::A, 3), 220.0));
    }

    #[test]
    fn chromatic_formula_matches_the_fixed_table() {
        // C sits three semitones above the A reference, so "octave 4"
        // yields 523.25 and the keyboard's base octave 3 yields 261.63
        assert!(close(freq(Letter::C, 4), 523.25));
        assert!(close(freq(Letter::C, 3), 261.63));
        assert!(close(freq(Letter::E, 3), 329.63));
        assert!(close(freq(Letter::G, 3), 392.0));
    }

    #[test]
    fn enharmonic_spellings_are_identical() {
        assert_eq!(freq(Letter::Csh, 4), freq(Letter::Db, 4));
        assert_eq!(freq(Letter::Gsh, 2), freq(Letter::Ab, 2));
    }

    #[test]
    fn unknown_note_names_default_to_a() {
        assert_eq!("H".parse::<Letter>().unwrap(), Letter::A);
        assert_eq!("x7".parse::<Letter>().unwrap(), Letter::A);
    }

    #[test]
    fn letter_parsing_is_case_insensitive() {
        assert_eq!("c#".parse::<Letter>().unwrap(), Letter::Csh);
        assert_eq!("eb".parse::<Letter>().unwrap(), Letter::Eb);
    }
}
