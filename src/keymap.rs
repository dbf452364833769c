use std::{collections::HashMap, fmt, str::FromStr};

use once_cell::sync::Lazy;

use crate::Letter;

/// A physical key that can sound a note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    A,
    W,
    S,
    E,
    D,
    F,
    T,
    G,
    Y,
    H,
    U,
    J,
    K,
    O,
    L,
    P,
    Semicolon,
}

/// The note a key sounds when melody mode is off
///
/// Chromatic presses play at octave `octave_offset + 3`
#[derive(Debug, Clone, Copy)]
pub struct KeyBinding {
    pub letter: Letter,
    pub octave_offset: i32,
}

pub static KEYBINDS: Lazy<HashMap<Key, KeyBinding>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for &(key, letter, octave_offset) in &[
        (Key::A, Letter::C, 0),
        (Key::W, Letter::Csh, 0),
        (Key::S, Letter::D, 0),
        (Key::E, Letter::Dsh, 0),
        (Key::D, Letter::E, 0),
        (Key::F, Letter::F, 0),
        (Key::T, Letter::Fsh, 0),
        (Key::G, Letter::G, 0),
        (Key::Y, Letter::Gsh, 0),
        (Key::H, Letter::A, 1),
        (Key::U, Letter::Ash, 1),
        (Key::J, Letter::B, 1),
        (Key::K, Letter::C, 1),
        (Key::O, Letter::Csh, 1),
        (Key::L, Letter::D, 1),
        (Key::P, Letter::Dsh, 1),
        (Key::Semicolon, Letter::E, 1),
    ] {
        map.insert(key, KeyBinding {
            letter,
            octave_offset,
        });
    }
    map
});

impl FromStr for Key {
    type Err = ();
    /// Key labels are case-normalized; ";" maps to the symbolic semicolon name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_uppercase().as_str() {
            "A" => Key::A,
            "W" => Key::W,
            "S" => Key::S,
            "E" => Key::E,
            "D" => Key::D,
            "F" => Key::F,
            "T" => Key::T,
            "G" => Key::G,
            "Y" => Key::Y,
            "H" => Key::H,
            "U" => Key::U,
            "J" => Key::J,
            "K" => Key::K,
            "O" => Key::O,
            "L" => Key::L,
            "P" => Key::P,
            ";" | "SEMICOLON" => Key::Semicolon,
            _ => return Err(()),
        })
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Key::Semicolon => "semicolon".fmt(f),
            key => write!(f, "{:?}", key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_has_a_binding() {
        for key in "AWSEDFTGYHUJKOLP".chars() {
            let key = key.to_string().parse::<Key>().unwrap();
            assert!(KEYBINDS.contains_key(&key));
        }
        assert!(KEYBINDS.contains_key(&Key::Semicolon));
        assert_eq!(KEYBINDS.len(), 17);
    }

    #[test]
    fn labels_normalize_case_and_semicolon() {
        assert_eq!("a".parse::<Key>().unwrap(), Key::A);
        assert_eq!(";".parse::<Key>().unwrap(), Key::Semicolon);
        assert_eq!("semicolon".parse::<Key>().unwrap(), Key::Semicolon);
    }

    #[test]
    fn unknown_labels_do_not_parse() {
        assert!("Z".parse::<Key>().is_err());
        assert!("".parse::<Key>().is_err());
    }

    #[test]
    fn h_is_bound_to_a_in_the_upper_octave() {
        let binding = &KEYBINDS[&Key::H];
        assert_eq!(binding.letter, Letter::A);
        assert_eq!(binding.octave_offset, 1);
    }
}
