use std::{fmt, str::FromStr};

use serde_derive::{Deserialize, Serialize};

use crate::{ChimeError, Key};

/// A song playable in melody mode and by auto-play
///
/// Songs are sequences of scale degrees into the pentatonic array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Song {
    Twinkle,
    Mary,
    Happy,
}

impl Default for Song {
    fn default() -> Self {
        Song::Twinkle
    }
}

#[rustfmt::skip]
const TWINKLE: &[usize] = &[
    0, 0, 3, 3, 4, 4, 3, // C4, C4, G4, G4, A4, A4, G4
    2, 2, 1, 1, 0, 0, 1, // E4, E4, D4, D4, C4, C4, D4
    3, 3, 2, 2, 1, 1, 0, // G4, G4, E4, E4, D4, D4, C4
    3, 3, 2, 2, 1, 1, 0, // G4, G4, E4, E4, D4, D4, C4
];

#[rustfmt::skip]
const MARY: &[usize] = &[
    2, 1, 0, 1, 2, 2, 2, // E D C D E E E
    1, 1, 1, 2, 3, 3,    // D D D E G G
    2, 1, 0, 1, 2, 2, 2, // E D C D E E E
    1, 1, 2, 1, 0,       // D D E D C
];

#[rustfmt::skip]
const HAPPY: &[usize] = &[
    0, 0, 1, 0, 3, 2,    // C C D C G F
    0, 0, 1, 0, 4, 3,    // C C D C A G
    0, 0, 0, 2, 3, 1, 0, // C C C F G E D
    4, 4, 3, 1, 2, 1,    // A A G E F D (adapted)
];

impl Song {
    /// The song's scale-degree sequence
    pub fn degrees(self) -> &'static [usize] {
        match self {
            Song::Twinkle => TWINKLE,
            Song::Mary => MARY,
            Song::Happy => HAPPY,
        }
    }
}

impl FromStr for Song {
    type Err = ChimeError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "twinkle" => Ok(Song::Twinkle),
            "mary" => Ok(Song::Mary),
            "happy" => Ok(Song::Happy),
            _ => Err(ChimeError::UnknownSong(s.into())),
        }
    }
}

impl fmt::Display for Song {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Song::Twinkle => "twinkle".fmt(f),
            Song::Mary => "mary".fmt(f),
            Song::Happy => "happy".fmt(f),
        }
    }
}

/// The key auto-play presses for a scale degree
pub fn degree_key(degree: usize) -> Key {
    [Key::A, Key::S, Key::D, Key::G, Key::H][degree]
}

/// The keys that show the next-note highlight for a scale degree
pub fn degree_keys(degree: usize) -> &'static [Key] {
    match degree {
        0 => &[Key::A, Key::K],
        1 => &[Key::S, Key::L],
        2 => &[Key::D],
        3 => &[Key::G],
        _ => &[Key::H],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twinkle_opens_with_the_known_phrase() {
        assert_eq!(&Song::Twinkle.degrees()[..7], &[0, 0, 3, 3, 4, 4, 3]);
    }

    #[test]
    fn every_degree_indexes_the_pentatonic_array() {
        for song in [Song::Twinkle, Song::Mary, Song::Happy].iter() {
            assert!(!song.degrees().is_empty());
            assert!(song.degrees().iter().all(|&d| d < 5), "{}", song);
        }
    }

    #[test]
    fn auto_play_keys_are_a_subset_of_the_glow_keys() {
        for degree in 0..5 {
            assert!(degree_keys(degree).contains(&degree_key(degree)));
        }
    }

    #[test]
    fn unknown_song_names_are_an_error() {
        assert!("jingle".parse::<Song>().is_err());
        assert_eq!("TWINKLE".parse::<Song>().unwrap(), Song::Twinkle);
    }
}
