use std::{fs::File, path::Path};

use serde_derive::{Deserialize, Serialize};

use crate::{ChimeResult, Song, Tone, DEFAULT_TEMPO, DEFAULT_VOLUME};

/// The playback configuration
///
/// Written by the control surface, read by the state machine on every press
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PlaybackConfig {
    pub tone: Tone,
    pub volume: f32,
    pub tempo: u32,
    pub song: Song,
    pub melody: bool,
    pub autoplay: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        PlaybackConfig {
            tone: Tone::default(),
            volume: DEFAULT_VOLUME,
            tempo: DEFAULT_TEMPO,
            song: Song::default(),
            melody: false,
            autoplay: false,
        }
    }
}

impl PlaybackConfig {
    /// Load a configuration from a RON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsed
    pub fn load<P>(path: P) -> ChimeResult<Self>
    where
        P: AsRef<Path>,
    {
        let file = File::open(path.as_ref())?;
        Ok(ron::de::from_reader(file)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_startup_state() {
        let config = PlaybackConfig::default();
        assert_eq!(config.tone, Tone::Chime);
        assert_eq!(config.volume, 0.5);
        assert_eq!(config.tempo, 80);
        assert_eq!(config.song, Song::Twinkle);
        assert!(!config.melody);
        assert!(!config.autoplay);
    }

    #[test]
    fn partial_config_files_fill_in_defaults() {
        let config: PlaybackConfig =
            ron::de::from_str("(volume: 0.25, tempo: 100, song: mary)").unwrap();
        assert_eq!(config.volume, 0.25);
        assert_eq!(config.tempo, 100);
        assert_eq!(config.song, Song::Mary);
        assert_eq!(config.tone, Tone::Chime);
    }
}
