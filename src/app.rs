use std::path::PathBuf;

use structopt::StructOpt;

use crate::{Song, Tone};

#[derive(Debug, StructOpt)]
pub struct ChimeApp {
    /// A substring of the name of the audio output device to use
    #[structopt(long, short)]
    pub output: Option<String>,
    /// The sample rate
    #[structopt(long, short, default_value = "44100")]
    pub sample_rate: u32,
    /// A RON file with the startup playback configuration
    #[structopt(long, short)]
    pub file: Option<PathBuf>,
    #[structopt(subcommand)]
    pub sub: Option<ChimeSubcommand>,
}

#[derive(Debug, StructOpt)]
pub enum ChimeSubcommand {
    #[structopt(about = "List the available audio output devices")]
    OutputList,
}

/// A command for a running keyboard, one per input line
#[derive(Debug, StructOpt)]
pub enum ChimeCommand {
    #[structopt(about = "Quit chimeboard", alias = "exit")]
    Quit,
    #[structopt(about = "Press a key, optionally at a position")]
    Press {
        key: String,
        x: Option<f32>,
        y: Option<f32>,
    },
    #[structopt(about = "Release a key")]
    Release { key: String },
    #[structopt(about = "Select the tone used for new notes")]
    Tone { tone: Tone },
    #[structopt(about = "Set the volume between 0 and 1")]
    Volume { volume: f32 },
    #[structopt(about = "Set the tempo in beats per minute")]
    Tempo { tempo: u32 },
    #[structopt(about = "Select the song for melody mode and auto-play")]
    Song { song: Song },
    #[structopt(about = "Toggle melody mode")]
    Melody,
    #[structopt(about = "Toggle auto-play", alias = "auto")]
    Autoplay,
    #[structopt(about = "Print the playback state", alias = "ls")]
    Status,
}
