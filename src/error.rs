use std::io;

use structopt::clap;
use thiserror::Error;

/// The chimeboard error type
#[derive(Debug, Error)]
pub enum ChimeError {
    /// An IO error
    #[error("IO error: {0}")]
    IO(#[from] io::Error),
    /// A command line error
    #[error("{0}")]
    CLI(#[from] clap::Error),
    /// An error parsing a config file
    #[error("Config error: {0}")]
    Config(#[from] ron::de::Error),
    /// An error getting a device name
    #[error("Device name error: {0}")]
    DeviceName(#[from] cpal::DeviceNameError),
    /// An error listing output devices
    #[error("Devices error: {0}")]
    Devices(#[from] cpal::DevicesError),
    /// An unknown tone name
    #[error("Unknown tone: {0}")]
    UnknownTone(String),
    /// An unknown song name
    #[error("Unknown song: {0}")]
    UnknownSong(String),
    /// The chimeboard state was dropped
    #[error("Attempted to send a command to a dropped chimeboard state")]
    StateDropped,
}

/// The chimeboard result type
pub type ChimeResult<T> = Result<T, ChimeError>;
