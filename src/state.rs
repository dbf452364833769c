use std::{collections::HashMap, path::PathBuf, time::Duration};

use crossbeam_channel as mpmc;
use rand::{thread_rng, Rng};
use rodio::Source;
use structopt::StructOpt;

use crate::{
    colorprintln, degree_key, degree_keys, freq, parse_commands, particle_at, period_frames,
    AutoPlayTimer, ChimeCommand, ChimeError, ChimeResult, Key, Oscillator, PlaybackConfig, Song,
    Tone, VisualEvent, VoiceId, Voices, KEYBINDS, PENTATONIC,
};

/// Decorations are droppable, so the visual channel is bounded and
/// laggards lose events instead of growing a queue
const VISUAL_CAPACITY: usize = 256;

/// The note currently sounding for a held key
///
/// At most one exists per key at any time
#[derive(Debug, Clone, Copy)]
pub struct ActiveNote {
    pub freq: f32,
    pub amplitude: f32,
    pub voices: Voices,
}

/// The playback state machine
///
/// Owns the configuration, the melody cursor, the per-key active notes,
/// and the live oscillator mix. It is also the audio source: the sink
/// pulls frames from its `Iterator` impl, which is where the auto-play
/// timer ticks.
pub struct State {
    sample_rate: u32,
    config: PlaybackConfig,
    cursor: usize,
    active: HashMap<Key, ActiveNote>,
    mix: Vec<Oscillator>,
    next_voice: VoiceId,
    glow: Vec<Key>,
    timer: AutoPlayTimer,
    send: mpmc::Sender<ChimeResult<bool>>,
    recv: mpmc::Receiver<String>,
    visuals: mpmc::Sender<VisualEvent>,
}

impl State {
    /// Create a new state
    ///
    /// # Errors
    ///
    /// Returns an error if the given config file cannot be loaded
    pub fn new(file: Option<PathBuf>, sample_rate: u32) -> ChimeResult<(Self, StateInterface)> {
        let (send, inter_recv) = mpmc::unbounded();
        let (inter_send, recv) = mpmc::unbounded();
        let (visual_send, visual_recv) = mpmc::bounded(VISUAL_CAPACITY);
        let config = if let Some(path) = file {
            PlaybackConfig::load(path)?
        } else {
            PlaybackConfig::default()
        };
        let mut state = State {
            sample_rate,
            config,
            cursor: 0,
            active: HashMap::new(),
            mix: Vec::new(),
            next_voice: 0,
            glow: Vec::new(),
            timer: AutoPlayTimer::default(),
            send,
            recv,
            visuals: visual_send,
        };
        if state.config.autoplay {
            state
                .timer
                .schedule(period_frames(sample_rate, state.config.tempo));
        }
        state.update_glow();
        Ok((
            state,
            StateInterface {
                send: inter_send,
                recv: inter_recv,
                visuals: visual_recv,
            },
        ))
    }
    /// Press a key
    ///
    /// Pressing a key that is already held is a no-op
    pub fn press(&mut self, key: Key, pos: Option<(f32, f32)>) {
        self.play(key, pos, false);
    }
    fn play(&mut self, key: Key, pos: Option<(f32, f32)>, auto: bool) {
        if self.active.contains_key(&key) {
            if auto {
                // Auto-play replaces the note; the superseded voices are
                // left to their scheduled stop
                self.active.remove(&key);
            } else {
                return;
            }
        }
        let melodic = self.config.melody || auto;
        let hz = if melodic {
            let degrees = self.config.song.degrees();
            PENTATONIC[degrees[self.cursor % degrees.len()]]
        } else {
            let binding = &KEYBINDS[&key];
            freq(binding.letter, binding.octave_offset + 3)
        };
        let amplitude = self.config.volume
            * if self.config.melody {
                thread_rng().gen_range(0.3, 0.5)
            } else {
                0.5
            };
        let duration = 60.0 / self.config.tempo.max(1) as f32;
        let voices = match self.config.tone {
            Tone::Chime => {
                let first = self.spawn(Oscillator::new(
                    Tone::Chime.waveform(),
                    hz,
                    amplitude,
                    duration,
                ));
                let cents = thread_rng().gen_range(-10.0, 10.0);
                let second = self.spawn(
                    Oscillator::new(Tone::Chime.waveform(), hz * 2.0, amplitude * 0.3, duration)
                        .detuned(cents),
                );
                Voices::Dual(first, second)
            }
            tone => Voices::Single(self.spawn(Oscillator::new(
                tone.waveform(),
                hz,
                amplitude,
                duration,
            ))),
        };
        self.active.insert(key, ActiveNote {
            freq: hz,
            amplitude,
            voices,
        });
        let _ = self.visuals.try_send(VisualEvent::Pressed(key, true));
        let _ = self.visuals.try_send(particle_at(pos));
        if melodic {
            let len = self.config.song.degrees().len();
            self.cursor = (self.cursor + 1) % len;
            self.update_glow();
        }
    }
    /// Release a key, stopping its voices immediately
    ///
    /// Releasing a key with no sounding note is a no-op
    pub fn release(&mut self, key: Key) {
        if let Some(note) = self.active.remove(&key) {
            let ids: Vec<VoiceId> = note.voices.ids().collect();
            self.mix.retain(|osc| !ids.contains(&osc.id()));
            let _ = self.visuals.try_send(VisualEvent::Pressed(key, false));
        }
    }
    fn spawn(&mut self, osc: Oscillator) -> VoiceId {
        let id = self.next_voice;
        self.next_voice += 1;
        self.mix.push(osc.with_id(id));
        id
    }
    fn update_glow(&mut self) {
        self.glow = if self.config.melody || self.config.autoplay {
            let degrees = self.config.song.degrees();
            degree_keys(degrees[self.cursor % degrees.len()]).to_vec()
        } else {
            Vec::new()
        };
        let _ = self.visuals.try_send(VisualEvent::Glow(self.glow.clone()));
    }
    pub fn set_tone(&mut self, tone: Tone) {
        self.config.tone = tone;
    }
    pub fn set_volume(&mut self, volume: f32) {
        self.config.volume = volume.max(0.0).min(1.0);
    }
    /// Set the tempo, rescheduling the auto-play timer if it is running
    pub fn set_tempo(&mut self, tempo: u32) {
        self.config.tempo = tempo.max(1);
        if self.timer.is_scheduled() {
            self.timer
                .schedule(period_frames(self.sample_rate, self.config.tempo));
        }
    }
    /// Select a song, resetting the melody cursor
    pub fn set_song(&mut self, song: Song) {
        self.config.song = song;
        self.cursor = 0;
        self.update_glow();
    }
    pub fn toggle_melody(&mut self) -> bool {
        self.config.melody = !self.config.melody;
        self.update_glow();
        self.config.melody
    }
    pub fn toggle_autoplay(&mut self) -> bool {
        self.config.autoplay = !self.config.autoplay;
        if self.config.autoplay {
            self.timer
                .schedule(period_frames(self.sample_rate, self.config.tempo));
        } else {
            self.timer.cancel();
        }
        self.update_glow();
        self.config.autoplay
    }
    /// Play the key for the current melody degree and request a redraw
    fn autoplay_step(&mut self) {
        let degrees = self.config.song.degrees();
        let key = degree_key(degrees[self.cursor % degrees.len()]);
        self.play(key, None, true);
        let _ = self.visuals.try_send(VisualEvent::Redraw);
    }
    /// Queue a command
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails to parse
    pub fn queue_command(&mut self, text: &str) -> ChimeResult<bool> {
        if let Some(commands) = parse_commands(text) {
            for args in commands {
                match ChimeCommand::from_iter_safe(&args)? {
                    ChimeCommand::Quit => return Ok(false),
                    command => self.process_command(command),
                }
            }
        }
        Ok(true)
    }
    fn process_command(&mut self, command: ChimeCommand) {
        match command {
            ChimeCommand::Quit => {}
            ChimeCommand::Press { key, x, y } => {
                // Unknown key labels are ignored
                if let Ok(key) = key.parse::<Key>() {
                    let pos = x.and_then(|x| y.map(|y| (x, y)));
                    self.press(key, pos);
                }
            }
            ChimeCommand::Release { key } => {
                if let Ok(key) = key.parse::<Key>() {
                    self.release(key);
                }
            }
            ChimeCommand::Tone { tone } => {
                self.set_tone(tone);
                colorprintln!("Tone: {}", bright_cyan, tone);
            }
            ChimeCommand::Volume { volume } => {
                self.set_volume(volume);
                colorprintln!("Volume: {}", bright_cyan, self.config.volume);
            }
            ChimeCommand::Tempo { tempo } => {
                self.set_tempo(tempo);
                colorprintln!("Tempo: {}", bright_cyan, self.config.tempo);
            }
            ChimeCommand::Song { song } => {
                self.set_song(song);
                colorprintln!("Song: {}", bright_cyan, song);
            }
            ChimeCommand::Melody => {
                let on = self.toggle_melody();
                colorprintln!("Melody mode: {}", bright_cyan, on);
            }
            ChimeCommand::Autoplay => {
                let on = self.toggle_autoplay();
                colorprintln!("Auto play: {}", bright_cyan, on);
            }
            ChimeCommand::Status => self.print_status(),
        }
    }
    fn print_status(&self) {
        colorprintln!(
            "tone: {}  volume: {}  tempo: {}  song: {}",
            bright_cyan,
            self.config.tone,
            self.config.volume,
            self.config.tempo,
            self.config.song
        );
        colorprintln!(
            "melody: {}  autoplay: {}  cursor: {}",
            bright_cyan,
            self.config.melody,
            self.config.autoplay,
            self.cursor
        );
        if !self.active.is_empty() {
            let mut notes: Vec<String> = self
                .active
                .iter()
                .map(|(key, note)| {
                    format!("{} ({:.2} Hz, amp {:.2})", key, note.freq, note.amplitude)
                })
                .collect();
            notes.sort();
            colorprintln!("sounding: {}", bright_yellow, notes.join("  "));
        }
        if !self.glow.is_empty() {
            let keys: Vec<String> = self.glow.iter().map(Key::to_string).collect();
            colorprintln!("next: {}", bright_yellow, keys.join(" "));
        }
    }
}

impl Iterator for State {
    type Item = f32;
    fn next(&mut self) -> Option<Self::Item> {
        // Check for commands from the interface
        while let Ok(command) = self.recv.try_recv() {
            let res = self.queue_command(&command);
            let _ = self.send.send(res);
        }
        // Retire voices whose scheduled stop has passed
        let sample_rate = self.sample_rate;
        self.mix.retain(|osc| !osc.finished(sample_rate));
        // Advance the auto-play timer
        if self.timer.tick() {
            self.autoplay_step();
        }
        // Mix the live voices
        let mut frame = 0.0;
        for osc in &mut self.mix {
            frame += osc.sample(sample_rate);
        }
        Some(frame)
    }
}

impl Source for State {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }
    fn channels(&self) -> u16 {
        1
    }
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
    fn total_duration(&self) -> Option<Duration> {
        None
    }
}

/// An interface for controlling a running chimeboard state
pub struct StateInterface {
    send: mpmc::Sender<String>,
    recv: mpmc::Receiver<ChimeResult<bool>>,
    visuals: mpmc::Receiver<VisualEvent>,
}

impl StateInterface {
    /// Send a command to the state corresponding to this interface
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails or if the state was dropped
    pub fn send_command<S>(&self, command: S) -> ChimeResult<bool>
    where
        S: Into<String>,
    {
        self.send
            .send(command.into())
            .map_err(|_| ChimeError::StateDropped)?;
        self.recv.recv().unwrap_or(Err(ChimeError::StateDropped))
    }
    /// Drain the pending visual requests
    pub fn visual_events(&self) -> impl Iterator<Item = VisualEvent> + '_ {
        self.visuals.try_iter()
    }
}
