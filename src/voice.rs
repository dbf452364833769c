use std::{f32::consts::PI, fmt, iter::once, str::FromStr};

use serde_derive::{Deserialize, Serialize};

use crate::{ChimeError, ENVELOPE_FLOOR};

/// A selectable tone for key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tone {
    /// Dual detuned sine voices an octave apart
    Chime,
    Square,
    Sawtooth,
    Triangle,
}

impl Default for Tone {
    fn default() -> Self {
        Tone::Chime
    }
}

impl Tone {
    /// The waveform of this tone's single-oscillator rendition
    pub fn waveform(self) -> WaveForm {
        match self {
            Tone::Chime => WaveForm::Sine,
            Tone::Square => WaveForm::Square,
            Tone::Sawtooth => WaveForm::Saw,
            Tone::Triangle => WaveForm::Triangle,
        }
    }
}

impl FromStr for Tone {
    type Err = ChimeError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "chime" => Ok(Tone::Chime),
            "square" => Ok(Tone::Square),
            "sawtooth" | "saw" => Ok(Tone::Sawtooth),
            "triangle" => Ok(Tone::Triangle),
            _ => Err(ChimeError::UnknownTone(s.into())),
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Tone::Chime => "chime".fmt(f),
            Tone::Square => "square".fmt(f),
            Tone::Sawtooth => "sawtooth".fmt(f),
            Tone::Triangle => "triangle".fmt(f),
        }
    }
}

/// A waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveForm {
    Sine,
    Square,
    Saw,
    Triangle,
}

/// The identifier of a live oscillator in the mix
pub type VoiceId = u64;

/// The oscillators belonging to one sounding note
///
/// Chime notes carry two voices, every other tone one.
/// Either way each voice is independently stoppable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Voices {
    Single(VoiceId),
    Dual(VoiceId, VoiceId),
}

impl Voices {
    pub fn ids(self) -> impl Iterator<Item = VoiceId> {
        let (first, second) = match self {
            Voices::Single(id) => (id, None),
            Voices::Dual(a, b) => (a, Some(b)),
        };
        once(first).chain(second)
    }
}

/// A phase-accumulator oscillator with an exponential decay envelope
///
/// The gain ramps from the start amplitude to `ENVELOPE_FLOOR` over
/// `duration` seconds, after which the oscillator reports itself finished
/// (the scheduled auto-stop). Stopping early is the mixer's business.
#[derive(Debug, Clone)]
pub struct Oscillator {
    id: VoiceId,
    form: WaveForm,
    freq: f32,
    amplitude: f32,
    duration: f32,
    phase: u32,
    i: u32,
}

impl Oscillator {
    pub fn new(form: WaveForm, freq: f32, amplitude: f32, duration: f32) -> Self {
        Oscillator {
            id: 0,
            form,
            freq,
            amplitude,
            duration,
            phase: 0,
            i: 0,
        }
    }
    pub fn with_id(self, id: VoiceId) -> Self {
        Oscillator { id, ..self }
    }
    /// Shift the frequency by a cents offset
    pub fn detuned(self, cents: f32) -> Self {
        Oscillator {
            freq: self.freq * 2f32.powf(cents / 1200.0),
            ..self
        }
    }
    pub fn id(&self) -> VoiceId {
        self.id
    }
    pub fn freq(&self) -> f32 {
        self.freq
    }
    /// True once the scheduled stop time has passed
    pub fn finished(&self, sample_rate: u32) -> bool {
        self.i >= (self.duration * sample_rate as f32) as u32
    }
    pub fn sample(&mut self, sample_rate: u32) -> f32 {
        if self.freq <= 0.0 {
            return 0.0;
        }
        // spc = samples per cycle
        let spc = sample_rate as f32 / self.freq;
        let t = self.phase as f32 / spc;
        let s = match self.form {
            WaveForm::Sine => (t * 2.0 * PI).sin(),
            WaveForm::Square => {
                if t < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            WaveForm::Saw => 2.0 * (t % 1.0) - 1.0,
            WaveForm::Triangle => 2.0 * (2.0 * (t % 1.0) - 1.0).abs() - 1.0,
        };
        self.phase = (self.phase + 1) % spc as u32;
        let gain = self.gain(self.i as f32 / sample_rate as f32);
        self.i += 1;
        s * gain
    }
    fn gain(&self, t: f32) -> f32 {
        let amp = self.amplitude.max(ENVELOPE_FLOOR);
        amp * (ENVELOPE_FLOOR / amp).powf(t / self.duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_wave_opens_at_full_amplitude() {
        let mut osc = Oscillator::new(WaveForm::Square, 441.0, 0.25, 1.0);
        assert!((osc.sample(44100) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn envelope_decays_toward_the_floor() {
        let osc = Oscillator::new(WaveForm::Sine, 440.0, 0.5, 2.0);
        assert!((osc.gain(0.0) - 0.5).abs() < 1e-6);
        assert!(osc.gain(1.0) < osc.gain(0.5));
        assert!((osc.gain(2.0) - ENVELOPE_FLOOR).abs() < 1e-4);
    }

    #[test]
    fn oscillators_finish_when_their_duration_elapses() {
        let mut osc = Oscillator::new(WaveForm::Sine, 440.0, 0.5, 0.01);
        let frames = (0.01 * 44100.0) as u32;
        for _ in 0..frames {
            assert!(!osc.finished(44100));
            osc.sample(44100);
        }
        assert!(osc.finished(44100));
    }

    #[test]
    fn detuning_by_an_octave_doubles_the_frequency() {
        let osc = Oscillator::new(WaveForm::Sine, 440.0, 0.5, 1.0).detuned(1200.0);
        assert!((osc.freq() - 880.0).abs() < 0.01);
    }

    #[test]
    fn voices_expose_every_id() {
        assert_eq!(Voices::Single(3).ids().collect::<Vec<_>>(), [3]);
        assert_eq!(Voices::Dual(1, 2).ids().collect::<Vec<_>>(), [1, 2]);
    }

    #[test]
    fn tone_names_parse() {
        assert_eq!("chime".parse::<Tone>().unwrap(), Tone::Chime);
        assert_eq!("saw".parse::<Tone>().unwrap(), Tone::Sawtooth);
        assert!("organ".parse::<Tone>().is_err());
    }
}
