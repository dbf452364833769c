/// A cancellable frame-counted timer that drives auto-play
///
/// Scheduling replaces any previous countdown and cancelling is
/// idempotent, so at most one countdown exists at a time.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoPlayTimer {
    period: Option<u32>,
    countdown: u32,
}

impl AutoPlayTimer {
    /// Start (or restart) the timer with a period in frames
    pub fn schedule(&mut self, period: u32) {
        let period = period.max(1);
        self.period = Some(period);
        self.countdown = period;
    }
    pub fn cancel(&mut self) {
        self.period = None;
        self.countdown = 0;
    }
    pub fn is_scheduled(&self) -> bool {
        self.period.is_some()
    }
    pub fn period(&self) -> Option<u32> {
        self.period
    }
    /// Advance one frame, returning true each time the period elapses
    pub fn tick(&mut self) -> bool {
        if let Some(period) = self.period {
            self.countdown -= 1;
            if self.countdown == 0 {
                self.countdown = period;
                return true;
            }
        }
        false
    }
}

/// The auto-play period in frames for a tempo, 60000/tempo milliseconds
pub fn period_frames(sample_rate: u32, tempo: u32) -> u32 {
    (u64::from(sample_rate) * 60 / u64::from(tempo.max(1))) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_matches_the_tempo_interval() {
        // 60000 / 80 bpm = 750 ms
        assert_eq!(period_frames(44100, 80), 33075);
        assert_eq!(period_frames(44100, 120), 22050);
    }

    #[test]
    fn timer_fires_once_per_period_and_rearms() {
        let mut timer = AutoPlayTimer::default();
        timer.schedule(4);
        let fires: Vec<bool> = (0..8).map(|_| timer.tick()).collect();
        assert_eq!(
            fires,
            [false, false, false, true, false, false, false, true]
        );
    }

    #[test]
    fn rescheduling_replaces_the_countdown() {
        let mut timer = AutoPlayTimer::default();
        timer.schedule(10);
        for _ in 0..5 {
            timer.tick();
        }
        timer.schedule(3);
        assert_eq!(timer.period(), Some(3));
        assert!(!timer.tick());
        assert!(!timer.tick());
        assert!(timer.tick());
    }

    #[test]
    fn cancel_is_idempotent_and_stops_ticks() {
        let mut timer = AutoPlayTimer::default();
        timer.schedule(2);
        timer.cancel();
        timer.cancel();
        assert!(!timer.is_scheduled());
        for _ in 0..10 {
            assert!(!timer.tick());
        }
    }
}
