//! Countdown and indefinite tick timers.
//!
//! A [`TickTimer`] is advanced exactly once per simulation step by its owner. Scripts
//! trigger effects at literal tick numbers, so an extra or missing [`TickTimer::tick`]
//! call shifts every downstream trigger.

use tracing::warn;

use crate::constants::TICKS_PER_SECOND;
use crate::error::TimerError;

/// Converts seconds to the nearest whole tick at the fixed simulation rate.
pub fn sec_to_ticks(seconds: f64) -> u64 {
    (seconds * TICKS_PER_SECOND as f64).round().max(0.0) as u64
}

/// How long a timer runs before it counts as expired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerDuration {
    Ticks(u64),
    /// Never expires on its own; an external event ends the phase via [`TickTimer::expire`].
    #[default]
    Indefinite,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TickTimer {
    elapsed: u64,
    duration: TimerDuration,
    running: bool,
    /// Set by `expire()` on an indefinite timer.
    forced: bool,
}

impl TickTimer {
    /// Creates a stopped timer with the given duration in ticks.
    pub fn new(ticks: u64) -> Self {
        Self {
            duration: TimerDuration::Ticks(ticks),
            ..Self::default()
        }
    }

    /// Creates a stopped timer that never expires on its own.
    pub fn indefinite() -> Self {
        Self::default()
    }

    /// Sets a new duration and rewinds the timer without starting it.
    pub fn reset(&mut self, duration: TimerDuration) {
        self.elapsed = 0;
        self.duration = duration;
        self.running = false;
        self.forced = false;
    }

    /// Rewinds the timer to zero and starts it, keeping the current duration.
    pub fn start(&mut self) {
        self.elapsed = 0;
        self.running = true;
        self.forced = false;
    }

    pub fn restart(&mut self) {
        self.start();
    }

    pub fn restart_ticks(&mut self, ticks: u64) {
        self.duration = TimerDuration::Ticks(ticks);
        self.start();
    }

    pub fn restart_seconds(&mut self, seconds: f64) {
        self.restart_ticks(sec_to_ticks(seconds));
    }

    pub fn restart_indefinitely(&mut self) {
        self.duration = TimerDuration::Indefinite;
        self.start();
    }

    /// Pauses the timer without rewinding it.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Continues a stopped timer from where it left off.
    pub fn resume(&mut self) {
        self.running = true;
    }

    /// Advances the timer by one tick. Must be called exactly once per simulation step.
    pub fn tick(&mut self) {
        if self.running {
            self.elapsed += 1;
        }
    }

    /// Cuts the current phase short.
    ///
    /// For a finite timer this jumps `elapsed` to the duration. An indefinite timer keeps its
    /// tick count and is flagged as expired instead.
    pub fn expire(&mut self) {
        match self.duration {
            TimerDuration::Ticks(ticks) => self.elapsed = ticks,
            TimerDuration::Indefinite => self.forced = true,
        }
        if !self.running {
            warn!(elapsed = self.elapsed, "Expiring a timer that is not running");
        }
    }

    pub fn has_expired(&self) -> bool {
        match self.duration {
            TimerDuration::Ticks(ticks) => self.elapsed >= ticks,
            TimerDuration::Indefinite => self.forced,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn elapsed_ticks(&self) -> u64 {
        self.elapsed
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed as f64 / TICKS_PER_SECOND as f64
    }

    pub fn duration(&self) -> TimerDuration {
        self.duration
    }

    /// Ticks left until expiry, saturating at zero.
    ///
    /// # Errors
    ///
    /// Returns [`TimerError::Indefinite`] if the timer has no fixed duration.
    pub fn remaining_ticks(&self) -> Result<u64, TimerError> {
        match self.duration {
            TimerDuration::Ticks(ticks) => Ok(ticks.saturating_sub(self.elapsed)),
            TimerDuration::Indefinite => Err(TimerError::Indefinite),
        }
    }

    /// True only on the tick matching `seconds` exactly; use for one-shot triggers.
    pub fn at_second(&self, seconds: f64) -> bool {
        self.elapsed == sec_to_ticks(seconds)
    }

    /// True while `elapsed` lies in the half-open range `[from, to)`, both in seconds.
    pub fn between_seconds(&self, from: f64, to: f64) -> bool {
        (sec_to_ticks(from)..sec_to_ticks(to)).contains(&self.elapsed)
    }
}
