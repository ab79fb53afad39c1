//! Input-silence watchdog
//!
//! Fed by every meaningful input: accepted button transitions, sensor
//! height changes (and other display activity), and motion-initiating
//! remote commands. While a target-seek is active, an expired watchdog
//! means the sensor has gone quiet under drive and motion must be
//! halted.

/// Tracks the time of the last meaningful input signal
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SignalWatchdog {
    last_signal_ms: u64,
    giveup_ms: u64,
}

impl SignalWatchdog {
    /// Create a watchdog with the given giveup window
    pub fn new(giveup_ms: u64) -> Self {
        Self {
            last_signal_ms: 0,
            giveup_ms,
        }
    }

    /// Record a meaningful input at `now_ms`
    pub fn feed(&mut self, now_ms: u64) {
        self.last_signal_ms = now_ms;
    }

    /// Time of the last recorded input (ms)
    pub fn last_signal(&self) -> u64 {
        self.last_signal_ms
    }

    /// True once input has been silent longer than the giveup window
    pub fn expired(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.last_signal_ms) > self.giveup_ms
    }
}
