//! Height state and range validation
//!
//! Tracks the decoded current height and the outstanding target, and
//! decides whether a height/direction pair is within operable bounds.

use liftdesk_protocol::Direction;

use crate::config::DeskConfig;

/// Current and target height against the calibrated limits
///
/// `current` is `None` until the first decoded sensor reading arrives;
/// it is written exclusively from sensor readings. `target` is written
/// by command, preset and stop logic.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HeightState {
    current: Option<u8>,
    target: u8,
    min: u8,
    max: u8,
}

impl HeightState {
    /// Create with unknown current height
    pub fn new(cfg: &DeskConfig) -> Self {
        Self {
            current: None,
            target: 0,
            min: cfg.min_height,
            max: cfg.max_height,
        }
    }

    /// Last decoded height, if any reading has arrived
    pub fn current(&self) -> Option<u8> {
        self.current
    }

    /// Outstanding target height
    pub fn target(&self) -> u8 {
        self.target
    }

    /// Calibrated minimum (cm)
    pub fn min(&self) -> u8 {
        self.min
    }

    /// Calibrated maximum (cm)
    pub fn max(&self) -> u8 {
        self.max
    }

    /// Record a decoded sensor reading
    pub fn set_current(&mut self, height: u8) {
        self.current = Some(height);
    }

    /// Record a new target
    pub fn set_target(&mut self, height: u8) {
        self.target = height;
    }

    /// Strict range check: `min <= h <= max`
    pub fn in_range(&self, height: u8) -> bool {
        height >= self.min && height <= self.max
    }

    /// Whether driving in `direction` is permitted at `height`
    ///
    /// In range, any direction is valid. Out of range, only motion
    /// back toward the legal range is allowed: `Up` below the maximum
    /// (recovers an under-range desk), `Down` above the minimum. A
    /// `Stopped` direction never passes the exception branch, making
    /// this a strict range check when no direction is implied.
    pub fn is_valid(&self, height: u8, direction: Direction) -> bool {
        if self.in_range(height) {
            return true;
        }
        match direction {
            Direction::Up => height <= self.max,
            Direction::Down => height >= self.min,
            Direction::Stopped => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> HeightState {
        HeightState::new(&DeskConfig::default()) // min 62, max 128
    }

    #[test]
    fn test_stopped_is_strict_range_check() {
        let s = state();
        assert!(s.is_valid(62, Direction::Stopped));
        assert!(s.is_valid(128, Direction::Stopped));
        assert!(!s.is_valid(61, Direction::Stopped));
        assert!(!s.is_valid(129, Direction::Stopped));
    }

    #[test]
    fn test_under_range_recovery() {
        let s = state();
        // below min: lifting back into range is allowed, sinking is not
        assert!(s.is_valid(61, Direction::Up));
        assert!(!s.is_valid(61, Direction::Down));
    }

    #[test]
    fn test_over_range_recovery() {
        let s = state();
        assert!(s.is_valid(129, Direction::Down));
        assert!(!s.is_valid(129, Direction::Up));
    }

    #[test]
    fn test_in_range_allows_both() {
        let s = state();
        assert!(s.is_valid(90, Direction::Up));
        assert!(s.is_valid(90, Direction::Down));
    }

    #[test]
    fn test_current_starts_unknown() {
        let mut s = state();
        assert_eq!(s.current(), None);
        s.set_current(93);
        assert_eq!(s.current(), Some(93));
    }
}
