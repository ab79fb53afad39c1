//! Actuator driver trait
//!
//! The desk motor controller exposes two drive lines, one per
//! direction. Implementations own the physical signal lines and must
//! guarantee the lines are never asserted simultaneously, not even
//! transiently while switching.

use liftdesk_protocol::Direction;

/// Driver for the desk's up/down drive lines
pub trait ActuatorDriver {
    /// Pin-level error type
    type Error;

    /// Set both drive lines
    ///
    /// Callers never pass `up && down`; implementations must still
    /// order the writes so both lines cannot be high at once.
    fn set_outputs(&mut self, up: bool, down: bool) -> Result<(), Self::Error>;

    /// Assert the lines for a drive direction
    fn drive(&mut self, direction: Direction) -> Result<(), Self::Error> {
        match direction {
            Direction::Up => self.set_outputs(true, false),
            Direction::Down => self.set_outputs(false, true),
            Direction::Stopped => self.set_outputs(false, false),
        }
    }
}
