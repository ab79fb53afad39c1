//! GPIO actuator driver
//!
//! Drives the desk controller's up/down input lines through two GPIO
//! outputs. The desk interprets an asserted line as "move in that
//! direction"; asserting both at once is undefined behavior for the
//! controller, so the deassert always happens before the assert.

use embedded_hal::digital::OutputPin;

use liftdesk_core::traits::ActuatorDriver;
use liftdesk_protocol::Direction;

/// Two-line GPIO actuator
pub struct GpioActuator<P> {
    up: P,
    down: P,
    asserted: Direction,
}

impl<P: OutputPin> GpioActuator<P> {
    /// Take ownership of the drive pins; both are deasserted
    pub fn new(mut up: P, mut down: P) -> Result<Self, P::Error> {
        up.set_low()?;
        down.set_low()?;
        Ok(Self {
            up,
            down,
            asserted: Direction::Stopped,
        })
    }

    /// Direction currently asserted on the lines
    pub fn asserted(&self) -> Direction {
        self.asserted
    }
}

impl<P: OutputPin> ActuatorDriver for GpioActuator<P> {
    type Error = P::Error;

    fn set_outputs(&mut self, up: bool, down: bool) -> Result<(), Self::Error> {
        // Opposing assertion is undefined for the desk controller;
        // degrade it to a stop.
        let (up, down) = if up && down { (false, false) } else { (up, down) };

        // Deassert before assert so the lines are never high together,
        // even for the instant between the two writes.
        if !up {
            self.up.set_low()?;
        }
        if !down {
            self.down.set_low()?;
        }
        if up {
            self.up.set_high()?;
        }
        if down {
            self.down.set_high()?;
        }

        self.asserted = match (up, down) {
            (true, _) => Direction::Up,
            (false, true) => Direction::Down,
            (false, false) => Direction::Stopped,
        };
        Ok(())
    }
}
