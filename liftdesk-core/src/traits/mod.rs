//! Hardware abstraction traits
//!
//! These traits define the interface between the control logic and
//! hardware-specific implementations.

pub mod actuator;
pub mod decoder;

pub use actuator::ActuatorDriver;
pub use decoder::{DisplayMessage, PositionDecoder};
