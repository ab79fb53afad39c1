//! Motion control
//!
//! The central state machine: fuses debounced button events, decoded
//! height readings and remote commands into actuator drive decisions.

pub mod controller;

pub use controller::{CommandError, Mode, MotionController};
