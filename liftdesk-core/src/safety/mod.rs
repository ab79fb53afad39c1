//! Safety monitoring
//!
//! Tracks time since the last meaningful input and flags when the
//! desk has been driving blind for too long.

pub mod watchdog;

pub use watchdog::SignalWatchdog;
