//! Button input handling
//!
//! Converts raw per-button pin samples into stable press/release
//! events and classifies single versus double presses.

pub mod debouncer;

pub use debouncer::{ButtonChannel, ButtonEvent};
