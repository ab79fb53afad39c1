//! Board-agnostic core logic for the desk controller firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (actuator, position decoder)
//! - Button debouncing and press classification
//! - Height validation against calibrated limits
//! - Input-silence safety watchdog
//! - The motion control state machine
//! - Rate-limited height publishing
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod height;
pub mod input;
pub mod motion;
pub mod publish;
pub mod safety;
pub mod traits;
