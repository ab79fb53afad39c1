//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in liftdesk-core:
//!
//! - GPIO actuator driver (two mutually exclusive drive lines)
//! - LOGICDATA-style position decoder (timed edge stream to height)

#![no_std]
#![deny(unsafe_code)]

pub mod actuator;
pub mod decoder;
