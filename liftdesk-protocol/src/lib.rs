//! Remote Channel Vocabulary
//!
//! This crate defines the text-based topic/payload surface between the
//! desk controller and the remote channel (message bus bridge). The
//! link is line-oriented and deliberately simple:
//!
//! ```text
//! inbound:   set 100\n          cmd stop\n
//! outbound:  height 93\n        state up\n        button single down\n
//! ```
//!
//! The controller core works exclusively with the typed
//! [`RemoteCommand`] and [`Notification`] enums; translation to and
//! from wire text happens only at this boundary. The core assumes no
//! delivery guarantee for outbound notifications.

#![no_std]
#![deny(unsafe_code)]

pub mod commands;
pub mod notify;
pub mod types;

pub use commands::{RemoteCommand, TopicKind};
pub use notify::{Notification, Topic, MAX_PAYLOAD_LEN};
pub use types::{ButtonId, Direction, PressKind};
