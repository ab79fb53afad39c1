//! Outbound notifications
//!
//! State changes leave the controller as a small closed set of typed
//! events; they become topic/payload text only here. The remote
//! channel publishes them fire-and-forget.

use core::fmt::Write;

use heapless::String;

use crate::types::{ButtonId, Direction, PressKind};

/// Maximum payload text length ("double down" is the longest today)
pub const MAX_PAYLOAD_LEN: usize = 24;

/// Outbound topic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Topic {
    /// Rate-limited height reports
    Height,
    /// Drive state changes and fault entry
    State,
    /// Classified button presses
    Button,
    /// Command acknowledgements
    Cmd,
}

impl Topic {
    /// Topic name as wire text
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Height => "height",
            Topic::State => "state",
            Topic::Button => "button",
            Topic::Cmd => "cmd",
        }
    }
}

/// A typed state-change event emitted by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Notification {
    /// Current height changed (rate limited by the publisher)
    HeightChanged(u8),
    /// Asserted drive direction changed
    StateChanged(Direction),
    /// A debounced, classified button press
    ButtonPressed { id: ButtonId, kind: PressKind },
    /// Input-silence fault entered; actuator de-energized
    Fault,
    /// Answer to a ping command
    Pong,
}

impl Notification {
    /// Topic this notification publishes on
    pub fn topic(&self) -> Topic {
        match self {
            Notification::HeightChanged(_) => Topic::Height,
            Notification::StateChanged(_) | Notification::Fault => Topic::State,
            Notification::ButtonPressed { .. } => Topic::Button,
            Notification::Pong => Topic::Cmd,
        }
    }

    /// Payload as wire text
    pub fn payload(&self) -> String<MAX_PAYLOAD_LEN> {
        let mut out = String::new();
        // Writes cannot fail: every variant fits MAX_PAYLOAD_LEN
        let _ = match self {
            Notification::HeightChanged(h) => write!(out, "{}", h),
            Notification::StateChanged(dir) => write!(out, "{}", dir.as_str()),
            Notification::ButtonPressed { id, kind } => {
                write!(out, "{} {}", kind.as_str(), id.as_str())
            }
            Notification::Fault => write!(out, "fault"),
            Notification::Pong => write!(out, "pong"),
        };
        out
    }
}
