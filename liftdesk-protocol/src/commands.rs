//! Inbound command parsing
//!
//! The remote channel subscribes to two topics: `set` carries a target
//! height as a decimal string, `cmd` carries short verb payloads.
//! Anything unrecognized parses to `None` and is dropped by the caller.

/// Inbound topic classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TopicKind {
    /// Target height topic ("set")
    Set,
    /// Verb command topic ("cmd")
    Cmd,
}

impl TopicKind {
    /// Parse a topic name
    pub fn from_str(topic: &str) -> Option<Self> {
        match topic {
            "set" => Some(TopicKind::Set),
            "cmd" => Some(TopicKind::Cmd),
            _ => None,
        }
    }

    /// Topic name as wire text
    pub fn as_str(&self) -> &'static str {
        match self {
            TopicKind::Set => "set",
            TopicKind::Cmd => "cmd",
        }
    }
}

/// A parsed remote directive for the motion controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RemoteCommand {
    /// Seek to an absolute height (validated against limits by the core)
    SetHeight(u8),
    /// Seek to the configured high preset ("up")
    MoveToHigh,
    /// Seek to the configured low preset ("down")
    MoveToLow,
    /// Stop any motion and drop the outstanding target
    Stop,
    /// Liveness check, answered with a pong notification
    Ping,
    /// Toggle the verbosity flag (no motion effect)
    ToggleDebug,
    /// Leave the safety-halt fault state
    ClearFault,
}

impl RemoteCommand {
    /// Map an inbound payload to a command
    ///
    /// Returns `None` for unparseable or unrecognized payloads; the
    /// caller ignores those after emitting a diagnostic.
    pub fn parse(topic: TopicKind, payload: &str) -> Option<Self> {
        match topic {
            TopicKind::Set => payload.trim().parse::<u8>().ok().map(RemoteCommand::SetHeight),
            TopicKind::Cmd => match payload.trim() {
                "up" => Some(RemoteCommand::MoveToHigh),
                "down" => Some(RemoteCommand::MoveToLow),
                "stop" => Some(RemoteCommand::Stop),
                "ping" => Some(RemoteCommand::Ping),
                "debug" => Some(RemoteCommand::ToggleDebug),
                "reset" => Some(RemoteCommand::ClearFault),
                _ => None,
            },
        }
    }

    /// Returns true if this command can start or retarget motion
    pub fn is_motion_command(&self) -> bool {
        matches!(
            self,
            RemoteCommand::SetHeight(_) | RemoteCommand::MoveToHigh | RemoteCommand::MoveToLow
        )
    }
}
