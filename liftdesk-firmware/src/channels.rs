//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use liftdesk_drivers::decoder::Edge;
use liftdesk_protocol::{Notification, RemoteCommand};

/// Channel capacity for display wire edges
///
/// Edges burst at the wire bit rate; sized for two full words between
/// controller cycles.
const EDGE_CHANNEL_SIZE: usize = 64;

/// Channel capacity for parsed remote commands
const COMMAND_CHANNEL_SIZE: usize = 8;

/// Channel capacity for outbound notifications
const NOTIFY_CHANNEL_SIZE: usize = 16;

/// Timed edges captured from the display wire
pub static EDGE_CHANNEL: Channel<CriticalSectionRawMutex, Edge, EDGE_CHANNEL_SIZE> = Channel::new();

/// Parsed remote commands awaiting the controller
pub static COMMAND_CHANNEL: Channel<CriticalSectionRawMutex, RemoteCommand, COMMAND_CHANNEL_SIZE> =
    Channel::new();

/// Outbound notifications awaiting the remote link
pub static NOTIFY_CHANNEL: Channel<CriticalSectionRawMutex, Notification, NOTIFY_CHANNEL_SIZE> =
    Channel::new();
