//! Change-rate height publisher
//!
//! Edge-detects height changes and rate-limits outbound height
//! notifications: at most one per interval, and the final value of a
//! burst is published once the window reopens.

use liftdesk_protocol::Notification;

use crate::config::DeskConfig;

/// Rate limiter for outbound height notifications
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HeightPublisher {
    last_published: Option<u8>,
    last_publish_ms: u64,
    interval_ms: u64,
}

impl HeightPublisher {
    /// Create a publisher that has never published
    pub fn new(cfg: &DeskConfig) -> Self {
        Self {
            last_published: None,
            last_publish_ms: 0,
            interval_ms: cfg.publish_interval_ms,
        }
    }

    /// Called once per cycle with the latest known height
    ///
    /// Emits a notification when the height differs from the last
    /// published value and the interval has elapsed.
    pub fn poll(&mut self, current: Option<u8>, now_ms: u64) -> Option<Notification> {
        let height = current?;
        if self.last_published == Some(height) {
            return None;
        }
        if now_ms.saturating_sub(self.last_publish_ms) <= self.interval_ms {
            return None;
        }
        self.last_published = Some(height);
        self.last_publish_ms = now_ms;
        Some(Notification::HeightChanged(height))
    }
}
