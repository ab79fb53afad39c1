//! Button debouncer and press classifier
//!
//! One [`ButtonChannel`] per physical button. A raw sample is accepted
//! as a new stable state only if it differs from the current stable
//! state and the debounce interval has elapsed since the last accepted
//! change. Transitions into "pressed" are classified single or double
//! against the previous single-press timestamp.

use liftdesk_protocol::{ButtonId, PressKind};

/// A debounced press or release transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    /// Stable transition into pressed, classified single or double
    Pressed(PressKind),
    /// Stable transition into released
    Released,
}

/// Debounce state for one physical button
#[derive(Debug, Clone)]
pub struct ButtonChannel {
    id: ButtonId,
    /// Current accepted state; true while pressed
    stable: bool,
    /// Time of the last accepted transition (ms)
    last_change_ms: u64,
    /// Time of the last single press, if any (ms)
    ///
    /// Deliberately not updated on a double press, so a third press in
    /// quick succession classifies against the original single press
    /// rather than chaining extra doubles.
    last_press_ms: Option<u64>,
    debounce_ms: u64,
    double_press_ms: u64,
}

impl ButtonChannel {
    /// Create a channel in the released state
    pub fn new(id: ButtonId, debounce_ms: u64, double_press_ms: u64) -> Self {
        Self {
            id,
            stable: false,
            last_change_ms: 0,
            last_press_ms: None,
            debounce_ms,
            double_press_ms,
        }
    }

    /// Which physical button this channel tracks
    pub fn id(&self) -> ButtonId {
        self.id
    }

    /// Current stable state; true while the button is held
    pub fn is_held(&self) -> bool {
        self.stable
    }

    /// Feed one raw pin sample
    ///
    /// Returns a debounced event when a stable transition is accepted,
    /// `None` otherwise. Pure function of the sampled level and clock.
    pub fn sample(&mut self, raw_pressed: bool, now_ms: u64) -> Option<ButtonEvent> {
        if raw_pressed == self.stable {
            return None;
        }
        if now_ms.saturating_sub(self.last_change_ms) <= self.debounce_ms {
            return None;
        }

        self.stable = raw_pressed;
        self.last_change_ms = now_ms;

        if !raw_pressed {
            return Some(ButtonEvent::Released);
        }

        let kind = match self.last_press_ms {
            Some(prev) if now_ms.saturating_sub(prev) < self.double_press_ms => PressKind::Double,
            _ => {
                self.last_press_ms = Some(now_ms);
                PressKind::Single
            }
        };
        Some(ButtonEvent::Pressed(kind))
    }
}
