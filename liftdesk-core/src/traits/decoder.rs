//! Position decoder trait
//!
//! The desk reports its height on the controller-to-display wire; an
//! external decoder captures that edge stream and turns it into
//! messages. Arrival cadence and decoding correctness are its
//! responsibility; the core only drains already-decoded messages at
//! the top of each cycle.

/// One decoded message from the display wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayMessage {
    /// A height readout in centimeters
    Height(u8),
    /// Non-numeric display activity (display-on, menus)
    ///
    /// Carries no height but still counts as a live sensor signal.
    Activity,
}

impl DisplayMessage {
    /// The height carried by this message, if numeric
    pub fn height(&self) -> Option<u8> {
        match self {
            DisplayMessage::Height(h) => Some(*h),
            DisplayMessage::Activity => None,
        }
    }

    /// Short description for trace logging
    pub fn describe(&self) -> &'static str {
        match self {
            DisplayMessage::Height(_) => "height readout",
            DisplayMessage::Activity => "display activity",
        }
    }
}

/// Source of decoded display messages
pub trait PositionDecoder {
    /// Take the next decoded message, if one is ready
    fn poll(&mut self) -> Option<DisplayMessage>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_accessor() {
        assert_eq!(DisplayMessage::Height(93).height(), Some(93));
        assert_eq!(DisplayMessage::Activity.height(), None);
    }
}
