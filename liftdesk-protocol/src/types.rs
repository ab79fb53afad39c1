//! Shared types for drive direction and panel buttons

/// Actuator drive direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Drive the desk up
    Up,
    /// Drive the desk down
    Down,
    /// Both drive lines deasserted
    #[default]
    Stopped,
}

impl Direction {
    /// Wire text for state notifications
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Stopped => "stopped",
        }
    }

    /// The opposite drive direction; `Stopped` has none
    pub fn reversed(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Stopped => Direction::Stopped,
        }
    }
}

/// Physical panel button identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonId {
    Up,
    Down,
}

impl ButtonId {
    /// Wire text for button notifications
    pub fn as_str(&self) -> &'static str {
        match self {
            ButtonId::Up => "up",
            ButtonId::Down => "down",
        }
    }

    /// The drive direction this button requests when held
    pub fn direction(&self) -> Direction {
        match self {
            ButtonId::Up => Direction::Up,
            ButtonId::Down => Direction::Down,
        }
    }
}

/// Press classification from the debouncer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressKind {
    /// Stable press outside the double-press window
    Single,
    /// Second press within the double-press window
    Double,
}

impl PressKind {
    /// Wire text prefix for button notifications
    pub fn as_str(&self) -> &'static str {
        match self {
            PressKind::Single => "single",
            PressKind::Double => "double",
        }
    }
}
