//! Configuration types
//!
//! All values are config-time constants; the core never mutates them
//! at runtime. Heights are in centimeters as reported by the desk's
//! display protocol.

/// Desk controller configuration
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeskConfig {
    /// Lowest calibrated height (cm)
    pub min_height: u8,
    /// Highest calibrated height (cm)
    pub max_height: u8,
    /// Preset reached by a double-press on the up button (cm)
    pub preset_high: u8,
    /// Preset reached by a double-press on the down button (cm)
    pub preset_low: u8,
    /// Button debounce interval (ms)
    pub debounce_ms: u64,
    /// Window within which a second press classifies as double (ms)
    pub double_press_ms: u64,
    /// Maximum input silence before motion is forcibly halted (ms)
    pub giveup_ms: u64,
    /// Minimum spacing between outbound height notifications (ms)
    pub publish_interval_ms: u64,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            min_height: 62,
            max_height: 128,
            preset_high: 110,
            preset_low: 80,
            debounce_ms: 50,
            double_press_ms: 500,
            giveup_ms: 2000,
            publish_interval_ms: 2000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits_are_consistent() {
        let cfg = DeskConfig::default();
        assert!(cfg.min_height < cfg.max_height);
        assert!(cfg.preset_low >= cfg.min_height);
        assert!(cfg.preset_high <= cfg.max_height);
        assert!(cfg.preset_low < cfg.preset_high);
    }
}
