//! Motion control state machine
//!
//! Owns all motion state. The asserted drive direction changes only
//! through the single drive-decision point ([`MotionController::move_table`] /
//! [`MotionController::stop_table`]), so state-change notifications are
//! never duplicated.
//!
//! A safety-halt is an explicit, observable state rather than a
//! busy-wait: the actuator is de-energized on entry, a fault
//! notification goes out, and an explicit `reset` command recovers.

use heapless::Vec;

use liftdesk_protocol::{ButtonId, Direction, Notification, PressKind, RemoteCommand};

use crate::config::DeskConfig;
use crate::height::HeightState;
use crate::input::ButtonEvent;
use crate::safety::SignalWatchdog;
use crate::traits::DisplayMessage;

/// Pending notifications buffered between cycles
const PENDING_CAPACITY: usize = 8;

/// Motion controller operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// No motion requested
    #[default]
    Idle,
    /// Driving while a panel button is held
    ManualHold(Direction),
    /// Driving toward an outstanding target height
    SeekTarget(Direction),
    /// Input-silence fault; motion refused until explicitly cleared
    SafetyHalt,
}

/// Rejection reasons for remote commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Requested height outside the calibrated limits
    HeightOutOfRange { min: u8, max: u8 },
    /// Motion commands are refused while safety-halted
    Faulted,
}

/// The motion control state machine
#[derive(Debug)]
pub struct MotionController {
    cfg: DeskConfig,
    height: HeightState,
    mode: Mode,
    /// Drive direction currently asserted on the actuator
    asserted: Direction,
    /// A remote or preset target is outstanding
    set_height_active: bool,
    watchdog: SignalWatchdog,
    debug: bool,
    pending: Vec<Notification, PENDING_CAPACITY>,
}

impl MotionController {
    /// Create a controller in the idle, stopped state
    pub fn new(cfg: DeskConfig) -> Self {
        Self {
            height: HeightState::new(&cfg),
            mode: Mode::Idle,
            asserted: Direction::Stopped,
            set_height_active: false,
            watchdog: SignalWatchdog::new(cfg.giveup_ms),
            debug: false,
            pending: Vec::new(),
            cfg,
        }
    }

    /// Current operating mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Drive direction currently asserted
    pub fn direction(&self) -> Direction {
        self.asserted
    }

    /// Last decoded height, if known
    pub fn current_height(&self) -> Option<u8> {
        self.height.current()
    }

    /// Outstanding target height
    pub fn target_height(&self) -> u8 {
        self.height.target()
    }

    /// Whether a target-seek is outstanding
    pub fn seek_active(&self) -> bool {
        self.set_height_active
    }

    /// Verbosity flag toggled by the debug command
    pub fn debug_enabled(&self) -> bool {
        self.debug
    }

    /// Drain the notifications queued since the last call
    pub fn take_notifications(&mut self) -> Vec<Notification, PENDING_CAPACITY> {
        core::mem::take(&mut self.pending)
    }

    /// Feed one decoded display message
    ///
    /// A height readout equal to the current height is inert: it does
    /// not refresh the watchdog, so a frozen display under drive still
    /// trips the giveup window. Any other message counts as live input.
    pub fn on_reading(&mut self, msg: &DisplayMessage, now_ms: u64) {
        if let Some(h) = msg.height() {
            if self.height.current() == Some(h) {
                return;
            }
            self.height.set_current(h);
        }
        self.watchdog.feed(now_ms);
    }

    /// Feed one debounced button event
    ///
    /// Presses are reported on the button topic. A single press breaks
    /// an outstanding target-seek; a double press latches the target to
    /// that button's preset. While safety-halted the press is still
    /// reported but has no motion effect.
    pub fn on_button(&mut self, id: ButtonId, event: ButtonEvent, now_ms: u64) {
        self.watchdog.feed(now_ms);

        let ButtonEvent::Pressed(kind) = event else {
            return;
        };
        let _ = self.pending.push(Notification::ButtonPressed { id, kind });

        if self.mode == Mode::SafetyHalt {
            return;
        }
        match kind {
            PressKind::Single => {
                if self.set_height_active {
                    #[cfg(feature = "defmt")]
                    defmt::debug!("single press breaks target seek");
                    self.set_height_active = false;
                }
            }
            PressKind::Double => {
                let target = match id {
                    ButtonId::Up => self.cfg.preset_high,
                    ButtonId::Down => self.cfg.preset_low,
                };
                self.height.set_target(target);
                self.set_height_active = true;
            }
        }
    }

    /// Apply a remote command
    ///
    /// Invalid or refused commands leave all state untouched; the
    /// caller emits the diagnostic.
    pub fn apply_command(&mut self, cmd: RemoteCommand, now_ms: u64) -> Result<(), CommandError> {
        if cmd.is_motion_command() && self.mode == Mode::SafetyHalt {
            return Err(CommandError::Faulted);
        }
        match cmd {
            RemoteCommand::SetHeight(h) => {
                if !self.height.in_range(h) {
                    return Err(CommandError::HeightOutOfRange {
                        min: self.height.min(),
                        max: self.height.max(),
                    });
                }
                self.height.set_target(h);
                self.set_height_active = true;
                self.watchdog.feed(now_ms);
            }
            RemoteCommand::MoveToHigh => {
                self.height.set_target(self.cfg.preset_high);
                self.set_height_active = true;
                self.watchdog.feed(now_ms);
            }
            RemoteCommand::MoveToLow => {
                self.height.set_target(self.cfg.preset_low);
                self.set_height_active = true;
                self.watchdog.feed(now_ms);
            }
            RemoteCommand::Stop => {
                self.stop_table();
                if self.mode != Mode::SafetyHalt {
                    self.mode = Mode::Idle;
                }
            }
            RemoteCommand::Ping => {
                let _ = self.pending.push(Notification::Pong);
            }
            RemoteCommand::ToggleDebug => {
                self.debug = !self.debug;
            }
            RemoteCommand::ClearFault => {
                if self.mode == Mode::SafetyHalt {
                    #[cfg(feature = "defmt")]
                    defmt::info!("safety halt cleared by remote");
                    self.mode = Mode::Idle;
                    self.watchdog.feed(now_ms);
                }
            }
        }
        Ok(())
    }

    /// One motion decision, called once per polling cycle
    ///
    /// Inputs are the stable (debounced) hold states of both buttons.
    /// Returns the drive direction to assert on the actuator.
    pub fn cycle(&mut self, up_held: bool, down_held: bool, now_ms: u64) -> Direction {
        if self.mode == Mode::SafetyHalt {
            self.stop_table();
            return self.asserted;
        }

        if up_held && down_held {
            // Opposing press is inert: no drive, no distinguishing
            // notification beyond the stop itself.
            #[cfg(feature = "defmt")]
            defmt::warn!("both buttons held, refusing to drive");
            self.stop_table();
            self.mode = Mode::Idle;
            return self.asserted;
        }

        if up_held || down_held {
            let dir = if up_held { Direction::Up } else { Direction::Down };
            self.mode = Mode::ManualHold(dir);
            self.move_table(dir);
            return self.asserted;
        }

        if self.set_height_active {
            if self.watchdog.expired(now_ms) {
                #[cfg(feature = "defmt")]
                defmt::warn!("no input for {} ms during seek, halting", self.cfg.giveup_ms);
                self.stop_table();
                self.mode = Mode::SafetyHalt;
                let _ = self.pending.push(Notification::Fault);
                return self.asserted;
            }

            match self.height.current() {
                Some(c) if c == self.height.target() => {
                    #[cfg(feature = "defmt")]
                    defmt::info!("hit target height {}", c);
                    self.stop_table();
                    self.mode = Mode::Idle;
                }
                current => {
                    // Height unknown at startup drives up, matching the
                    // desk's behavior before the first readout.
                    let dir = match current {
                        Some(c) if c > self.height.target() => Direction::Down,
                        _ => Direction::Up,
                    };
                    self.mode = Mode::SeekTarget(dir);
                    self.move_table(dir);
                }
            }
            return self.asserted;
        }

        self.mode = Mode::Idle;
        self.stop_table();
        self.asserted
    }

    /// The single drive-assertion point
    ///
    /// Drives `dir` if the current height permits it (or is still
    /// unknown); otherwise forces a stop. Emits one state notification
    /// per direction change.
    fn move_table(&mut self, dir: Direction) {
        let drivable = match self.height.current() {
            None => true,
            Some(c) => self.height.is_valid(c, dir),
        };
        if !drivable {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "height {} outside limits for {}, forcing stop",
                self.height.current().unwrap_or(0),
                dir.as_str()
            );
            self.stop_table();
            self.mode = Mode::Idle;
            return;
        }
        if self.asserted != dir {
            self.asserted = dir;
            let _ = self.pending.push(Notification::StateChanged(dir));
        }
    }

    /// Deassert both drive lines and drop the outstanding target
    ///
    /// Idempotent: repeated calls while already stopped perform no
    /// further notification or target writes.
    fn stop_table(&mut self) {
        if let Some(c) = self.height.current() {
            self.height.set_target(c);
        }
        self.set_height_active = false;
        if self.asserted != Direction::Stopped {
            self.asserted = Direction::Stopped;
            let _ = self.pending.push(Notification::StateChanged(Direction::Stopped));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: u64 = 10_000;

    fn controller() -> MotionController {
        MotionController::new(DeskConfig::default())
    }

    /// Controller with a known in-range height and a fresh watchdog
    fn sensed(height: u8) -> MotionController {
        let mut c = controller();
        c.on_reading(&DisplayMessage::Height(height), NOW);
        c
    }

    fn state_changes(c: &mut MotionController) -> heapless::Vec<Direction, 8> {
        c.take_notifications()
            .iter()
            .filter_map(|n| match n {
                Notification::StateChanged(d) => Some(*d),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_idle_without_input() {
        let mut c = sensed(90);
        assert_eq!(c.cycle(false, false, NOW), Direction::Stopped);
        assert_eq!(c.mode(), Mode::Idle);
        assert!(state_changes(&mut c).is_empty());
    }

    #[test]
    fn test_manual_hold_drives_and_notifies_once() {
        let mut c = sensed(90);
        assert_eq!(c.cycle(true, false, NOW), Direction::Up);
        assert_eq!(c.mode(), Mode::ManualHold(Direction::Up));
        assert_eq!(state_changes(&mut c).as_slice(), &[Direction::Up]);

        // holding further cycles emits nothing new
        assert_eq!(c.cycle(true, false, NOW + 10), Direction::Up);
        assert!(state_changes(&mut c).is_empty());
    }

    #[test]
    fn test_release_emits_one_stop() {
        let mut c = sensed(90);
        c.cycle(true, false, NOW);
        c.take_notifications();

        assert_eq!(c.cycle(false, false, NOW + 20), Direction::Stopped);
        assert_eq!(state_changes(&mut c).as_slice(), &[Direction::Stopped]);

        // stopTable is idempotent: a second idle cycle emits nothing
        c.cycle(false, false, NOW + 30);
        assert!(state_changes(&mut c).is_empty());
    }

    #[test]
    fn test_both_buttons_inert() {
        let mut c = sensed(90);
        assert_eq!(c.cycle(true, true, NOW), Direction::Stopped);
        assert_eq!(c.mode(), Mode::Idle);
    }

    #[test]
    fn test_both_buttons_stop_active_drive() {
        let mut c = sensed(90);
        c.cycle(true, false, NOW);
        assert_eq!(c.cycle(true, true, NOW + 10), Direction::Stopped);
    }

    #[test]
    fn test_seek_up_until_target() {
        let mut c = sensed(100);
        c.apply_command(RemoteCommand::SetHeight(125), NOW).unwrap();

        // drives up every cycle while below target
        for (i, h) in (101..125).enumerate() {
            let t = NOW + (i as u64 + 1) * 100;
            assert_eq!(c.cycle(false, false, t), Direction::Up);
            assert_eq!(c.mode(), Mode::SeekTarget(Direction::Up));
            c.on_reading(&DisplayMessage::Height(h), t);
        }

        // target reached: stop once and return to idle
        c.on_reading(&DisplayMessage::Height(125), NOW + 3000);
        c.take_notifications();
        assert_eq!(c.cycle(false, false, NOW + 3000), Direction::Stopped);
        assert_eq!(c.mode(), Mode::Idle);
        assert!(!c.seek_active());
        assert_eq!(state_changes(&mut c).as_slice(), &[Direction::Stopped]);

        // no repeated stop on the next cycle
        c.cycle(false, false, NOW + 3100);
        assert!(state_changes(&mut c).is_empty());
    }

    #[test]
    fn test_seek_down_when_above_target() {
        let mut c = sensed(110);
        c.apply_command(RemoteCommand::SetHeight(80), NOW).unwrap();
        assert_eq!(c.cycle(false, false, NOW), Direction::Down);
    }

    #[test]
    fn test_unknown_height_drives_up_toward_target() {
        let mut c = controller();
        c.apply_command(RemoteCommand::SetHeight(100), NOW).unwrap();
        assert_eq!(c.cycle(false, false, NOW), Direction::Up);
    }

    #[test]
    fn test_out_of_range_reading_halts_runaway_drive() {
        let mut c = sensed(127);
        assert_eq!(c.cycle(true, false, NOW), Direction::Up);
        c.take_notifications();

        // sensor reports past the maximum while the up button is held
        c.on_reading(&DisplayMessage::Height(129), NOW + 100);
        assert_eq!(c.cycle(true, false, NOW + 100), Direction::Stopped);
        assert_eq!(c.mode(), Mode::Idle);
        assert_eq!(state_changes(&mut c).as_slice(), &[Direction::Stopped]);
    }

    #[test]
    fn test_seek_self_corrects_past_target() {
        // overshoot past max: the next cycle seeks back down, which the
        // validator permits as recovery toward range
        let mut c = sensed(127);
        c.apply_command(RemoteCommand::SetHeight(128), NOW).unwrap();
        assert_eq!(c.cycle(false, false, NOW), Direction::Up);
        c.on_reading(&DisplayMessage::Height(129), NOW + 100);
        assert_eq!(c.cycle(false, false, NOW + 100), Direction::Down);
    }

    #[test]
    fn test_over_range_manual_recovery_allowed() {
        let mut c = sensed(130);
        // driving down recovers toward range
        assert_eq!(c.cycle(false, true, NOW), Direction::Down);
        // driving up would leave range further: forced stop
        assert_eq!(c.cycle(true, false, NOW + 10), Direction::Stopped);
    }

    #[test]
    fn test_set_height_out_of_range_rejected() {
        let mut c = sensed(90);
        assert_eq!(
            c.apply_command(RemoteCommand::SetHeight(140), NOW),
            Err(CommandError::HeightOutOfRange { min: 62, max: 128 })
        );
        assert!(!c.seek_active());
        assert_eq!(c.cycle(false, false, NOW), Direction::Stopped);
    }

    #[test]
    fn test_presets_via_commands() {
        let mut c = sensed(90);
        c.apply_command(RemoteCommand::MoveToHigh, NOW).unwrap();
        assert_eq!(c.target_height(), 110);
        assert_eq!(c.cycle(false, false, NOW), Direction::Up);

        c.apply_command(RemoteCommand::MoveToLow, NOW + 10).unwrap();
        assert_eq!(c.target_height(), 80);
        assert_eq!(c.cycle(false, false, NOW + 10), Direction::Down);
    }

    #[test]
    fn test_stop_command_drops_target() {
        let mut c = sensed(90);
        c.apply_command(RemoteCommand::SetHeight(110), NOW).unwrap();
        c.cycle(false, false, NOW);
        c.apply_command(RemoteCommand::Stop, NOW + 50).unwrap();
        assert!(!c.seek_active());
        // target snapped to current height
        assert_eq!(c.target_height(), 90);
        assert_eq!(c.cycle(false, false, NOW + 50), Direction::Stopped);
    }

    #[test]
    fn test_ping_answers_pong_without_motion() {
        let mut c = sensed(90);
        c.apply_command(RemoteCommand::Ping, NOW).unwrap();
        let notes = c.take_notifications();
        assert!(notes.contains(&Notification::Pong));
        assert_eq!(c.cycle(false, false, NOW), Direction::Stopped);
    }

    #[test]
    fn test_debug_toggles() {
        let mut c = controller();
        assert!(!c.debug_enabled());
        c.apply_command(RemoteCommand::ToggleDebug, NOW).unwrap();
        assert!(c.debug_enabled());
        c.apply_command(RemoteCommand::ToggleDebug, NOW).unwrap();
        assert!(!c.debug_enabled());
    }

    #[test]
    fn test_double_press_latches_preset() {
        let mut c = sensed(90);
        c.on_button(ButtonId::Up, ButtonEvent::Pressed(PressKind::Double), NOW);
        assert!(c.seek_active());
        assert_eq!(c.target_height(), 110);
        assert_eq!(c.cycle(false, false, NOW), Direction::Up);

        let notes = c.take_notifications();
        assert!(notes.contains(&Notification::ButtonPressed {
            id: ButtonId::Up,
            kind: PressKind::Double,
        }));
    }

    #[test]
    fn test_single_press_breaks_seek() {
        let mut c = sensed(90);
        c.apply_command(RemoteCommand::SetHeight(110), NOW).unwrap();
        c.cycle(false, false, NOW);

        c.on_button(ButtonId::Down, ButtonEvent::Pressed(PressKind::Single), NOW + 100);
        assert!(!c.seek_active());
    }

    #[test]
    fn test_silence_during_seek_enters_safety_halt() {
        let mut c = sensed(90);
        c.apply_command(RemoteCommand::SetHeight(110), NOW).unwrap();
        assert_eq!(c.cycle(false, false, NOW), Direction::Up);
        c.take_notifications();

        // no button or sensor input past the giveup window
        let late = NOW + 2001;
        assert_eq!(c.cycle(false, false, late), Direction::Stopped);
        assert_eq!(c.mode(), Mode::SafetyHalt);

        let notes = c.take_notifications();
        assert!(notes.contains(&Notification::Fault));
        assert!(notes.contains(&Notification::StateChanged(Direction::Stopped)));
    }

    #[test]
    fn test_safety_halt_refuses_motion_but_answers_ping() {
        let mut c = sensed(90);
        c.apply_command(RemoteCommand::SetHeight(110), NOW).unwrap();
        c.cycle(false, false, NOW);
        c.cycle(false, false, NOW + 2001);
        assert_eq!(c.mode(), Mode::SafetyHalt);

        assert_eq!(
            c.apply_command(RemoteCommand::SetHeight(100), NOW + 2100),
            Err(CommandError::Faulted)
        );
        assert!(c.apply_command(RemoteCommand::Ping, NOW + 2100).is_ok());

        // buttons are inert while halted
        c.on_button(ButtonId::Up, ButtonEvent::Pressed(PressKind::Double), NOW + 2200);
        assert_eq!(c.cycle(true, false, NOW + 2200), Direction::Stopped);
        assert_eq!(c.mode(), Mode::SafetyHalt);
    }

    #[test]
    fn test_clear_fault_recovers() {
        let mut c = sensed(90);
        c.apply_command(RemoteCommand::SetHeight(110), NOW).unwrap();
        c.cycle(false, false, NOW);
        c.cycle(false, false, NOW + 2001);
        assert_eq!(c.mode(), Mode::SafetyHalt);

        c.apply_command(RemoteCommand::ClearFault, NOW + 3000).unwrap();
        assert_eq!(c.mode(), Mode::Idle);

        // desk is operable again
        assert_eq!(c.cycle(true, false, NOW + 3010), Direction::Up);
    }

    #[test]
    fn test_sensor_activity_feeds_watchdog_during_seek() {
        let mut c = sensed(90);
        c.apply_command(RemoteCommand::SetHeight(110), NOW).unwrap();

        // height changes keep arriving; seek must not trip the halt
        let mut t = NOW;
        for h in 91..=95 {
            t += 1500;
            c.on_reading(&DisplayMessage::Height(h), t);
            assert_eq!(c.cycle(false, false, t), Direction::Up);
        }
        assert_eq!(c.mode(), Mode::SeekTarget(Direction::Up));
    }

    #[test]
    fn test_repeated_identical_reading_does_not_feed_watchdog() {
        let mut c = sensed(90);
        c.apply_command(RemoteCommand::SetHeight(110), NOW).unwrap();
        c.cycle(false, false, NOW);

        // display repeats the same number: desk is stuck, halt anyway
        c.on_reading(&DisplayMessage::Height(90), NOW + 1000);
        c.on_reading(&DisplayMessage::Height(90), NOW + 2000);
        assert_eq!(c.cycle(false, false, NOW + 2001), Direction::Stopped);
        assert_eq!(c.mode(), Mode::SafetyHalt);
    }

    #[test]
    fn test_manual_hold_outlasts_giveup_window() {
        // a held button is user presence; no timeout applies
        let mut c = sensed(90);
        c.cycle(true, false, NOW);
        assert_eq!(c.cycle(true, false, NOW + 10_000), Direction::Up);
        assert_eq!(c.mode(), Mode::ManualHold(Direction::Up));
    }
}
