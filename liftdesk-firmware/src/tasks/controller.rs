//! Main controller task
//!
//! Runs the motion state machine on a fixed polling cycle: drains
//! captured display edges through the decoder, samples and debounces
//! the panel buttons, applies queued remote commands, takes one drive
//! decision and pushes the resulting notifications out.

use defmt::*;
use embassy_rp::gpio::{Input, Output};
use embassy_time::{Duration, Instant, Ticker};

use liftdesk_core::config::DeskConfig;
use liftdesk_core::input::ButtonChannel;
use liftdesk_core::motion::{CommandError, MotionController};
use liftdesk_core::publish::HeightPublisher;
use liftdesk_core::traits::{ActuatorDriver, PositionDecoder};
use liftdesk_drivers::actuator::GpioActuator;
use liftdesk_drivers::decoder::LogicDecoder;
use liftdesk_protocol::{ButtonId, Notification};

use crate::channels::{COMMAND_CHANNEL, EDGE_CHANNEL, NOTIFY_CHANNEL};

/// Polling cycle period (ms)
const CYCLE_MS: u64 = 10;

/// Controller task - main coordination loop
#[embassy_executor::task]
pub async fn controller_task(
    cfg: DeskConfig,
    up_pin: Input<'static>,
    down_pin: Input<'static>,
    mut actuator: GpioActuator<Output<'static>>,
) {
    info!("Controller task started");

    let mut controller = MotionController::new(cfg);
    let mut up_button = ButtonChannel::new(ButtonId::Up, cfg.debounce_ms, cfg.double_press_ms);
    let mut down_button = ButtonChannel::new(ButtonId::Down, cfg.debounce_ms, cfg.double_press_ms);
    let mut decoder = LogicDecoder::new();
    let mut publisher = HeightPublisher::new(&cfg);

    let mut ticker = Ticker::every(Duration::from_millis(CYCLE_MS));

    loop {
        let now = Instant::now();
        let now_ms = now.as_millis();
        let now_us = now.as_micros();

        // Feed captured edges through the decoder
        while let Ok(edge) = EDGE_CHANNEL.try_receive() {
            decoder.feed_edge(edge);
        }
        decoder.finish_idle(now_us);
        while let Some(msg) = decoder.poll() {
            if controller.debug_enabled() {
                debug!("Display: {}", msg.describe());
            }
            controller.on_reading(&msg, now_ms);
        }

        // Sample and debounce the panel buttons
        if let Some(event) = up_button.sample(up_pin.is_high(), now_ms) {
            debug!("Button up: {:?}", event);
            controller.on_button(up_button.id(), event, now_ms);
        }
        if let Some(event) = down_button.sample(down_pin.is_high(), now_ms) {
            debug!("Button down: {:?}", event);
            controller.on_button(down_button.id(), event, now_ms);
        }

        // Apply queued remote commands
        while let Ok(cmd) = COMMAND_CHANNEL.try_receive() {
            match controller.apply_command(cmd, now_ms) {
                Ok(()) => {}
                Err(CommandError::HeightOutOfRange { min, max }) => {
                    warn!("Set height refused: allowed {}..={} cm", min, max);
                }
                Err(CommandError::Faulted) => {
                    warn!("Motion command refused while safety-halted, send `cmd reset`");
                }
            }
        }

        // One drive decision per cycle
        let direction = controller.cycle(up_button.is_held(), down_button.is_held(), now_ms);
        if actuator.drive(direction).is_err() {
            // Unreachable on RP2040: GPIO writes are infallible
            error!("Actuator write failed");
        }

        // Push out notifications and the rate-limited height report
        for notification in controller.take_notifications() {
            send_notification(notification);
        }
        if let Some(notification) = publisher.poll(controller.current_height(), now_ms) {
            send_notification(notification);
        }

        ticker.next().await;
    }
}

/// Queue a notification for the remote link, dropping if full
fn send_notification(notification: Notification) {
    if NOTIFY_CHANNEL.try_send(notification).is_err() {
        warn!("Notify channel full, dropping notification");
    }
}
