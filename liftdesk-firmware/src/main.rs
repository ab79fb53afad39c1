//! Liftdesk - Motorized Standing Desk Controller Firmware
//!
//! Main firmware binary for RP2040-based desk controllers. Fuses panel
//! button input, the decoded height display wire and a line-oriented
//! serial remote link into actuator drive decisions, enforcing
//! height-range and input-timeout safety bounds.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use liftdesk_core::config::DeskConfig;
use liftdesk_drivers::actuator::GpioActuator;

mod channels;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Liftdesk firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Calibrated limits and timing constants
    let cfg = DeskConfig::default();
    info!(
        "Desk config: heights {}..={} cm, presets {}/{}, giveup {} ms",
        cfg.min_height, cfg.max_height, cfg.preset_low, cfg.preset_high, cfg.giveup_ms
    );

    // Setup UART for the remote link (message bus bridge)
    let uart_config = UartConfig::default(); // 115200 baud default

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized for remote link");

    // Panel buttons, pressed = high
    let up_btn = Input::new(p.PIN_2, Pull::Down);
    let down_btn = Input::new(p.PIN_3, Pull::Down);

    // Display wire sense input, idle high
    let sense = Input::new(p.PIN_4, Pull::Up);

    // Actuator drive lines, deasserted at boot
    let drive_up = Output::new(p.PIN_6, Level::Low);
    let drive_down = Output::new(p.PIN_7, Level::Low);
    let actuator = match GpioActuator::new(drive_up, drive_down) {
        Ok(a) => a,
        // RP2040 GPIO writes are infallible
        Err(e) => match e {},
    };

    info!("GPIO initialized");

    // Spawn tasks
    spawner.spawn(tasks::sense_task(sense)).unwrap();
    spawner.spawn(tasks::remote_rx_task(rx)).unwrap();
    spawner.spawn(tasks::remote_tx_task(tx)).unwrap();
    spawner
        .spawn(tasks::controller_task(cfg, up_btn, down_btn, actuator))
        .unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
