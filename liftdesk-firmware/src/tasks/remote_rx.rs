//! Remote link receive task
//!
//! Assembles newline-terminated `topic payload` lines from the remote
//! UART and dispatches parsed commands to the controller.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;
use heapless::Vec;

use liftdesk_protocol::{RemoteCommand, TopicKind};

use crate::channels::COMMAND_CHANNEL;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Maximum accepted line length
const LINE_MAX: usize = 96;

/// Remote RX task - receives and parses command lines
#[embassy_executor::task]
pub async fn remote_rx_task(mut rx: BufferedUartRx) {
    info!("Remote RX task started");

    let mut buf = [0u8; RX_BUF_SIZE];
    let mut line: Vec<u8, LINE_MAX> = Vec::new();

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match byte {
                        b'\n' | b'\r' => {
                            if !line.is_empty() {
                                handle_line(&line);
                                line.clear();
                            }
                        }
                        _ => {
                            if line.push(byte).is_err() {
                                warn!("Remote line too long, dropping");
                                line.clear();
                            }
                        }
                    }
                }
            }
            Ok(_) => {
                // No bytes read, continue
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}

/// Parse one complete line and queue the command
fn handle_line(raw: &[u8]) {
    let Ok(text) = core::str::from_utf8(raw) else {
        warn!("Remote line is not valid UTF-8, dropping");
        return;
    };
    let text = text.trim();

    let (topic, payload) = match text.split_once(' ') {
        Some((topic, payload)) => (topic, payload),
        None => (text, ""),
    };

    let Some(kind) = TopicKind::from_str(topic) else {
        warn!("Unknown topic: {}", topic);
        return;
    };

    match RemoteCommand::parse(kind, payload) {
        Some(cmd) => {
            debug!("Remote command: {:?}", cmd);
            // Send to command channel, dropping if full
            if COMMAND_CHANNEL.try_send(cmd).is_err() {
                warn!("Command channel full, dropping command");
            }
        }
        None => {
            warn!("Unrecognized payload on {}: {}", kind.as_str(), payload);
        }
    }
}
