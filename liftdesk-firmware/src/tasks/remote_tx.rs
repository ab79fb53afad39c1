//! Remote link transmit task
//!
//! Drains outbound notifications and writes them as `topic payload`
//! lines. Delivery is fire-and-forget; a write error loses that line
//! and nothing else.

use core::fmt::Write as _;

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;
use heapless::String;

use liftdesk_protocol::MAX_PAYLOAD_LEN;

use crate::channels::NOTIFY_CHANNEL;

/// Longest outbound line: topic, space, payload, newline
const LINE_MAX: usize = 8 + 1 + MAX_PAYLOAD_LEN + 1;

/// Remote TX task - publishes notifications on the remote link
#[embassy_executor::task]
pub async fn remote_tx_task(mut tx: BufferedUartTx) {
    info!("Remote TX task started");

    loop {
        let notification = NOTIFY_CHANNEL.receive().await;

        let mut line: String<LINE_MAX> = String::new();
        // Writes cannot fail: every topic and payload fits LINE_MAX
        let _ = write!(
            line,
            "{} {}\n",
            notification.topic().as_str(),
            notification.payload()
        );

        if let Err(e) = tx.write_all(line.as_bytes()).await {
            warn!("UART write error: {:?}", e);
        } else {
            trace!("TX: {}", line.as_str());
        }
    }
}
