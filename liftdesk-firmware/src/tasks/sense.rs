//! Display wire capture task
//!
//! Timestamps every edge on the controller-to-display wire and queues
//! it for the decoder. Capture must never block on downstream
//! consumers, so a full channel drops the edge with a warning; the
//! decoder discards the resulting malformed word.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::Instant;

use liftdesk_drivers::decoder::Edge;

use crate::channels::EDGE_CHANNEL;

/// Sense task - captures timed edges from the display wire
#[embassy_executor::task]
pub async fn sense_task(mut pin: Input<'static>) {
    info!("Display sense task started");

    loop {
        pin.wait_for_any_edge().await;
        let edge = Edge {
            level: pin.is_high(),
            t_us: Instant::now().as_micros(),
        };
        if EDGE_CHANNEL.try_send(edge).is_err() {
            warn!("Edge channel full, dropping edge");
        }
    }
}
