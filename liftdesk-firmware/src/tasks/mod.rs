//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels.

pub mod controller;
pub mod remote_rx;
pub mod remote_tx;
pub mod sense;

pub use controller::controller_task;
pub use remote_rx::remote_rx_task;
pub use remote_tx::remote_tx_task;
pub use sense::sense_task;
