//! Position decoding from the desk's display wire

pub mod logicdata;

pub use logicdata::{Edge, LogicDecoder, BIT_US, IDLE_GAP_US};
