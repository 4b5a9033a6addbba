//! Input event records and their binary codec.

pub mod codec;
pub mod event;

pub use codec::{decode_event, decode_stream, encode_event, ProtocolError, EVENT_RECORD_SIZE};
pub use event::*;
