//! Binary codec for Linux `struct input_event` records.
//!
//! Wire format (host ABI, native byte order):
//! ```text
//! [time: struct timeval][type:2][code:2][value:4]
//! ```
//! On 64-bit Linux `struct timeval` is 16 bytes, giving 24-byte records; on
//! 32-bit targets it is 8 bytes, giving 16-byte records.  The timestamp is
//! written as zero; the kernel stamps events it receives through uinput/evdev.

use std::mem::size_of;

use thiserror::Error;

use crate::protocol::event::{EventKind, KeyEvent};

/// Size of the `struct timeval` prefix on this host.
pub const TIMEVAL_SIZE: usize = size_of::<libc::timeval>();

/// Size of one encoded record on this host.
pub const EVENT_RECORD_SIZE: usize = TIMEVAL_SIZE + 2 + 2 + 4;

/// Errors that can occur while decoding input records.
#[derive(Debug, Error, PartialEq)]
pub enum ProtocolError {
    /// The byte slice is shorter than one record.
    #[error("insufficient data: need at least {needed} bytes, got {available}")]
    InsufficientData { needed: usize, available: usize },

    /// The `type` field is neither `EV_KEY` nor `EV_SYN`.
    #[error("unknown event type: 0x{0:04X}")]
    UnknownEventType(u16),
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Encodes one [`KeyEvent`] as a host `struct input_event`.
///
/// # Examples
///
/// ```rust
/// use tty2keyb_core::keymap::KeyCode;
/// use tty2keyb_core::protocol::{decode_event, encode_event, KeyEvent, EVENT_RECORD_SIZE};
///
/// let ev = KeyEvent::press(KeyCode::Enter);
/// let bytes = encode_event(&ev);
/// assert_eq!(bytes.len(), EVENT_RECORD_SIZE);
/// assert_eq!(decode_event(&bytes).unwrap(), (ev, EVENT_RECORD_SIZE));
/// ```
pub fn encode_event(event: &KeyEvent) -> Vec<u8> {
    let mut buf = Vec::with_capacity(EVENT_RECORD_SIZE);
    encode_event_into(&mut buf, event);
    buf
}

/// Appends one encoded record to `buf`.
pub fn encode_event_into(buf: &mut Vec<u8>, event: &KeyEvent) {
    buf.resize(buf.len() + TIMEVAL_SIZE, 0x00); // time, stamped by the kernel
    buf.extend_from_slice(&(event.kind as u16).to_ne_bytes());
    buf.extend_from_slice(&event.code.to_ne_bytes());
    buf.extend_from_slice(&event.value.to_ne_bytes());
}

/// Decodes one record from the beginning of `bytes`.
///
/// Returns the event and the number of bytes consumed, so callers can walk a
/// stream of concatenated records.  The timestamp is ignored.
///
/// # Errors
///
/// Returns [`ProtocolError`] if fewer than [`EVENT_RECORD_SIZE`] bytes are
/// available or the event type is not one this bridge writes.
pub fn decode_event(bytes: &[u8]) -> Result<(KeyEvent, usize), ProtocolError> {
    if bytes.len() < EVENT_RECORD_SIZE {
        return Err(ProtocolError::InsufficientData {
            needed: EVENT_RECORD_SIZE,
            available: bytes.len(),
        });
    }

    let body = &bytes[TIMEVAL_SIZE..EVENT_RECORD_SIZE];
    let raw_type = u16::from_ne_bytes([body[0], body[1]]);
    let kind = EventKind::try_from(raw_type).map_err(ProtocolError::UnknownEventType)?;
    let code = u16::from_ne_bytes([body[2], body[3]]);
    let value = i32::from_ne_bytes([body[4], body[5], body[6], body[7]]);

    Ok((KeyEvent { kind, code, value }, EVENT_RECORD_SIZE))
}

/// Decodes a buffer of back-to-back records.
///
/// # Errors
///
/// Returns [`ProtocolError`] on the first malformed or truncated record.
pub fn decode_stream(mut bytes: &[u8]) -> Result<Vec<KeyEvent>, ProtocolError> {
    let mut events = Vec::with_capacity(bytes.len() / EVENT_RECORD_SIZE);
    while !bytes.is_empty() {
        let (event, consumed) = decode_event(bytes)?;
        events.push(event);
        bytes = &bytes[consumed..];
    }
    Ok(events)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
