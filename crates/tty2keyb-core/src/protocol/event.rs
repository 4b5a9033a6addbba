//! The event records written to a Linux virtual input device.
//!
//! The kernel input subsystem consumes a stream of `struct input_event`
//! records.  Two kinds matter here:
//!
//! | Kind      | `type`     | `code`          | `value`                 |
//! |-----------|------------|-----------------|-------------------------|
//! | Key       | `EV_KEY=1` | `KEY_*`         | 1 = press, 0 = release  |
//! | Sync      | `EV_SYN=0` | `SYN_REPORT=0`  | 0                       |
//!
//! A sync event tells consumers to commit everything written since the
//! previous sync, so every burst of key events must end with one.

use crate::keymap::KeyCode;

/// `EV_SYN` event type.
pub const EV_SYN: u16 = 0x00;
/// `EV_KEY` event type.
pub const EV_KEY: u16 = 0x01;
/// `SYN_REPORT` code carried by the terminating sync event.
pub const SYN_REPORT: u16 = 0;

/// Event type field of an input record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum EventKind {
    Sync = EV_SYN,
    Key = EV_KEY,
}

impl TryFrom<u16> for EventKind {
    type Error = u16;

    fn try_from(raw: u16) -> Result<Self, Self::Error> {
        match raw {
            EV_SYN => Ok(EventKind::Sync),
            EV_KEY => Ok(EventKind::Key),
            other => Err(other),
        }
    }
}

/// Value field of a key record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum KeyValue {
    Release = 0,
    Press = 1,
}

/// One input record: `{kind, code, value}`.
///
/// Construct records with [`KeyEvent::press`], [`KeyEvent::release`] and
/// [`KeyEvent::sync_report`]; the byte layout lives in
/// [`crate::protocol::codec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub kind: EventKind,
    pub code: u16,
    pub value: i32,
}

impl KeyEvent {
    /// A key-down record for `key`.
    pub fn press(key: KeyCode) -> Self {
        Self {
            kind: EventKind::Key,
            code: key.into(),
            value: KeyValue::Press as i32,
        }
    }

    /// A key-up record for `key`.
    pub fn release(key: KeyCode) -> Self {
        Self {
            kind: EventKind::Key,
            code: key.into(),
            value: KeyValue::Release as i32,
        }
    }

    /// The `SYN_REPORT` record that commits the preceding key records.
    pub fn sync_report() -> Self {
        Self {
            kind: EventKind::Sync,
            code: SYN_REPORT,
            value: 0,
        }
    }

    /// Returns `true` for a `SYN_REPORT` record.
    pub fn is_sync(&self) -> bool {
        self.kind == EventKind::Sync
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
