//! Linux input key codes (`KEY_*` from `linux/input-event-codes.h`).
//!
//! Only the keys a serial peer can "type" are listed: the digit row and Enter.
//! Reference: https://github.com/torvalds/linux/blob/master/include/uapi/linux/input-event-codes.h
//!
//! # Why not letters? (for beginners)
//!
//! The bridge was built for numeric terminals (barcode readers, scales,
//! counters) that send digits followed by a newline.  Every byte that is not
//! a digit or a newline ends up on [`KeyCode::Key0`]; see
//! [`super::KeyCodeMapper::map_byte`].
//!
//! The numeric value of each variant is the code the kernel expects in the
//! `code` field of a `struct input_event` whose type is `EV_KEY`.

/// A Linux `KEY_*` code that the bridge can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum KeyCode {
    Key1 = 2,  // KEY_1
    Key2 = 3,  // KEY_2
    Key3 = 4,  // KEY_3
    Key4 = 5,  // KEY_4
    Key5 = 6,  // KEY_5
    Key6 = 7,  // KEY_6
    Key7 = 8,  // KEY_7
    Key8 = 9,  // KEY_8
    Key9 = 10, // KEY_9
    Key0 = 11, // KEY_0
    Enter = 28, // KEY_ENTER
}

impl KeyCode {
    /// Returns the raw kernel code.
    pub const fn raw(self) -> u16 {
        self as u16
    }
}

impl From<KeyCode> for u16 {
    fn from(key: KeyCode) -> u16 {
        key.raw()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
