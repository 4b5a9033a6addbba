//! Byte to key code translation.
//!
//! The serial peer sends raw bytes; the virtual keyboard understands Linux
//! `KEY_*` codes.  [`KeyCodeMapper`] is the single place where one becomes the
//! other.

pub mod linux_evdev;

pub use linux_evdev::KeyCode;

/// Byte value of the line terminator that becomes an Enter keystroke.
pub const NEWLINE: u8 = b'\n';

/// Translates received serial bytes to key codes.
///
/// The mapping is total and pure: every byte maps to exactly one key and the
/// same byte always maps to the same key.
pub struct KeyCodeMapper;

impl KeyCodeMapper {
    /// Maps one received byte to the key it types.
    ///
    /// Rules, first match wins:
    ///
    /// 1. `'1'..='9'` → [`KeyCode::Key1`]..=[`KeyCode::Key9`]
    /// 2. `b'\n'` → [`KeyCode::Enter`]
    /// 3. anything else, `'0'` included → [`KeyCode::Key0`]
    ///
    /// Rule 3 also catches letters and control bytes.  Peers that send
    /// anything other than digits and newlines will see zeros typed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tty2keyb_core::keymap::{KeyCode, KeyCodeMapper};
    ///
    /// assert_eq!(KeyCodeMapper::map_byte(b'5'), KeyCode::Key5);
    /// assert_eq!(KeyCodeMapper::map_byte(b'\n'), KeyCode::Enter);
    /// assert_eq!(KeyCodeMapper::map_byte(b'x'), KeyCode::Key0);
    /// ```
    pub fn map_byte(byte: u8) -> KeyCode {
        match byte {
            b'1' => KeyCode::Key1,
            b'2' => KeyCode::Key2,
            b'3' => KeyCode::Key3,
            b'4' => KeyCode::Key4,
            b'5' => KeyCode::Key5,
            b'6' => KeyCode::Key6,
            b'7' => KeyCode::Key7,
            b'8' => KeyCode::Key8,
            b'9' => KeyCode::Key9,
            NEWLINE => KeyCode::Enter,
            _ => KeyCode::Key0,
        }
    }

    /// Maps one received byte to its raw kernel key code.
    ///
    /// Digits follow `code = byte - b'0' + 1`, newline is 28, everything else 11.
    pub fn map(byte: u8) -> u16 {
        Self::map_byte(byte).into()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_one_to_nine_use_linear_offset() {
        for byte in b'1'..=b'9' {
            assert_eq!(KeyCodeMapper::map(byte), u16::from(byte - b'0' + 1));
        }
    }

    #[test]
    fn test_first_and_last_digit_boundaries() {
        assert_eq!(KeyCodeMapper::map(b'1'), 2);
        assert_eq!(KeyCodeMapper::map(b'9'), 10);
    }

    #[test]
    fn test_newline_maps_to_enter() {
        assert_eq!(KeyCodeMapper::map(b'\n'), 28);
        assert_eq!(KeyCodeMapper::map_byte(10), KeyCode::Enter);
    }

    #[test]
    fn test_zero_digit_maps_to_key0() {
        assert_eq!(KeyCodeMapper::map(b'0'), 11);
    }

    #[test]
    fn test_every_other_byte_falls_back_to_key0() {
        for byte in 0..=u8::MAX {
            if (b'1'..=b'9').contains(&byte) || byte == b'\n' {
                continue;
            }
            assert_eq!(KeyCodeMapper::map_byte(byte), KeyCode::Key0, "byte 0x{byte:02X}");
        }
    }

    #[test]
    fn test_carriage_return_and_letters_are_not_special() {
        // The serial channel strips CR, but a stray one must not become Enter.
        assert_eq!(KeyCodeMapper::map_byte(b'\r'), KeyCode::Key0);
        assert_eq!(KeyCodeMapper::map_byte(b'A'), KeyCode::Key0);
        assert_eq!(KeyCodeMapper::map_byte(b' '), KeyCode::Key0);
    }

    #[test]
    fn test_mapping_is_repeatable() {
        for byte in 0..=u8::MAX {
            assert_eq!(KeyCodeMapper::map(byte), KeyCodeMapper::map(byte));
        }
    }
}
