//! Human-readable rendering of a received batch for the log.
//!
//! Each byte becomes one character so the rendering lines up with the keys
//! that were typed:
//!
//! | Byte                 | Shown as |
//! |----------------------|----------|
//! | `'0'..='9'`          | itself   |
//! | newline              | `;`      |
//! | other control (< 32) | `.`      |
//! | anything else        | `*`      |

/// Renders `bytes` as `<...>` using the table above.
///
/// ```rust
/// use tty2keyb_core::domain::echo::render_batch;
///
/// assert_eq!(render_batch(b"12\n"), "<12;>");
/// assert_eq!(render_batch(b"a\t7"), "<*.7>");
/// ```
pub fn render_batch(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() + 2);
    out.push('<');
    out.extend(bytes.iter().map(|&b| render_byte(b)));
    out.push('>');
    out
}

fn render_byte(byte: u8) -> char {
    match byte {
        b'0'..=b'9' => byte as char,
        b'\n' => ';',
        0..=0x1F => '.',
        _ => '*',
    }
}
