//! ByteBatch: the bytes returned by one serial read.
//!
//! A batch is the unit of emission.  Every batch becomes one burst of key
//! events closed by a single `SYN_REPORT`, so the input subsystem commits the
//! whole read at once.

use crate::keymap::KeyCodeMapper;
use crate::protocol::event::KeyEvent;

/// Largest number of bytes one serial read may return.
pub const MAX_BATCH_LEN: usize = 255;

/// A non-empty run of at most [`MAX_BATCH_LEN`] received bytes.
///
/// Empty reads never become a `ByteBatch`; [`ByteBatch::new`] returns `None`
/// for them, which is how "no data yet" is kept away from the emitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteBatch {
    bytes: Vec<u8>,
}

impl ByteBatch {
    /// Wraps the bytes of one read.
    ///
    /// Returns `None` if `bytes` is empty.  Bytes past [`MAX_BATCH_LEN`] are
    /// dropped.
    pub fn new(mut bytes: Vec<u8>) -> Option<Self> {
        if bytes.is_empty() {
            return None;
        }
        bytes.truncate(MAX_BATCH_LEN);
        Some(Self { bytes })
    }

    /// Copies a slice into a batch.  See [`ByteBatch::new`].
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        Self::new(bytes.to_vec())
    }

    /// The received bytes, in arrival order.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of bytes in the batch (always at least 1).
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always `false`; present for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Number of records [`ByteBatch::keystroke_events`] yields: `2N + 1`.
    pub fn event_count(&self) -> usize {
        2 * self.bytes.len() + 1
    }

    /// Expands the batch into the records written to the virtual keyboard.
    ///
    /// Order is press(b0), release(b0), press(b1), release(b1), …, followed by
    /// exactly one `SYN_REPORT`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tty2keyb_core::domain::ByteBatch;
    /// use tty2keyb_core::keymap::KeyCode;
    /// use tty2keyb_core::protocol::KeyEvent;
    ///
    /// let batch = ByteBatch::from_slice(b"5\n").unwrap();
    /// let events: Vec<_> = batch.keystroke_events().collect();
    /// assert_eq!(events, vec![
    ///     KeyEvent::press(KeyCode::Key5),
    ///     KeyEvent::release(KeyCode::Key5),
    ///     KeyEvent::press(KeyCode::Enter),
    ///     KeyEvent::release(KeyCode::Enter),
    ///     KeyEvent::sync_report(),
    /// ]);
    /// ```
    pub fn keystroke_events(&self) -> impl Iterator<Item = KeyEvent> + '_ {
        self.bytes
            .iter()
            .flat_map(|&byte| {
                let key = KeyCodeMapper::map_byte(byte);
                [KeyEvent::press(key), KeyEvent::release(key)]
            })
            .chain(std::iter::once(KeyEvent::sync_report()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
