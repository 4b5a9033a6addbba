//! EmitKeystrokesUseCase: types one serial batch on the virtual keyboard.
//!
//! This use case sits at the application layer and delegates to a
//! [`VirtualKeyboard`] trait object for the device writes.  The real device
//! and the in-memory recorder live in the infrastructure layer.

use std::sync::Arc;

use tracing::debug;
use tty2keyb_core::{ByteBatch, KeyEvent};

use crate::application::error::BridgeError;

/// One open handle on the virtual keyboard.
///
/// A session lives for exactly one batch.  Dropping it closes the device.
pub trait EventSession {
    /// Writes one record to the device.
    fn write_event(&mut self, event: &KeyEvent) -> Result<(), BridgeError>;
}

/// A device that accepts key records.
pub trait VirtualKeyboard: Send + Sync {
    /// Opens the device for one batch.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::DeviceOpen`] if the device cannot be opened.
    fn open_session(&self) -> Result<Box<dyn EventSession + '_>, BridgeError>;
}

/// The Emit Keystrokes use case.
///
/// Turns a [`ByteBatch`] into press/release pairs followed by one
/// `SYN_REPORT`, written in order through a fresh [`EventSession`].
pub struct EmitKeystrokesUseCase {
    keyboard: Arc<dyn VirtualKeyboard>,
}

impl EmitKeystrokesUseCase {
    /// Creates a new use case writing to `keyboard`.
    pub fn new(keyboard: Arc<dyn VirtualKeyboard>) -> Self {
        Self { keyboard }
    }

    /// Types `batch`: opens the device, writes press(b), release(b) for every
    /// byte in order, writes `SYN_REPORT`, and closes the device.
    ///
    /// Returns the number of records written.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError`] if the device cannot be opened or a write
    /// fails.  Records already written stay written; nothing is retried.
    pub fn emit_batch(&self, batch: &ByteBatch) -> Result<usize, BridgeError> {
        let mut session = self.keyboard.open_session()?;
        let mut written = 0;
        for event in batch.keystroke_events() {
            session.write_event(&event)?;
            written += 1;
        }
        drop(session);

        debug!(bytes = batch.len(), events = written, "batch committed");
        Ok(written)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
