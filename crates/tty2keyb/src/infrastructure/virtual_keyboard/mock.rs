//! In-memory virtual keyboard for tests.
//!
//! `RecordingKeyboard` stands in for an event device: every session collects
//! the records written to it and hands them to the keyboard when it is
//! dropped, so tests can assert both *what* was written and that every
//! session was closed.
//!
//! # Failure injection
//!
//! - `fail_open = true` makes every `open_session` return
//!   [`BridgeError::DeviceOpen`].
//! - `fail_after_writes = Some(n)` lets each session accept `n` records and
//!   fail the next write with [`BridgeError::Io`].

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use tty2keyb_core::KeyEvent;

use crate::application::emit_keystrokes::{EventSession, VirtualKeyboard};
use crate::application::error::BridgeError;

/// A keyboard that records every closed session's records.
#[derive(Default)]
pub struct RecordingKeyboard {
    /// Records of each closed session, in close order.
    pub closed_sessions: Mutex<Vec<Vec<KeyEvent>>>,
    /// Number of sessions opened so far.
    pub opened: AtomicUsize,
    /// When `true`, opening always fails.
    pub fail_open: bool,
    /// When set, each session fails the write after this many records.
    pub fail_after_writes: Option<usize>,
}

impl RecordingKeyboard {
    /// Creates a keyboard that accepts everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of every closed session's records.
    pub fn sessions(&self) -> Vec<Vec<KeyEvent>> {
        self.closed_sessions.lock().unwrap().clone()
    }

    /// Number of sessions opened so far.
    pub fn opened_count(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    /// Number of sessions closed so far.
    pub fn closed_count(&self) -> usize {
        self.closed_sessions.lock().unwrap().len()
    }
}

impl VirtualKeyboard for RecordingKeyboard {
    fn open_session(&self) -> Result<Box<dyn EventSession + '_>, BridgeError> {
        if self.fail_open {
            return Err(BridgeError::DeviceOpen {
                path: PathBuf::from("mock://keyboard"),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "mock failure"),
            });
        }
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(RecordingSession {
            owner: self,
            events: Vec::new(),
        }))
    }
}

struct RecordingSession<'a> {
    owner: &'a RecordingKeyboard,
    events: Vec<KeyEvent>,
}

impl EventSession for RecordingSession<'_> {
    fn write_event(&mut self, event: &KeyEvent) -> Result<(), BridgeError> {
        if self.owner.fail_after_writes == Some(self.events.len()) {
            return Err(BridgeError::Io {
                operation: "write(mock)",
                source: std::io::Error::new(std::io::ErrorKind::Other, "mock failure"),
            });
        }
        self.events.push(*event);
        Ok(())
    }
}

impl Drop for RecordingSession<'_> {
    fn drop(&mut self) {
        if let Ok(mut closed) = self.owner.closed_sessions.lock() {
            closed.push(std::mem::take(&mut self.events));
        }
    }
}
