//! Linux input event device writer.
//!
//! # How does writing to an event device type a key? (for beginners)
//!
//! Each node under `/dev/input/` is a stream of fixed-size
//! `struct input_event` records.  Writing a record into the node injects it
//! into the input subsystem as if the hardware had produced it.  Consumers
//! (the console, X11, Wayland compositors) see nothing until a
//! `SYN_REPORT` record arrives, at which point everything written since the
//! last one is committed together.
//!
//! The device is opened write-only and non-blocking for every batch and
//! closed again once the batch's `SYN_REPORT` is written.  A full kernel
//! buffer therefore surfaces as a `WouldBlock` write error instead of a
//! stall.
//!
//! # Permissions
//!
//! Event nodes are normally owned by `root:input`.  Run the bridge as root or
//! as a member of the `input` group, otherwise every batch fails with
//! [`BridgeError::DeviceOpen`].

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};

use tracing::debug;
use tty2keyb_core::{protocol::codec::encode_event_into, KeyEvent, EVENT_RECORD_SIZE};

use crate::application::emit_keystrokes::{EventSession, VirtualKeyboard};
use crate::application::error::BridgeError;

/// An input event node written one batch at a time.
#[derive(Debug, Clone)]
pub struct EventDevice {
    path: PathBuf,
}

impl EventDevice {
    /// Targets the event node at `path`.  Nothing is opened until the first
    /// batch.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The event node this device writes to.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl VirtualKeyboard for EventDevice {
    fn open_session(&self) -> Result<Box<dyn EventSession + '_>, BridgeError> {
        let file = OpenOptions::new()
            .write(true)
            .custom_flags(libc::O_NONBLOCK)
            .open(&self.path)
            .map_err(|source| BridgeError::DeviceOpen {
                path: self.path.clone(),
                source,
            })?;
        debug!(path = %self.path.display(), "event device opened");

        Ok(Box::new(DeviceSession {
            file,
            record: Vec::with_capacity(EVENT_RECORD_SIZE),
        }))
    }
}

/// An open event node.  Closing happens when the session is dropped.
struct DeviceSession {
    file: File,
    record: Vec<u8>,
}

impl EventSession for DeviceSession {
    fn write_event(&mut self, event: &KeyEvent) -> Result<(), BridgeError> {
        self.record.clear();
        encode_event_into(&mut self.record, event);
        self.file
            .write_all(&self.record)
            .map_err(|source| BridgeError::Io {
                operation: write_operation(event),
                source,
            })
    }
}

/// Names the write in error messages the way an operator reads them.
fn write_operation(event: &KeyEvent) -> &'static str {
    match (event.is_sync(), event.value) {
        (true, _) => "write(syn)",
        (false, 0) => "write(release)",
        (false, _) => "write(press)",
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tty2keyb_core::{protocol::codec::decode_stream, ByteBatch, KeyCode};

    /// A fresh path under the system temp dir, unique per test.
    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("tty2keyb-device-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_missing_node_is_a_device_open_error() {
        // Arrange
        let device = EventDevice::new("/nonexistent/tty2keyb/event0");

        // Act
        let result = device.open_session();

        // Assert
        match result {
            Err(BridgeError::DeviceOpen { path, .. }) => {
                assert_eq!(path, PathBuf::from("/nonexistent/tty2keyb/event0"));
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("open must fail"),
        }
    }

    #[test]
    fn test_open_does_not_create_the_node() {
        let path = scratch_path("absent");
        let _ = std::fs::remove_file(&path);

        assert!(EventDevice::new(&path).open_session().is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_session_writes_encoded_records() {
        // Arrange: a regular file stands in for the event node
        let path = scratch_path("records");
        std::fs::write(&path, b"").unwrap();
        let device = EventDevice::new(&path);
        let batch = ByteBatch::from_slice(b"5\n").unwrap();

        // Act
        {
            let mut session = device.open_session().unwrap();
            for event in batch.keystroke_events() {
                session.write_event(&event).unwrap();
            }
        }

        // Assert
        let bytes = std::fs::read(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(bytes.len(), 5 * EVENT_RECORD_SIZE);
        assert_eq!(
            decode_stream(&bytes).unwrap(),
            vec![
                KeyEvent::press(KeyCode::Key5),
                KeyEvent::release(KeyCode::Key5),
                KeyEvent::press(KeyCode::Enter),
                KeyEvent::release(KeyCode::Enter),
                KeyEvent::sync_report(),
            ]
        );
    }

    #[test]
    fn test_write_operation_names() {
        assert_eq!(write_operation(&KeyEvent::press(KeyCode::Key1)), "write(press)");
        assert_eq!(write_operation(&KeyEvent::release(KeyCode::Key1)), "write(release)");
        assert_eq!(write_operation(&KeyEvent::sync_report()), "write(syn)");
    }
}
