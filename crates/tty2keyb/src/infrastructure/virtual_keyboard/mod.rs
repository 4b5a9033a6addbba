//! Virtual keyboard implementations of
//! [`crate::application::emit_keystrokes::VirtualKeyboard`].
//!
//! - [`device::EventDevice`] writes `struct input_event` records to a Linux
//!   input event node (e.g. `/dev/input/event2`, or a uinput-backed device).
//! - [`mock::RecordingKeyboard`] records records in memory for tests.

pub mod device;
pub mod mock;

pub use device::EventDevice;
pub use mock::RecordingKeyboard;
