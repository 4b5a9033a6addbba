//! Infrastructure layer: OS-facing adapters.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `tty2keyb_core`, but MUST NOT be imported by the `application` layer
//! outside of tests.
//!
//! # Sub-modules
//!
//! - **`serial`** – [`serial::SerialChannel`], the termios-configured serial
//!   port implementing `SerialSource`.
//!
//! - **`virtual_keyboard`** – [`virtual_keyboard::EventDevice`], which writes
//!   `struct input_event` records to an event node, and a recording mock.
//!
//! - **`config`** – device path resolution from the command line, the
//!   `TTY2KEYB` environment variable and an optional TOML file.

pub mod config;
pub mod serial;
pub mod virtual_keyboard;
