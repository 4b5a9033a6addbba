//! tty2keyb library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does tty2keyb do? (for beginners)
//!
//! A device on the serial port (a barcode scanner, a scale, a tally
//! counter) sends lines of digits.  tty2keyb makes those digits appear as if
//! they had been typed on the local keyboard:
//!
//! 1. Reads one line from the serial port (9600 baud, canonical mode).
//! 2. Maps each byte to a Linux key code (`'1'..'9'`, Enter, and `'0'` for
//!    everything else).
//! 3. Writes a press and a release record per byte to an input event
//!    device, then a `SYN_REPORT` so the whole line is committed at once.
//! 4. Goes back to waiting for the next line.

#[cfg(not(unix))]
compile_error!("tty2keyb drives termios serial ports and Linux input devices; build it for a Unix target");

/// Application layer: the emitter use case and the driver loop.
pub mod application;

/// Infrastructure layer: serial port, event device and configuration.
pub mod infrastructure;
