//! # tty2keyb-core
//!
//! Shared, OS-independent core of tty2keyb: the bridge that makes a serial
//! peer "type" on a Linux machine through a virtual keyboard device.
//!
//! This crate does no I/O.  It defines:
//!
//! - **`keymap`** – [`KeyCodeMapper`], the pure byte → `KEY_*` translation.
//! - **`protocol`** – [`KeyEvent`] records and their encoding as the host's
//!   `struct input_event`.
//! - **`domain`** – [`ByteBatch`], one serial read, and its expansion into the
//!   press/release/sync sequence written to the device.
//!
//! ```text
//! serial bytes ──► ByteBatch ──► KeyCodeMapper ──► KeyEvent* + SYN_REPORT ──► encode_event
//! ```

pub mod domain;
pub mod keymap;
pub mod protocol;

pub use domain::batch::{ByteBatch, MAX_BATCH_LEN};
pub use keymap::{KeyCode, KeyCodeMapper};
pub use protocol::codec::{decode_event, encode_event, ProtocolError, EVENT_RECORD_SIZE};
pub use protocol::event::{EventKind, KeyEvent};
