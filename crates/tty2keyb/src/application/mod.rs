//! Application layer use cases.
//!
//! - **`emit_keystrokes`** – Types one serial batch on the virtual keyboard
//!   through an injected [`emit_keystrokes::VirtualKeyboard`].
//!
//! - **`bridge_loop`** – The driver loop that pulls batches from a
//!   [`bridge_loop::SerialSource`], echoes them to the log, and hands them to
//!   the emitter.
//!
//! - **`error`** – [`error::BridgeError`], the fatal error taxonomy.

pub mod bridge_loop;
pub mod emit_keystrokes;
pub mod error;

pub use bridge_loop::{BridgeLoop, SerialSource, StepOutcome};
pub use emit_keystrokes::{EmitKeystrokesUseCase, EventSession, VirtualKeyboard};
pub use error::BridgeError;
