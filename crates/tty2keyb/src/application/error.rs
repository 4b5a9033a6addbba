//! Error taxonomy shared by the application and infrastructure layers.
//!
//! Every variant is fatal: it ends the bridge loop and the process exits
//! with status 2.  An empty serial read is not an error at all; it is
//! reported as `Ok(None)` by [`crate::application::bridge_loop::SerialSource`].

use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors raised while bridging serial input to the virtual keyboard.
///
/// Display messages name the failing operation; the underlying OS error is
/// attached as the source so `{:#}` prints both.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The serial port or the event device could not be opened.
    #[error("cannot open {}", path.display())]
    DeviceOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The serial line discipline could not be read, applied or flushed.
    #[error("serial line configuration failed in {operation}")]
    Configuration {
        operation: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// A read or write failed on an already open device.
    #[error("{operation} error")]
    Io {
        operation: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl BridgeError {
    /// Builds a [`BridgeError::Configuration`] from a termios errno.
    pub fn configuration(operation: &'static str, errno: nix::errno::Errno) -> Self {
        Self::Configuration {
            operation,
            source: std::io::Error::from(errno),
        }
    }
}
