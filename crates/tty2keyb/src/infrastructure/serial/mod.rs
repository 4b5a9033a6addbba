//! Serial port input via the termios line discipline.
//!
//! # Line settings (for beginners)
//!
//! A serial port on Unix is a terminal device, and its behaviour is set
//! through a `termios` record.  The bridge applies one fixed setting:
//!
//! | Flag              | Meaning                                             |
//! |-------------------|-----------------------------------------------------|
//! | `B9600`           | 9600 baud, input and output                         |
//! | `CS8`             | 8 data bits                                         |
//! | `CLOCAL`          | ignore modem control lines (no carrier detect)      |
//! | `CREAD`           | enable the receiver                                 |
//! | `IGNPAR`          | drop bytes with parity or framing errors            |
//! | `IGNCR`           | discard carriage returns, so `"12\r\n"` reads `"12\n"` |
//! | `ICANON`          | canonical mode: `read` returns one line at a time   |
//!
//! Every other flag and every control character is cleared, exactly as if
//! the record had been built from zero.  Echo, signals and output
//! post-processing are therefore all off.
//!
//! After the settings are applied the input queue is flushed, so bytes that
//! arrived before the bridge started are never typed.

use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read};
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};

use nix::sys::termios::{
    self, BaudRate, ControlFlags, FlushArg, InputFlags, LocalFlags, OutputFlags, SetArg, Termios,
};
use tracing::{debug, info};
use tty2keyb_core::{ByteBatch, MAX_BATCH_LEN};

use crate::application::bridge_loop::SerialSource;
use crate::application::error::BridgeError;

/// Line speed of the serial port.
pub const BAUD_RATE: BaudRate = BaudRate::B9600;

/// An open, configured serial port.
///
/// The port stays open for the life of the value; dropping it closes the
/// file descriptor.
pub struct SerialChannel {
    file: File,
    path: PathBuf,
    buf: [u8; MAX_BATCH_LEN],
}

impl SerialChannel {
    /// Opens `path` read-only (without becoming its controlling terminal),
    /// applies the line settings, and flushes pending input.
    ///
    /// # Errors
    ///
    /// - [`BridgeError::DeviceOpen`] if `path` cannot be opened.
    /// - [`BridgeError::Configuration`] if `path` is not a terminal or the
    ///   settings cannot be applied.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, BridgeError> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .read(true)
            .custom_flags(libc::O_NOCTTY)
            .open(path)
            .map_err(|source| BridgeError::DeviceOpen {
                path: path.to_path_buf(),
                source,
            })?;

        let mut settings =
            termios::tcgetattr(&file).map_err(|e| BridgeError::configuration("tcgetattr", e))?;
        apply_line_settings(&mut settings)
            .map_err(|e| BridgeError::configuration("cfsetspeed", e))?;
        termios::tcsetattr(&file, SetArg::TCSANOW, &settings)
            .map_err(|e| BridgeError::configuration("tcsetattr", e))?;
        termios::tcflush(&file, FlushArg::TCIFLUSH)
            .map_err(|e| BridgeError::configuration("tcflush", e))?;

        info!(path = %path.display(), "serial port configured: 9600 8N1, canonical");
        Ok(Self {
            file,
            path: path.to_path_buf(),
            buf: [0; MAX_BATCH_LEN],
        })
    }

    /// The port this channel reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SerialSource for SerialChannel {
    fn read_batch(&mut self) -> Result<Option<ByteBatch>, BridgeError> {
        read_batch_from(&mut self.file, &mut self.buf)
    }
}

/// Overwrites `settings` with the bridge's fixed line discipline.
///
/// # Errors
///
/// Returns the errno from `cfsetspeed` if the baud rate is rejected.
pub fn apply_line_settings(settings: &mut Termios) -> nix::Result<()> {
    settings.input_flags = InputFlags::IGNPAR | InputFlags::IGNCR;
    settings.output_flags = OutputFlags::empty();
    settings.control_flags = ControlFlags::CS8 | ControlFlags::CLOCAL | ControlFlags::CREAD;
    settings.local_flags = LocalFlags::ICANON;
    settings.control_chars.fill(0);
    termios::cfsetspeed(settings, BAUD_RATE)
}

/// Performs one read of at most `buf.len()` bytes.
///
/// A zero-length read, `EINTR` and `EAGAIN` mean "no data yet" and yield
/// `Ok(None)`.
///
/// # Errors
///
/// Any other read error is returned as [`BridgeError::Io`].
pub fn read_batch_from(
    reader: &mut impl Read,
    buf: &mut [u8],
) -> Result<Option<ByteBatch>, BridgeError> {
    match reader.read(buf) {
        Ok(n) => Ok(ByteBatch::from_slice(&buf[..n])),
        Err(e) if matches!(e.kind(), ErrorKind::Interrupted | ErrorKind::WouldBlock) => {
            debug!("serial read interrupted: {e}");
            Ok(None)
        }
        Err(source) => Err(BridgeError::Io {
            operation: "read(serial)",
            source,
        }),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
