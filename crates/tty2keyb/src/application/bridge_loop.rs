//! The driver loop: serial reads in, keystroke bursts out.
//!
//! # States
//!
//! ```text
//!            read_batch() == Some(batch)
//! WAIT_FOR_DATA ─────────────────────────► HAVE_BATCH ──echo──► EMITTING
//!    ▲    │                                                        │
//!    │    └── read_batch() == None: sleep(poll_backoff) ──┐        │
//!    └────────────────────────────────────────────────────┴────────┘
//! ```
//!
//! There is no terminal state.  The loop ends only when a [`BridgeError`]
//! propagates out of [`BridgeLoop::run`].

use std::convert::Infallible;
use std::thread;
use std::time::Duration;

use tracing::{info, trace};
use tty2keyb_core::{domain::echo::render_batch, ByteBatch};

use crate::application::emit_keystrokes::EmitKeystrokesUseCase;
use crate::application::error::BridgeError;

/// A blocking source of serial batches.
#[cfg_attr(test, mockall::automock)]
pub trait SerialSource {
    /// Blocks until a batch is available.
    ///
    /// Returns `Ok(None)` when the read produced no data ("no data yet").
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Io`] if the read itself fails.
    fn read_batch(&mut self) -> Result<Option<ByteBatch>, BridgeError>;
}

/// What one [`BridgeLoop::step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The read returned nothing; the loop paused for the backoff interval.
    NoData,
    /// A batch of `bytes` bytes was typed using `events` records.
    Emitted { bytes: usize, events: usize },
}

/// Pulls batches from a [`SerialSource`] and types them.
pub struct BridgeLoop<S> {
    source: S,
    emitter: EmitKeystrokesUseCase,
    poll_backoff: Duration,
}

impl<S: SerialSource> BridgeLoop<S> {
    /// Creates a loop that sleeps `poll_backoff` after every empty read.
    pub fn new(source: S, emitter: EmitKeystrokesUseCase, poll_backoff: Duration) -> Self {
        Self {
            source,
            emitter,
            poll_backoff,
        }
    }

    /// Runs one WAIT_FOR_DATA → HAVE_BATCH → EMITTING cycle.
    ///
    /// # Errors
    ///
    /// Propagates any [`BridgeError`] from the source or the emitter.
    pub fn step(&mut self) -> Result<StepOutcome, BridgeError> {
        let Some(batch) = self.source.read_batch()? else {
            trace!("no data yet");
            if !self.poll_backoff.is_zero() {
                thread::sleep(self.poll_backoff);
            }
            return Ok(StepOutcome::NoData);
        };

        info!("{}", render_batch(batch.as_bytes()));
        let events = self.emitter.emit_batch(&batch)?;
        Ok(StepOutcome::Emitted {
            bytes: batch.len(),
            events,
        })
    }

    /// Steps forever.  Only returns on a fatal error.
    ///
    /// # Errors
    ///
    /// Returns the first [`BridgeError`] raised by [`BridgeLoop::step`].
    pub fn run(&mut self) -> Result<Infallible, BridgeError> {
        loop {
            self.step()?;
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
