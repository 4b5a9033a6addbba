//! tty2keyb entry point.
//!
//! Resolves the device paths, opens the serial port, and runs the bridge
//! loop until a fatal error.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ resolve()                 -- command line, TTY2KEYB, --config, defaults
//!  └─ SerialChannel::open()     -- 9600 8N1 canonical, input flushed
//!  └─ BridgeLoop::run()
//!       ├─ SerialChannel::read_batch()
//!       └─ EmitKeystrokesUseCase::emit_batch() -> EventDevice
//! ```
//!
//! # Exit status
//!
//! The loop has no graceful stop; the process runs until it is killed.  Any
//! fatal error (bad path, non-terminal serial device, failed read or write)
//! is printed with its OS error text and the process exits with status 2.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use tty2keyb::application::{BridgeLoop, EmitKeystrokesUseCase, VirtualKeyboard};
use tty2keyb::infrastructure::{
    config::{load_file_config, resolve, ParamOrigin, ParamSources, ENV_VAR},
    serial::SerialChannel,
    virtual_keyboard::EventDevice,
};

/// Exit status for every fatal error.
const FATAL_EXIT_CODE: u8 = 2;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Types bytes received on a serial port into a Linux input event device.
///
/// Paths are taken from the command line if given, otherwise from the
/// TTY2KEYB environment variable ("serial:keyboard"), otherwise from the
/// config file or the built-in defaults.
#[derive(Debug, Parser)]
#[command(name = "tty2keyb", version)]
struct Cli {
    /// Serial port to read from (default: /dev/ttyS0).
    serial: Option<PathBuf>,

    /// Input event device to type into (default: /dev/input/event2).
    ///
    /// See /proc/bus/input/devices to find the right node.
    keyboard: Option<PathBuf>,

    /// TOML config file with [devices] and [bridge] sections.
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Pause after an empty serial read, in milliseconds.
    #[arg(long)]
    poll_backoff_ms: Option<u64>,
}

impl Cli {
    /// Positional device paths, in order.
    fn positional_paths(&self) -> Vec<PathBuf> {
        self.serial.iter().chain(self.keyboard.iter()).cloned().collect()
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            eprintln!("tty2keyb: {err:#}");
            ExitCode::from(FATAL_EXIT_CODE)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let file = cli
        .config
        .as_deref()
        .map(load_file_config)
        .transpose()
        .context("loading config file")?;
    let env_value = std::env::var(ENV_VAR).ok();
    let args = cli.positional_paths();

    let config = resolve(ParamSources {
        args: &args,
        env: env_value.as_deref(),
        file,
        poll_backoff_ms: cli.poll_backoff_ms,
    });

    // Initialise structured logging.  Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    match config.origin {
        ParamOrigin::CommandLine { count } => info!("{count} command line argument(s) read"),
        ParamOrigin::Environment => info!(
            "environment variable {ENV_VAR} read as <{}>",
            env_value.as_deref().unwrap_or_default()
        ),
        ParamOrigin::Defaults => info!("environment variable {ENV_VAR} not found"),
    }

    let serial = SerialChannel::open(&config.serial_path)?;
    info!("reading from {}", serial.path().display());

    let device = EventDevice::new(config.keyboard_path);
    info!(
        "writing to {} (check /proc/bus/input/devices)",
        device.path().display()
    );

    let keyboard: Arc<dyn VirtualKeyboard> = Arc::new(device);
    let mut bridge = BridgeLoop::new(
        serial,
        EmitKeystrokesUseCase::new(keyboard),
        config.poll_backoff,
    );

    match bridge.run() {
        Ok(never) => match never {},
        Err(err) => Err(err).context("bridge stopped"),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
