//! Runtime configuration: which serial port to read, which event device to
//! write, and how long to pause after an empty read.
//!
//! # Where the values come from
//!
//! [`resolve`] layers four sources, later ones winning:
//!
//! 1. Built-in defaults: `/dev/ttyS0`, `/dev/input/event2`, 1 ms backoff.
//! 2. An optional TOML file passed with `--config`.
//! 3. Positional command-line paths, serial first, keyboard second.
//! 4. Only when no positional path was given: the `TTY2KEYB` environment
//!    variable, `serial[:keyboard]` separated by a colon or a space.
//!
//! An explicit `--poll-backoff-ms` overrides the backoff from any source.
//!
//! # Config file example
//!
//! ```toml
//! [devices]
//! serial = "/dev/ttyUSB0"
//! keyboard = "/dev/input/event5"
//!
//! [bridge]
//! poll_backoff_ms = 1
//! log_level = "info"
//! ```
//!
//! Fields annotated with `#[serde(default = "some_fn")]` fall back to the
//! built-in default when absent, so a file may set only what it changes.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Serial port used when no source names one.
pub const DEFAULT_SERIAL_PATH: &str = "/dev/ttyS0";
/// Event device used when no source names one.
pub const DEFAULT_KEYBOARD_PATH: &str = "/dev/input/event2";
/// Environment variable holding `serial[:keyboard]`.
pub const ENV_VAR: &str = "TTY2KEYB";

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("I/O error accessing config at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

// ── Config file schema ────────────────────────────────────────────────────────

/// Contents of a `--config` TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FileConfig {
    #[serde(default)]
    pub devices: DevicesConfig,
    #[serde(default)]
    pub bridge: BridgeSettings,
}

/// Device paths.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DevicesConfig {
    /// Serial port to read from.
    #[serde(default = "default_serial")]
    pub serial: PathBuf,
    /// Input event device to type into.
    #[serde(default = "default_keyboard")]
    pub keyboard: PathBuf,
}

/// Loop and logging behaviour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BridgeSettings {
    /// Pause after an empty read, in milliseconds.
    #[serde(default = "default_poll_backoff_ms")]
    pub poll_backoff_ms: u64,
    /// `tracing` log level used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_serial() -> PathBuf {
    PathBuf::from(DEFAULT_SERIAL_PATH)
}
fn default_keyboard() -> PathBuf {
    PathBuf::from(DEFAULT_KEYBOARD_PATH)
}
fn default_poll_backoff_ms() -> u64 {
    1
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for DevicesConfig {
    fn default() -> Self {
        Self {
            serial: default_serial(),
            keyboard: default_keyboard(),
        }
    }
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            poll_backoff_ms: default_poll_backoff_ms(),
            log_level: default_log_level(),
        }
    }
}

/// Loads a [`FileConfig`] from `path`.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file cannot be read (a missing file is
/// an error, since the path was given explicitly) and [`ConfigError::Parse`]
/// if the TOML is malformed.
pub fn load_file_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&content)?)
}

// ── Resolution ────────────────────────────────────────────────────────────────

/// Which source supplied the device paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamOrigin {
    /// Positional command-line arguments.
    CommandLine { count: usize },
    /// The `TTY2KEYB` environment variable.
    Environment,
    /// Config file or built-in defaults.
    Defaults,
}

/// Everything [`resolve`] looks at.
#[derive(Debug, Clone, Default)]
pub struct ParamSources<'a> {
    /// Positional paths from the command line, in order.
    pub args: &'a [PathBuf],
    /// Raw value of the `TTY2KEYB` environment variable, if set.
    pub env: Option<&'a str>,
    /// Parsed `--config` file, if one was given.
    pub file: Option<FileConfig>,
    /// Explicit `--poll-backoff-ms`, if given.
    pub poll_backoff_ms: Option<u64>,
}

/// The resolved configuration, built once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct BridgeConfig {
    pub serial_path: PathBuf,
    pub keyboard_path: PathBuf,
    pub poll_backoff: Duration,
    pub log_level: String,
    pub origin: ParamOrigin,
}

/// Resolves the configuration from `sources`.  See the module docs for the
/// precedence rules.
pub fn resolve(sources: ParamSources<'_>) -> BridgeConfig {
    let file = sources.file.unwrap_or_default();
    let mut serial_path = file.devices.serial;
    let mut keyboard_path = file.devices.keyboard;

    let origin = if !sources.args.is_empty() {
        serial_path = sources.args[0].clone();
        if let Some(keyboard) = sources.args.get(1) {
            keyboard_path = keyboard.clone();
        }
        ParamOrigin::CommandLine {
            count: sources.args.len(),
        }
    } else if let Some(value) = sources.env {
        let (serial, keyboard) = split_env_value(value);
        if let Some(serial) = serial {
            serial_path = PathBuf::from(serial);
        }
        if let Some(keyboard) = keyboard {
            keyboard_path = PathBuf::from(keyboard);
        }
        ParamOrigin::Environment
    } else {
        ParamOrigin::Defaults
    };

    let backoff_ms = sources
        .poll_backoff_ms
        .unwrap_or(file.bridge.poll_backoff_ms);

    BridgeConfig {
        serial_path,
        keyboard_path,
        poll_backoff: Duration::from_millis(backoff_ms),
        log_level: file.bridge.log_level,
        origin,
    }
}

/// Splits a `TTY2KEYB` value into `(serial, keyboard)`.
///
/// The separator is the first `:` or space; anything after a second
/// separator is ignored.  Empty fields are `None`.
pub fn split_env_value(value: &str) -> (Option<&str>, Option<&str>) {
    let mut fields = value
        .splitn(3, |c: char| c == ':' || c == ' ')
        .map(|f| Some(f).filter(|f| !f.is_empty()));
    let serial = fields.next().flatten();
    let keyboard = fields.next().flatten();
    (serial, keyboard)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(list: &[&str]) -> Vec<PathBuf> {
        list.iter().map(PathBuf::from).collect()
    }

    // ── Defaults ──────────────────────────────────────────────────────────────

    #[test]
    fn test_no_sources_gives_builtin_defaults() {
        // Arrange / Act
        let cfg = resolve(ParamSources::default());

        // Assert
        assert_eq!(cfg.serial_path, PathBuf::from("/dev/ttyS0"));
        assert_eq!(cfg.keyboard_path, PathBuf::from("/dev/input/event2"));
        assert_eq!(cfg.poll_backoff, Duration::from_millis(1));
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.origin, ParamOrigin::Defaults);
    }

    // ── Command line ──────────────────────────────────────────────────────────

    #[test]
    fn test_two_args_set_both_paths() {
        let args = paths(&["/dev/ttyUSB0", "/dev/input/event7"]);
        let cfg = resolve(ParamSources {
            args: &args,
            ..Default::default()
        });
        assert_eq!(cfg.serial_path, PathBuf::from("/dev/ttyUSB0"));
        assert_eq!(cfg.keyboard_path, PathBuf::from("/dev/input/event7"));
        assert_eq!(cfg.origin, ParamOrigin::CommandLine { count: 2 });
    }

    #[test]
    fn test_one_arg_keeps_default_keyboard() {
        let args = paths(&["/dev/ttyACM0"]);
        let cfg = resolve(ParamSources {
            args: &args,
            ..Default::default()
        });
        assert_eq!(cfg.serial_path, PathBuf::from("/dev/ttyACM0"));
        assert_eq!(cfg.keyboard_path, PathBuf::from(DEFAULT_KEYBOARD_PATH));
    }

    #[test]
    fn test_args_win_over_environment() {
        let args = paths(&["/dev/ttyUSB1"]);
        let cfg = resolve(ParamSources {
            args: &args,
            env: Some("/dev/ttyS3:/dev/input/event9"),
            ..Default::default()
        });
        assert_eq!(cfg.serial_path, PathBuf::from("/dev/ttyUSB1"));
        assert_eq!(cfg.keyboard_path, PathBuf::from(DEFAULT_KEYBOARD_PATH));
    }

    // ── Environment ───────────────────────────────────────────────────────────

    #[test]
    fn test_env_colon_separated() {
        let cfg = resolve(ParamSources {
            env: Some("/dev/ttyS1:/dev/input/event4"),
            ..Default::default()
        });
        assert_eq!(cfg.serial_path, PathBuf::from("/dev/ttyS1"));
        assert_eq!(cfg.keyboard_path, PathBuf::from("/dev/input/event4"));
        assert_eq!(cfg.origin, ParamOrigin::Environment);
    }

    #[test]
    fn test_env_space_separated() {
        assert_eq!(
            split_env_value("/dev/ttyS1 /dev/input/event4"),
            (Some("/dev/ttyS1"), Some("/dev/input/event4"))
        );
    }

    #[test]
    fn test_env_serial_only() {
        assert_eq!(split_env_value("/dev/ttyS2"), (Some("/dev/ttyS2"), None));
    }

    #[test]
    fn test_env_extra_fields_are_ignored() {
        assert_eq!(split_env_value("a:b:c"), (Some("a"), Some("b")));
    }

    #[test]
    fn test_env_empty_fields_fall_back() {
        let cfg = resolve(ParamSources {
            env: Some(":/dev/input/event3"),
            ..Default::default()
        });
        assert_eq!(cfg.serial_path, PathBuf::from(DEFAULT_SERIAL_PATH));
        assert_eq!(cfg.keyboard_path, PathBuf::from("/dev/input/event3"));
    }

    // ── Config file ───────────────────────────────────────────────────────────

    #[test]
    fn test_file_overrides_defaults_and_env_overrides_file() {
        // Arrange
        let file: FileConfig = toml::from_str(
            r#"
            [devices]
            serial = "/dev/ttyUSB0"
            keyboard = "/dev/input/event5"

            [bridge]
            poll_backoff_ms = 20
            log_level = "debug"
            "#,
        )
        .unwrap();

        // Act
        let cfg = resolve(ParamSources {
            env: Some("/dev/ttyS4"),
            file: Some(file),
            ..Default::default()
        });

        // Assert
        assert_eq!(cfg.serial_path, PathBuf::from("/dev/ttyS4"));
        assert_eq!(cfg.keyboard_path, PathBuf::from("/dev/input/event5"));
        assert_eq!(cfg.poll_backoff, Duration::from_millis(20));
        assert_eq!(cfg.log_level, "debug");
    }

    #[test]
    fn test_partial_file_uses_field_defaults() {
        let file: FileConfig = toml::from_str("[bridge]\npoll_backoff_ms = 0\n").unwrap();
        assert_eq!(file.devices, DevicesConfig::default());
        assert_eq!(file.bridge.poll_backoff_ms, 0);
        assert_eq!(file.bridge.log_level, "info");
    }

    #[test]
    fn test_explicit_backoff_wins() {
        let file = FileConfig {
            bridge: BridgeSettings {
                poll_backoff_ms: 50,
                ..BridgeSettings::default()
            },
            ..FileConfig::default()
        };
        let cfg = resolve(ParamSources {
            file: Some(file),
            poll_backoff_ms: Some(0),
            ..Default::default()
        });
        assert_eq!(cfg.poll_backoff, Duration::ZERO);
    }

    #[test]
    fn test_file_config_round_trips_through_toml() {
        let mut cfg = FileConfig::default();
        cfg.devices.serial = PathBuf::from("/dev/ttyAMA0");
        let text = toml::to_string_pretty(&cfg).expect("serialize");
        let restored: FileConfig = toml::from_str(&text).expect("deserialize");
        assert_eq!(cfg, restored);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = load_file_config(Path::new("/nonexistent/tty2keyb.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_malformed_file_is_parse_error() {
        let path = std::env::temp_dir().join(format!("tty2keyb-bad-{}.toml", std::process::id()));
        std::fs::write(&path, "[devices\nserial = ").unwrap();
        let err = load_file_config(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
