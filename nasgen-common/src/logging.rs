//! Logging setup and wire-buffer formatting
//!
//! Uses `tracing` with an `EnvFilter`; `RUST_LOG` overrides the level passed
//! in by the caller.

use std::fmt;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Log level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("unknown log level: {s}")),
        }
    }
}

/// Install a global `fmt` subscriber at `level`.
///
/// Call once from the test driver. A second call is ignored.
pub fn init_logging(level: LogLevel) {
    init_logging_with_filter(&level.to_string());
}

/// Install a global `fmt` subscriber with a directive string such as
/// `"info,nasgen_gmm=trace"`.
pub fn init_logging_with_filter(filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .try_init();
}

/// Log an outgoing NAS PDU: summary at debug, bytes at trace.
pub fn log_uplink_nas(msg_type: &str, envelope: &str, data: &[u8]) {
    tracing::debug!(msg_type, envelope, len = data.len(), "UL NAS message built");
    tracing::trace!(msg_type, hex = %HexDump(data), "UL NAS payload");
}

/// Lower-case hex rendering of a byte slice for log fields.
pub struct HexDump<'a>(pub &'a [u8]);

impl fmt::Display for HexDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for HexDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Format bytes as hex, split into groups of `group_size` bytes (0 = no grouping).
///
/// ```
/// use nasgen_common::logging::format_hex_compact;
///
/// let data = [0x7e, 0x00, 0x41, 0x79];
/// assert_eq!(format_hex_compact(&data, 0), "7e004179");
/// assert_eq!(format_hex_compact(&data, 2), "7e00 4179");
/// ```
pub fn format_hex_compact(data: &[u8], group_size: usize) -> String {
    if group_size == 0 {
        return hex::encode(data);
    }

    data.chunks(group_size)
        .map(hex::encode)
        .collect::<Vec<_>>()
        .join(" ")
}
