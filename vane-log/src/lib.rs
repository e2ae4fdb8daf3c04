//! Diagnostics for the Vane evaluation core.
//!
//! Evaluation never fails loudly. When a URL pattern, query string or decoded
//! configuration field is malformed, the targeting code reports it here and
//! carries on with a non-match.
//!
//! ```rust
//! use vane_log::{debug, warn};
//!
//! debug!("evaluating {} url targets", 3);
//! warn!(target: "vane::targeting", "Invalid JSON data type for {}.{}", "Experiment", "weights");
//! ```
//!
//! The environment is read once, on the first record:
//!
//! | Variable | Values | Default |
//! |---|---|---|
//! | `VANE_DEBUG` | `1`/`true` | off |
//! | `VANE_LOG_LEVEL` | `trace`, `debug`, `info`, `warn`, `error`, `off` | `warn` |
//! | `VANE_LOG_FORMAT` | `pretty`, `compact`, `json`, `facade` | `json` |
//! | `VANE_LOG_TIMESTAMPS` | `1`/`0` | on |
//! | `VANE_LOG_MODULE` | `1`/`0` | on |
//!
//! With `facade`, records go to whatever logger the host installed through the
//! [`log`] crate instead of stderr.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::env;
use std::fmt;
use std::io::Write;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

/// Severity of a diagnostic, from most to least verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Level {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    /// Disables output; never emitted itself.
    Off = 5,
}

impl Level {
    const ALL: [Level; 6] = [
        Level::Trace,
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Off,
    ];

    /// Case-insensitive name lookup. Accepts `warning` and `none` as aliases.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "warning" => Some(Level::Warn),
            "none" => Some(Level::Off),
            lower => Self::ALL
                .into_iter()
                .find(|level| level.as_str().eq_ignore_ascii_case(lower)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Off => "OFF",
        }
    }

    fn from_u8(raw: u8) -> Self {
        Self::ALL.get(raw as usize).copied().unwrap_or(Level::Off)
    }

    /// The `log` crate level, if this level produces records at all.
    pub fn to_log_level(self) -> Option<log::Level> {
        Some(match self {
            Level::Trace => log::Level::Trace,
            Level::Debug => log::Level::Debug,
            Level::Info => log::Level::Info,
            Level::Warn => log::Level::Warn,
            Level::Error => log::Level::Error,
            Level::Off => return None,
        })
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where and how a record is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Format {
    /// `2024-01-01 12:00:00.000 WARN  [target] message` on stderr
    Pretty = 0,
    /// `12:00:00 W target: message` on stderr
    Compact = 1,
    /// One JSON object per line on stderr
    Json = 2,
    /// Forwarded to the `log` crate
    Facade = 3,
}

impl Format {
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "pretty" => Some(Format::Pretty),
            "compact" => Some(Format::Compact),
            "json" => Some(Format::Json),
            "facade" | "log" => Some(Format::Facade),
            _ => None,
        }
    }

    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Format::Pretty,
            1 => Format::Compact,
            3 => Format::Facade,
            _ => Format::Json,
        }
    }
}

/// Settings read from the `VANE_*` variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub debug: bool,
    pub level: Level,
    pub format: Format,
    pub timestamps: bool,
    /// Print the record target in text formats
    pub module_path: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            debug: false,
            level: Level::Warn,
            format: Format::Json,
            timestamps: true,
            module_path: true,
        }
    }
}

impl LogConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any variable source. Unknown values keep the
    /// default; `VANE_DEBUG` lowers the default level to `debug`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let flag = |key: &str, default: bool| match lookup(key) {
            Some(raw) => raw == "1" || raw.eq_ignore_ascii_case("true"),
            None => default,
        };

        let debug = flag("VANE_DEBUG", defaults.debug);
        let level = lookup("VANE_LOG_LEVEL")
            .and_then(|raw| Level::parse(&raw))
            .unwrap_or(if debug { Level::Debug } else { defaults.level });
        let format = lookup("VANE_LOG_FORMAT")
            .and_then(|raw| Format::parse(&raw))
            .unwrap_or(defaults.format);

        Self {
            debug,
            level,
            format,
            timestamps: flag("VANE_LOG_TIMESTAMPS", defaults.timestamps),
            module_path: flag("VANE_LOG_MODULE", defaults.module_path),
        }
    }
}

// The atomics hold the live settings; CONFIG seeds them on first use.
static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);
static LOG_LEVEL: AtomicU8 = AtomicU8::new(Level::Warn as u8);
static LOG_FORMAT: AtomicU8 = AtomicU8::new(Format::Json as u8);

static CONFIG: Lazy<LogConfig> = Lazy::new(|| {
    let config = LogConfig::from_env();
    DEBUG_ENABLED.store(config.debug, Ordering::SeqCst);
    LOG_LEVEL.store(config.level as u8, Ordering::SeqCst);
    LOG_FORMAT.store(config.format as u8, Ordering::SeqCst);
    config
});

/// Read the environment now instead of on the first record.
pub fn init() {
    Lazy::force(&CONFIG);
}

/// Settings as read from the environment, before runtime overrides.
pub fn config() -> &'static LogConfig {
    &CONFIG
}

#[inline]
pub fn is_debug_enabled() -> bool {
    init();
    DEBUG_ENABLED.load(Ordering::Relaxed)
}

#[inline]
pub fn is_level_enabled(level: Level) -> bool {
    init();
    level != Level::Off && level as u8 >= LOG_LEVEL.load(Ordering::Relaxed)
}

pub fn current_level() -> Level {
    init();
    Level::from_u8(LOG_LEVEL.load(Ordering::Relaxed))
}

pub fn current_format() -> Format {
    init();
    Format::from_u8(LOG_FORMAT.load(Ordering::Relaxed))
}

pub fn set_level(level: Level) {
    init();
    LOG_LEVEL.store(level as u8, Ordering::SeqCst);
}

/// Switch output format, e.g. to [`Format::Facade`] once a host logger is installed.
pub fn set_format(format: Format) {
    init();
    LOG_FORMAT.store(format as u8, Ordering::SeqCst);
}

/// Turning debug on also lowers the level to `debug` if it was higher.
pub fn set_debug(enabled: bool) {
    init();
    DEBUG_ENABLED.store(enabled, Ordering::SeqCst);
    if enabled && current_level() > Level::Debug {
        set_level(Level::Debug);
    }
}

/// Write one record. Used by the macros; I/O errors are dropped.
#[doc(hidden)]
pub fn log(level: Level, target: &str, message: &str) {
    if !is_level_enabled(level) {
        return;
    }

    match current_format() {
        Format::Facade => {
            if let Some(level) = level.to_log_level() {
                log::log!(target: target, level, "{}", message);
            }
        }
        Format::Json => {
            let _ = writeln!(std::io::stderr().lock(), "{}", json_line(level, target, message));
        }
        text => {
            let _ = writeln!(
                std::io::stderr().lock(),
                "{}",
                text_line(text, level, target, message, config())
            );
        }
    }
}

fn text_line(format: Format, level: Level, target: &str, message: &str, config: &LogConfig) -> String {
    let compact = format == Format::Compact;
    let mut line = String::new();

    if config.timestamps {
        let pattern = if compact { "%H:%M:%S" } else { "%Y-%m-%d %H:%M:%S%.3f" };
        line.push_str(&chrono::Local::now().format(pattern).to_string());
        line.push(' ');
    }

    if compact {
        line.push_str(&level.as_str()[..1]);
        line.push(' ');
    } else {
        line.push_str(&format!("{:5} ", level.as_str()));
    }

    if config.module_path && !target.is_empty() {
        if compact {
            line.push_str(&format!("{}: ", target));
        } else {
            line.push_str(&format!("[{}] ", target));
        }
    }

    line.push_str(message);
    line
}

#[derive(Serialize)]
struct JsonRecord<'a> {
    timestamp: String,
    level: &'static str,
    target: &'a str,
    message: &'a str,
}

fn json_line(level: Level, target: &str, message: &str) -> String {
    let record = JsonRecord {
        timestamp: chrono::Utc::now().to_rfc3339(),
        level: level.as_str(),
        target,
        message,
    };
    serde_json::to_string(&record).unwrap_or_default()
}

#[doc(hidden)]
#[macro_export]
macro_rules! __emit {
    ($level:expr, $target:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($level) {
            $crate::log($level, $target, &::std::format!($($arg)+));
        }
    };
}

#[macro_export]
macro_rules! trace {
    (target: $target:expr, $($arg:tt)+) => { $crate::__emit!($crate::Level::Trace, $target, $($arg)+) };
    ($($arg:tt)+) => { $crate::__emit!($crate::Level::Trace, module_path!(), $($arg)+) };
}

/// Also emitted when `VANE_DEBUG` is set, whatever the level.
#[macro_export]
macro_rules! debug {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::is_debug_enabled() || $crate::is_level_enabled($crate::Level::Debug) {
            $crate::log($crate::Level::Debug, $target, &::std::format!($($arg)+));
        }
    };
    ($($arg:tt)+) => { $crate::debug!(target: module_path!(), $($arg)+) };
}

#[macro_export]
macro_rules! info {
    (target: $target:expr, $($arg:tt)+) => { $crate::__emit!($crate::Level::Info, $target, $($arg)+) };
    ($($arg:tt)+) => { $crate::__emit!($crate::Level::Info, module_path!(), $($arg)+) };
}

#[macro_export]
macro_rules! warn {
    (target: $target:expr, $($arg:tt)+) => { $crate::__emit!($crate::Level::Warn, $target, $($arg)+) };
    ($($arg:tt)+) => { $crate::__emit!($crate::Level::Warn, module_path!(), $($arg)+) };
}

#[macro_export]
macro_rules! error {
    (target: $target:expr, $($arg:tt)+) => { $crate::__emit!($crate::Level::Error, $target, $($arg)+) };
    ($($arg:tt)+) => { $crate::__emit!($crate::Level::Error, module_path!(), $($arg)+) };
}

#[cfg(feature = "tracing")]
pub mod tracing_compat {
    //! A `tracing` subscriber filtered at the current Vane level, unless
    //! `RUST_LOG` says otherwise.

    use super::{Level, current_level};
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{EnvFilter, fmt};

    pub fn subscriber() -> impl tracing::Subscriber {
        let directive = match current_level() {
            Level::Off => "off".to_string(),
            level => level.as_str().to_ascii_lowercase(),
        };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_ansi(false))
    }
}
