//! Logging configuration.
//!
//! The level comes from `BILLTAGS_LOG` (default `warn`, so uncategorized
//! inputs are reported) and is shifted by `-v`/`-q`. The format comes from
//! `--log-format`, then `BILLTAGS_LOG_FORMAT`. A `RUST_LOG` directive is
//! applied by the filter itself and overrides the level entirely.

use serde::{Deserialize, Serialize};

/// Environment variable selecting the log level.
pub const ENV_LOG: &str = "BILLTAGS_LOG";

/// Environment variable selecting the log format.
pub const ENV_LOG_FORMAT: &str = "BILLTAGS_LOG_FORMAT";

/// Log output format on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Plain text lines.
    #[default]
    Human,
    /// One JSON object per event.
    Jsonl,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human" => Ok(LogFormat::Human),
            "jsonl" | "json" => Ok(LogFormat::Jsonl),
            other => Err(format!("unknown log format: {other}")),
        }
    }
}

/// Verbosity, ordered from most to least verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
    Off,
}

const LEVELS: [LogLevel; 6] = [
    LogLevel::Trace,
    LogLevel::Debug,
    LogLevel::Info,
    LogLevel::Warn,
    LogLevel::Error,
    LogLevel::Off,
];

impl LogLevel {
    /// Directive text understood by `EnvFilter`.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }

    /// Move `steps` levels; negative is more verbose. Saturates at both ends.
    pub fn shifted(self, steps: i32) -> Self {
        let pos = LEVELS.iter().position(|l| *l == self).unwrap_or(3) as i32;
        let max = LEVELS.len() as i32 - 1;
        LEVELS[(pos + steps).clamp(0, max) as usize]
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        match s.as_str() {
            "warning" => Ok(LogLevel::Warn),
            "quiet" | "none" => Ok(LogLevel::Off),
            _ => LEVELS
                .into_iter()
                .find(|l| l.as_str() == s)
                .ok_or_else(|| format!("unknown log level: {s}")),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved logging settings for one run.
#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    pub format: LogFormat,
    pub level: LogLevel,
    /// Whether human output may use ANSI colors.
    pub color: bool,
}

impl LogConfig {
    /// Resolve from the process environment and CLI flags.
    pub fn from_env(verbose: u8, quiet: u8, format: Option<LogFormat>, color: bool) -> Self {
        Self::resolve(|key| std::env::var(key).ok(), verbose, quiet, format, color)
    }

    /// Resolve with an explicit environment lookup.
    ///
    /// Unparseable environment values are ignored.
    pub fn resolve<F>(env: F, verbose: u8, quiet: u8, format: Option<LogFormat>, color: bool) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = env(ENV_LOG)
            .and_then(|v| v.parse::<LogLevel>().ok())
            .unwrap_or_default();
        let format = format
            .or_else(|| env(ENV_LOG_FORMAT).and_then(|v| v.parse().ok()))
            .unwrap_or_default();

        LogConfig {
            format,
            level: base.shifted(i32::from(quiet) - i32::from(verbose)),
            color,
        }
    }
}
