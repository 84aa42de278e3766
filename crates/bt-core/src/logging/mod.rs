//! Logging for the billtags CLI.
//!
//! Logs go to stderr as plain text or JSONL (`--log-format`); stdout carries
//! only command output. Events inside the `run` span carry its `run_id`.

pub mod config;
pub mod layer;

pub use config::{LogConfig, LogFormat, LogLevel};
pub use layer::JsonlLayer;

use std::io::IsTerminal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Standard event targets used in logging.
pub mod event_names {
    pub const RUN_STARTED: &str = "billtags.run.started";
    pub const RUN_FINISHED: &str = "billtags.run.finished";
    pub const REGISTRY_LOADED: &str = "billtags.registry.loaded";
    pub const UNCATEGORIZED: &str = "billtags.uncategorized";
    pub const INPUT_NOT_UTF8: &str = "billtags.input.not_utf8";
    pub const CHECK_FAILED: &str = "billtags.check.failed";
}

/// Build the filter for `config`.
///
/// An explicit `RUST_LOG` directive wins; otherwise every billtags crate logs
/// at the configured level.
pub fn build_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = config.level;
        EnvFilter::new(format!(
            "billtags={level},bt_core={level},bt_rules={level},bt_config={level},warn"
        ))
    })
}

/// Initialize the logging subsystem.
///
/// Must be called once at startup before any logging occurs. A second call
/// leaves the first subscriber in place.
pub fn init_logging(config: &LogConfig) {
    let filter = build_filter(config);

    let result = match config.format {
        LogFormat::Human => {
            let use_ansi = config.color && std::io::stderr().is_terminal();
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(false)
                        .with_ansi(use_ansi)
                        .without_time(),
                )
                .try_init()
        }
        LogFormat::Jsonl => tracing_subscriber::registry()
            .with(filter)
            .with(JsonlLayer::stderr())
            .try_init(),
    };

    if result.is_err() {
        tracing::debug!("logging already initialized");
    }
}

/// Generate a unique run ID for this invocation.
pub fn generate_run_id() -> String {
    let uuid = uuid::Uuid::new_v4();
    // Shorten to first 12 hex chars for readability
    format!("run-{}", &uuid.simple().to_string()[..12])
}

/// Shorten action text for log fields.
pub fn truncate_for_log(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}...(truncated)", &s[..cut]),
    }
}
