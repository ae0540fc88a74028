//! Tracing/logging initialization.
//!
//! `RUST_LOG` always wins over the configured default filter.

use core::str::FromStr;

use tracing_subscriber::EnvFilter;

/// Output encoding for log lines.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per line (servers).
    #[default]
    Json,
    /// Human-readable compact lines (interactive use).
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" | "text" => Ok(LogFormat::Pretty),
            other => Err(format!("unknown log format '{other}' (expected json or pretty)")),
        }
    }
}

/// Where log lines are written.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum LogTarget {
    #[default]
    Stdout,
    /// Keeps stdout free for interactive screens.
    Stderr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservabilityConfig {
    pub format: LogFormat,
    pub target: LogTarget,
    /// Filter used when `RUST_LOG` is unset or invalid.
    pub default_filter: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Json,
            target: LogTarget::Stdout,
            default_filter: "info".to_string(),
        }
    }
}

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false);

    let _ = match (config.format, config.target) {
        (LogFormat::Json, LogTarget::Stdout) => builder.json().try_init(),
        (LogFormat::Json, LogTarget::Stderr) => builder.json().with_writer(std::io::stderr).try_init(),
        (LogFormat::Pretty, LogTarget::Stdout) => builder.compact().try_init(),
        (LogFormat::Pretty, LogTarget::Stderr) => builder.compact().with_writer(std::io::stderr).try_init(),
    };
}
