//! Structured logging configuration.

use crate::config::LoggingSettings;
use std::path::PathBuf;

const DEFAULT_LEVEL: &str = "info";
const VERBOSE_LEVEL: &str = "debug";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable multi-line output.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Parses a format name, case-insensitively.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "text" => Some(Self::Pretty),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Canonical name of the format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pretty => "pretty",
            Self::Json => "json",
        }
    }
}

/// Resolved logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Output format.
    pub format: LogFormat,
    /// `EnvFilter` directives, e.g. `info` or `csv_dedup=debug,tower_http=info`.
    pub directives: String,
    /// Optional log file; stderr when `None`.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            directives: DEFAULT_LEVEL.to_string(),
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Builds logging configuration from config settings with env overrides.
    ///
    /// Precedence for the filter is `RUST_LOG`, then `CSV_DEDUP_LOG_LEVEL`,
    /// then `--verbose`, then the config file, then `info`.
    #[must_use]
    pub fn from_settings(settings: Option<&LoggingSettings>, verbose: bool) -> Self {
        Self::from_settings_with(settings, verbose, |key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_settings`] with an explicit environment lookup.
    #[must_use]
    pub fn from_settings_with(
        settings: Option<&LoggingSettings>,
        verbose: bool,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let env = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let directives = env("RUST_LOG")
            .or_else(|| env("CSV_DEDUP_LOG_LEVEL"))
            .or_else(|| verbose.then(|| VERBOSE_LEVEL.to_string()))
            .or_else(|| settings.and_then(|s| s.level.clone()))
            .unwrap_or_else(|| DEFAULT_LEVEL.to_string());

        let format = env("CSV_DEDUP_LOG_FORMAT")
            .or_else(|| settings.and_then(|s| s.format.clone()))
            .and_then(|f| LogFormat::parse(&f))
            .unwrap_or_default();

        let file = env("CSV_DEDUP_LOG_FILE")
            .or_else(|| settings.and_then(|s| s.file.clone()))
            .map(PathBuf::from);

        Self {
            format,
            directives,
            file,
        }
    }
}
