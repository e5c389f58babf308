//! Observability: logging, request correlation and metrics.

mod logging;
mod metrics;
mod request_context;

pub use self::logging::{LogFormat, LoggingConfig};
pub use self::metrics::{MetricsConfig, install_prometheus};
pub use self::request_context::{
    REQUEST_ID_HEADER, RequestContext, RequestContextGuard, current_request_id,
    enter_request_context, scope_request_context,
};

use crate::config::ObservabilitySettings;
use crate::{Error, Result};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::{Arc, Mutex, OnceLock};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Full observability configuration.
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Logging configuration.
    pub logging: LoggingConfig,
    /// Metrics configuration.
    pub metrics: MetricsConfig,
    /// Whether to expose metrics via HTTP listener.
    pub metrics_expose: bool,
}

/// Options for initialization supplied by the CLI.
#[derive(Debug, Clone, Copy)]
pub struct InitOptions {
    /// Whether verbose output was requested via CLI.
    pub verbose: bool,
    /// Whether to expose metrics via HTTP listener.
    pub metrics_expose: bool,
}

/// Handle for observability runtime components.
#[derive(Debug)]
pub struct ObservabilityHandle {
    metrics_addr: Option<SocketAddr>,
}

impl ObservabilityHandle {
    /// Address of the Prometheus scrape listener, when one was started.
    #[must_use]
    pub const fn metrics_addr(&self) -> Option<SocketAddr> {
        self.metrics_addr
    }
}

static OBSERVABILITY_INIT: OnceLock<()> = OnceLock::new();

/// Initializes observability from config settings with env overrides.
///
/// # Errors
///
/// Returns an error if observability has already been initialized or if any
/// component fails to initialize.
pub fn init_from_config(
    settings: &ObservabilitySettings,
    options: InitOptions,
) -> Result<ObservabilityHandle> {
    init(build_config(settings, options))
}

fn build_config(settings: &ObservabilitySettings, options: InitOptions) -> ObservabilityConfig {
    ObservabilityConfig {
        logging: LoggingConfig::from_settings(settings.logging.as_ref(), options.verbose),
        metrics: MetricsConfig::from_settings(settings.metrics.as_ref()),
        metrics_expose: options.metrics_expose,
    }
}

/// Initializes logging and metrics for the process.
///
/// Logs go to stderr unless a log file is configured, so stdout stays free
/// for command output.
///
/// # Errors
///
/// Returns an error if observability has already been initialized or if any
/// component fails to initialize.
pub fn init(config: ObservabilityConfig) -> Result<ObservabilityHandle> {
    if OBSERVABILITY_INIT.get().is_some() {
        return Err(Error::OperationFailed {
            operation: "observability_init".to_string(),
            cause: "observability already initialized".to_string(),
        });
    }

    let filter = EnvFilter::try_new(&config.logging.directives).map_err(|e| {
        Error::OperationFailed {
            operation: "parse_log_filter".to_string(),
            cause: format!("{}: {e}", config.logging.directives),
        }
    })?;

    match (&config.logging.file, config.logging.format) {
        (Some(log_file), LogFormat::Json) => {
            let writer = open_log_file(log_file)?;
            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(writer)
                        .with_current_span(true)
                        .with_span_list(true)
                        .with_target(true),
                )
                .with(filter)
                .try_init()
                .map_err(init_error)?;
        },
        (Some(log_file), LogFormat::Pretty) => {
            let writer = open_log_file(log_file)?;
            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false)
                        .with_target(true),
                )
                .with(filter)
                .try_init()
                .map_err(init_error)?;
        },
        (None, LogFormat::Json) => {
            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(io::stderr)
                        .with_current_span(true)
                        .with_span_list(true)
                        .with_target(true),
                )
                .with(filter)
                .try_init()
                .map_err(init_error)?;
        },
        (None, LogFormat::Pretty) => {
            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(io::stderr)
                        .with_target(true),
                )
                .with(filter)
                .try_init()
                .map_err(init_error)?;
        },
    }

    let metrics_addr = install_prometheus(&config.metrics, config.metrics_expose)?;
    if let Some(addr) = metrics_addr {
        tracing::info!(%addr, "Prometheus metrics listener started");
    }

    OBSERVABILITY_INIT
        .set(())
        .map_err(|()| Error::OperationFailed {
            operation: "observability_init".to_string(),
            cause: "failed to mark observability initialized".to_string(),
        })?;

    Ok(ObservabilityHandle { metrics_addr })
}

/// Thread-safe file writer for logging.
#[derive(Clone)]
struct LogFileWriter {
    file: Arc<Mutex<File>>,
}

impl Write for LogFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .file
            .lock()
            .map_err(|e| io::Error::other(e.to_string()))?;
        guard.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|e| io::Error::other(e.to_string()))?;
        guard.flush()
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogFileWriter {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Opens a log file for appending, creating parent directories.
fn open_log_file(path: &Path) -> Result<LogFileWriter> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::OperationFailed {
            operation: "create_log_dir".to_string(),
            cause: e.to_string(),
        })?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| Error::OperationFailed {
            operation: "open_log_file".to_string(),
            cause: format!("{}: {}", path.display(), e),
        })?;

    Ok(LogFileWriter {
        file: Arc::new(Mutex::new(file)),
    })
}

#[allow(clippy::needless_pass_by_value)]
fn init_error(e: tracing_subscriber::util::TryInitError) -> Error {
    Error::OperationFailed {
        operation: "observability_init".to_string(),
        cause: e.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_open_log_file_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("dedup.log");

        let mut writer = open_log_file(&path).unwrap();
        writer.write_all(b"hello\n").unwrap();
        writer.flush().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\n");
    }

    #[test]
    fn test_build_config_respects_options() {
        let config = build_config(
            &ObservabilitySettings::default(),
            InitOptions {
                verbose: false,
                metrics_expose: true,
            },
        );
        assert!(config.metrics_expose);
    }
}
