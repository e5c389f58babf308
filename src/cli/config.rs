//! Config CLI command.

use crate::config::DedupConfig;
use crate::observability::{LoggingConfig, MetricsConfig};
use std::fmt::Write as _;

/// Config command handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigCommand {
    verbose: bool,
}

impl ConfigCommand {
    /// Creates a config command.
    #[must_use]
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Renders the effective configuration, with logging and metrics
    /// resolved against the process environment.
    #[must_use]
    pub fn render(&self, config: &DedupConfig) -> String {
        self.render_with(config, |key| std::env::var(key).ok())
    }

    /// Same as [`Self::render`] with an explicit environment lookup.
    #[must_use]
    pub fn render_with(
        &self,
        config: &DedupConfig,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> String {
        let logging = LoggingConfig::from_settings_with(
            config.observability.logging.as_ref(),
            self.verbose,
            &lookup,
        );
        let metrics = MetricsConfig::from_settings_with(config.observability.metrics.as_ref(), &lookup);

        let mut out = String::new();
        let _ = writeln!(out, "Current Configuration");
        let _ = writeln!(out, "=====================");
        let _ = writeln!(out);
        let _ = writeln!(out, "Server:");
        let _ = writeln!(out, "  Host: {}", config.server.host);
        let _ = writeln!(out, "  Port: {}", config.server.port);
        let _ = writeln!(
            out,
            "  Max Body Bytes: {}",
            config
                .server
                .max_body_bytes
                .map_or_else(|| "(unlimited)".to_string(), |n| n.to_string())
        );
        let _ = writeln!(out);
        let _ = writeln!(out, "Logging:");
        let _ = writeln!(out, "  Format: {}", logging.format.as_str());
        let _ = writeln!(out, "  Filter: {}", logging.directives);
        let _ = writeln!(
            out,
            "  File: {}",
            logging
                .file
                .as_ref()
                .map_or_else(|| "(stderr)".to_string(), |p| p.display().to_string())
        );
        let _ = writeln!(out);
        let _ = writeln!(out, "Metrics:");
        let _ = writeln!(out, "  Enabled: {}", metrics.enabled);
        let _ = writeln!(out, "  Listen Address: {}", metrics.listen_addr);
        out
    }
}
