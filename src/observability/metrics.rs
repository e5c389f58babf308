//! Prometheus metrics.
//!
//! Counters and histograms are recorded through the `metrics` facade and
//! are no-ops until [`install_prometheus`] installs a recorder.

use crate::config::MetricsSettings;
use crate::{Error, Result};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

const DEFAULT_METRICS_PORT: u16 = 9090;

/// Metrics configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsConfig {
    /// Whether metrics are enabled.
    pub enabled: bool,
    /// Address to bind the Prometheus scrape listener.
    pub listen_addr: SocketAddr,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            listen_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_METRICS_PORT),
        }
    }
}

impl MetricsConfig {
    /// Builds metrics configuration from config settings with env overrides.
    #[must_use]
    pub fn from_settings(settings: Option<&MetricsSettings>) -> Self {
        Self::from_settings_with(settings, |key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_settings`] with an explicit environment lookup.
    ///
    /// Reads `CSV_DEDUP_METRICS_ENABLED` and `CSV_DEDUP_METRICS_PORT`.
    #[must_use]
    pub fn from_settings_with(
        settings: Option<&MetricsSettings>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let mut enabled = settings.and_then(|s| s.enabled).unwrap_or(false);
        let mut port = settings
            .and_then(|s| s.port)
            .unwrap_or(DEFAULT_METRICS_PORT);

        if let Some(value) = lookup("CSV_DEDUP_METRICS_ENABLED").and_then(|v| parse_bool(&v)) {
            enabled = value;
        }
        if let Some(value) = lookup("CSV_DEDUP_METRICS_PORT").and_then(|v| v.trim().parse().ok()) {
            port = value;
        }

        Self {
            enabled,
            listen_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Installs the Prometheus recorder with an HTTP scrape listener.
///
/// Does nothing unless metrics are enabled and `expose` is set; short-lived
/// commands have nobody to scrape them.
///
/// Returns the listener address when the exporter was installed.
pub fn install_prometheus(config: &MetricsConfig, expose: bool) -> Result<Option<SocketAddr>> {
    if !config.enabled || !expose {
        return Ok(None);
    }

    PrometheusBuilder::new()
        .with_http_listener(config.listen_addr)
        .install()
        .map_err(|e| Error::OperationFailed {
            operation: "metrics_exporter_install".to_string(),
            cause: e.to_string(),
        })?;

    describe_metrics();
    Ok(Some(config.listen_addr))
}

fn describe_metrics() {
    metrics::describe_counter!(
        "dedup_requests_total",
        "Deduplication requests by outcome"
    );
    metrics::describe_counter!(
        "dedup_rows_processed_total",
        "Data rows read from submitted CSV"
    );
    metrics::describe_counter!(
        "dedup_rows_removed_total",
        "Data rows dropped as duplicates"
    );
    metrics::describe_histogram!(
        "dedup_request_duration_seconds",
        metrics::Unit::Seconds,
        "Time spent handling a deduplication request"
    );
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MetricsConfig::from_settings_with(None, |_| None);
        assert_eq!(config, MetricsConfig::default());
        assert!(!config.enabled);
        assert_eq!(config.listen_addr.port(), 9090);
    }

    #[test]
    fn test_settings_and_env() {
        let settings = MetricsSettings {
            enabled: Some(false),
            port: Some(9100),
        };
        let config = MetricsConfig::from_settings_with(Some(&settings), |key| match key {
            "CSV_DEDUP_METRICS_ENABLED" => Some("yes".to_string()),
            _ => None,
        });
        assert!(config.enabled);
        assert_eq!(config.listen_addr.port(), 9100);
    }

    #[test]
    fn test_disabled_is_not_installed() {
        let config = MetricsConfig::default();
        assert_eq!(install_prometheus(&config, true).unwrap(), None);

        let config = MetricsConfig {
            enabled: true,
            ..MetricsConfig::default()
        };
        assert_eq!(install_prometheus(&config, false).unwrap(), None);
    }
}
