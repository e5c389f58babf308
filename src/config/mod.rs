//! Configuration management.
//!
//! Configuration is layered: built-in defaults, then an optional TOML file,
//! then `CSV_DEDUP_*` environment variables, then CLI flags (applied by the
//! binary).

use serde::Deserialize;
use std::path::Path;

/// Default bind host.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 5000;

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "CSV_DEDUP_CONFIG_PATH";

/// Main configuration for csv-dedup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DedupConfig {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Logging and metrics settings, resolved by [`crate::observability`].
    pub observability: ObservabilitySettings,
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host or address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Optional request body cap in bytes. `None` means unlimited.
    pub max_body_bytes: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_body_bytes: None,
        }
    }
}

/// Observability settings as they appear in the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ObservabilitySettings {
    /// Logging section.
    pub logging: Option<LoggingSettings>,
    /// Metrics section.
    pub metrics: Option<MetricsSettings>,
}

/// Logging section of the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoggingSettings {
    /// Output format: "pretty" or "json".
    pub format: Option<String>,
    /// Default level filter (e.g. "info", "csv_dedup=debug").
    pub level: Option<String>,
    /// Append logs to this file instead of stderr.
    pub file: Option<String>,
}

/// Metrics section of the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MetricsSettings {
    /// Whether the Prometheus exporter is installed.
    pub enabled: Option<bool>,
    /// Port for the Prometheus scrape listener.
    pub port: Option<u16>,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Server section.
    pub server: Option<ConfigFileServer>,
    /// Observability section.
    pub observability: Option<ObservabilitySettings>,
}

/// Server section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileServer {
    /// Bind host.
    pub host: Option<String>,
    /// Bind port.
    pub port: Option<u16>,
    /// Request body cap in bytes.
    pub max_body_bytes: Option<usize>,
}

impl DedupConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> crate::Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| crate::Error::OperationFailed {
                operation: "read_config_file".to_string(),
                cause: format!("{}: {e}", path.display()),
            })?;

        Self::parse_toml(&contents)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid config file.
    pub fn parse_toml(contents: &str) -> crate::Result<Self> {
        let file: ConfigFile =
            toml::from_str(contents).map_err(|e| crate::Error::OperationFailed {
                operation: "parse_config_file".to_string(),
                cause: e.to_string(),
            })?;

        Ok(Self::from_config_file(file))
    }

    /// Loads configuration from the default location.
    ///
    /// Looks for `csv-dedup/config.toml` under the platform config dir
    /// (`~/.config` on Linux, `~/Library/Application Support` on macOS).
    /// Returns default configuration if no readable file is found.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(base_dirs) = directories::BaseDirs::new() else {
            return Self::default();
        };

        let path = base_dirs.config_dir().join("csv-dedup").join("config.toml");
        if path.exists() {
            match Self::load_from_file(&path) {
                Ok(config) => return config,
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "Ignoring config file"),
            }
        }

        Self::default()
    }

    /// Converts a `ConfigFile` to `DedupConfig`.
    fn from_config_file(file: ConfigFile) -> Self {
        let mut config = Self::default();

        if let Some(server) = file.server {
            if let Some(host) = server.host {
                config.server.host = host;
            }
            if let Some(port) = server.port {
                config.server.port = port;
            }
            config.server.max_body_bytes = server.max_body_bytes;
        }
        if let Some(observability) = file.observability {
            config.observability = observability;
        }

        config
    }

    /// Applies `CSV_DEDUP_*` environment variable overrides.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary key lookup.
    ///
    /// Reads `CSV_DEDUP_HOST`, `CSV_DEDUP_PORT` and `CSV_DEDUP_MAX_BODY_BYTES`.
    /// Unparsable values are ignored with a warning.
    #[must_use]
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(host) = lookup("CSV_DEDUP_HOST").filter(|h| !h.trim().is_empty()) {
            self.server.host = host;
        }
        if let Some(port) = parse_env(&lookup, "CSV_DEDUP_PORT") {
            self.server.port = port;
        }
        if let Some(limit) = parse_env(&lookup, "CSV_DEDUP_MAX_BODY_BYTES") {
            self.server.max_body_bytes = Some(limit);
        }
        self
    }

    /// Sets the bind host.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.server.host = host.into();
        self
    }

    /// Sets the bind port.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.server.port = port;
        self
    }
}

fn parse_env<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<T> {
    let raw = lookup(key)?;
    let parsed = raw.trim().parse().ok();
    if parsed.is_none() {
        tracing::warn!(key, value = %raw, "Ignoring unparsable environment override");
    }
    parsed
}
