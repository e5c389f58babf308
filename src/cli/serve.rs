//! Serve CLI command (HTTP server).

use crate::Result;
use crate::config::ServerConfig;
use crate::server::HttpServer;

/// Serve command handler.
#[derive(Debug, Clone, Default)]
pub struct ServeCommand {
    config: ServerConfig,
}

impl ServeCommand {
    /// Creates a serve command for the given server settings.
    #[must_use]
    pub const fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Overrides the bind host when one was given on the command line.
    #[must_use]
    pub fn with_host(mut self, host: Option<String>) -> Self {
        if let Some(host) = host {
            self.config.host = host;
        }
        self
    }

    /// Overrides the bind port when one was given on the command line.
    #[must_use]
    pub const fn with_port(mut self, port: Option<u16>) -> Self {
        if let Some(port) = port {
            self.config.port = port;
        }
        self
    }

    /// Server settings after overrides.
    #[must_use]
    pub const fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Runs the HTTP server until Ctrl-C.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound or the server fails.
    pub async fn run(&self) -> Result<()> {
        HttpServer::new(self.config.clone()).start().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_applied() {
        let cmd = ServeCommand::default()
            .with_host(Some("0.0.0.0".to_string()))
            .with_port(Some(8080));
        assert_eq!(cmd.config().host, "0.0.0.0");
        assert_eq!(cmd.config().port, 8080);
    }

    #[test]
    fn test_absent_overrides_keep_config() {
        let cmd = ServeCommand::default().with_host(None).with_port(None);
        assert_eq!(cmd.config(), &ServerConfig::default());
    }
}
