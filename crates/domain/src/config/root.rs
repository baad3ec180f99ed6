use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::multicast::MulticastConfig;
use super::relay::RelayConfig;
use super::server::ServerConfig;
use crate::multicast::{parse_multicast_groups, MulticastAddr};

const MIN_READ_BUFFER_SIZE: usize = 512;
const MAX_READ_BUFFER_SIZE: usize = 65535;

/// Main configuration structure for tunrelay
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listener configuration (port, bind address)
    #[serde(default)]
    pub server: ServerConfig,

    /// DNS relay configuration
    #[serde(default)]
    pub relay: RelayConfig,

    /// Multicast forwarding groups
    #[serde(default)]
    pub multicast: MulticastConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. tunrelay.toml in current directory
    /// 3. /etc/tunrelay/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if let Some(path) = Self::get_config_path() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(upstream) = overrides.upstream {
            self.relay.upstream = upstream;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        self.upstream_addr()?;

        if self.relay.query_timeout == 0 {
            return Err(ConfigError::Validation(
                "Query timeout cannot be 0".to_string(),
            ));
        }

        if !(MIN_READ_BUFFER_SIZE..=MAX_READ_BUFFER_SIZE).contains(&self.relay.read_buffer_size) {
            return Err(ConfigError::Validation(format!(
                "Read buffer size {} outside {}..={}",
                self.relay.read_buffer_size, MIN_READ_BUFFER_SIZE, MAX_READ_BUFFER_SIZE
            )));
        }

        self.multicast_groups()?;

        Ok(())
    }

    /// Upstream resolver as a socket address
    pub fn upstream_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.relay.upstream.parse().map_err(|_| {
            ConfigError::Validation(format!(
                "Upstream '{}' is not an ip:port address",
                self.relay.upstream
            ))
        })
    }

    /// Typed multicast groups; fails if any configured token is invalid
    pub fn multicast_groups(&self) -> Result<Vec<MulticastAddr>, ConfigError> {
        parse_multicast_groups(&self.multicast.groups)
            .map_err(|e| ConfigError::Validation(format!("multicast.groups: {}", e)))
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        if std::path::Path::new("tunrelay.toml").exists() {
            Some("tunrelay.toml".to_string())
        } else if std::path::Path::new("/etc/tunrelay/config.toml").exists() {
            Some("/etc/tunrelay/config.toml".to_string())
        } else {
            None
        }
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub bind_address: Option<String>,
    pub upstream: Option<String>,
    pub log_level: Option<String>,
}
