use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::net::SocketAddr;

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::resolver::ResolverConfig;
use super::router::RouterConfig;

/// Main configuration structure for Ferrous Route
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Id of the resolver or router that receives incoming queries
    #[serde(default = "default_root")]
    pub root: String,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Terminal resolvers (upstream forwarders, static responders)
    #[serde(default)]
    pub resolvers: Vec<ResolverConfig>,

    /// Routers, in dependency order
    #[serde(default)]
    pub routers: Vec<RouterConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: default_root(),
            logging: LoggingConfig::default(),
            resolvers: vec![],
            routers: vec![],
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. ferrous-route.toml in current directory
    /// 3. /etc/ferrous-route/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("ferrous-route.toml").exists() {
            Self::from_file("ferrous-route.toml")?
        } else if std::path::Path::new("/etc/ferrous-route/config.toml").exists() {
            Self::from_file("/etc/ferrous-route/config.toml")?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(json) = overrides.json_logs {
            self.logging.json = json;
        }
        if let Some(root) = overrides.root {
            self.root = root;
        }
    }

    /// Validate the resolver graph described by the configuration.
    ///
    /// Rule syntax (patterns, mnemonics, CIDRs) is checked when the routers
    /// are built; this only checks the shape of the graph.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut defined: HashSet<&str> = HashSet::new();

        for resolver in &self.resolvers {
            let id = resolver.id();
            if id.is_empty() {
                return Err(ConfigError::Validation(
                    "Resolver id cannot be empty".to_string(),
                ));
            }
            if !defined.insert(id) {
                return Err(ConfigError::Validation(format!(
                    "Duplicate id '{}'",
                    id
                )));
            }
            if let ResolverConfig::Upstream { address, .. } = resolver {
                address.parse::<SocketAddr>().map_err(|e| {
                    ConfigError::Validation(format!(
                        "Resolver '{}' has invalid address '{}': {}",
                        id, address, e
                    ))
                })?;
            }
        }

        // A router may only point at ids defined above it, which rules out cycles.
        for router in &self.routers {
            if router.id.is_empty() {
                return Err(ConfigError::Validation(
                    "Router id cannot be empty".to_string(),
                ));
            }
            for route in &router.routes {
                if !defined.contains(route.resolver.as_str()) {
                    return Err(ConfigError::Validation(format!(
                        "Router '{}' references unknown or later-defined resolver '{}'",
                        router.id, route.resolver
                    )));
                }
            }
            if !defined.insert(router.id.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "Duplicate id '{}'",
                    router.id
                )));
            }
        }

        if !defined.contains(self.root.as_str()) {
            return Err(ConfigError::Validation(format!(
                "Root '{}' is not a configured resolver or router",
                self.root
            )));
        }

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub log_level: Option<String>,
    pub json_logs: Option<bool>,
    pub root: Option<String>,
}

fn default_root() -> String {
    "main".to_string()
}
