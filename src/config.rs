//! Configuration parsing for carpcheck.toml files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::interface::CriticalInterface;
use crate::node::NodeRole;
use crate::validation::validate_interface;

/// Default location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "/usr/local/etc/carpcheck.toml";

/// Root configuration structure matching carpcheck.toml schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub failover: FailoverConfig,
    #[serde(default)]
    pub commands: CommandsConfig,
    #[serde(default)]
    pub timeouts: TimeoutsConfig,
    #[serde(default, rename = "interface")]
    pub interfaces: Vec<CriticalInterface>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailoverConfig {
    /// Whether this host is licensed for failover
    #[serde(default)]
    pub licensed: bool,
    /// Which node of the pair this host is
    #[serde(default = "default_node")]
    pub node: NodeRole,
}

impl Default for FailoverConfig {
    fn default() -> Self {
        Self {
            licensed: false,
            node: default_node(),
        }
    }
}

fn default_node() -> NodeRole {
    NodeRole::Primary
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandsConfig {
    #[serde(default = "default_ifconfig")]
    pub ifconfig: String,
    #[serde(default = "default_ping")]
    pub ping: String,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            ifconfig: default_ifconfig(),
            ping: default_ping(),
        }
    }
}

fn default_ifconfig() -> String {
    "/sbin/ifconfig".to_string()
}

fn default_ping() -> String {
    "/sbin/ping".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutsConfig {
    /// Upper bound on one `ifconfig` invocation (default: 5)
    #[serde(default = "default_status_query_secs")]
    pub status_query_secs: u64,
    /// Echo request timeout handed to ping (default: 1)
    #[serde(default = "default_ping_secs")]
    pub ping_secs: u64,
}

impl Default for TimeoutsConfig {
    fn default() -> Self {
        Self {
            status_query_secs: default_status_query_secs(),
            ping_secs: default_ping_secs(),
        }
    }
}

fn default_status_query_secs() -> u64 {
    5
}

fn default_ping_secs() -> u64 {
    1
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse and validate configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).context("Failed to parse TOML configuration")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        for iface in &self.interfaces {
            validate_interface(iface)
                .with_context(|| format!("Invalid interface entry '{}'", iface.name))?;
        }
        if self.timeouts.status_query_secs == 0 {
            anyhow::bail!("timeouts.status_query_secs must be at least 1");
        }
        if self.timeouts.ping_secs == 0 {
            anyhow::bail!("timeouts.ping_secs must be at least 1");
        }
        Ok(())
    }
}
