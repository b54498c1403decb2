//! Server configuration
//!
//! Configuration is read from an optional YAML file and then overridden by
//! environment variables. Every field has a default, so an empty file (or
//! no file at all) yields a working configuration serving the current
//! directory on port 8080.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming the YAML config file.
pub const CONFIG_PATH_VAR: &str = "SSTT_CONFIG";

/// Config file used when `SSTT_CONFIG` is not set.
pub const DEFAULT_CONFIG_PATH: &str = "sstt.yaml";

/// Highest port the server agrees to listen on.
pub const MAX_PORT: u16 = 60000;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    /// Extra `extension -> content type` pairs layered over the built-in table.
    pub mime_types: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    pub document_root: PathBuf,
    pub read_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Append log lines to this file instead of stdout.
    pub file: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            document_root: PathBuf::from("."),
            read_timeout_secs: 5,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Config {
    /// Loads the config file (if present) and applies environment overrides.
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH_VAR)
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let mut cfg = if Path::new(&path).exists() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        cfg.apply_overrides(|key| std::env::var(key).ok());
        Ok(cfg)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&text)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        // serde_yaml rejects an empty document, treat it as "all defaults"
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    /// Overrides fields from a key lookup (normally the process environment).
    ///
    /// Recognised keys: `LISTEN`, `DOCUMENT_ROOT`, `READ_TIMEOUT_SECS`,
    /// `LOG_LEVEL`, `LOG_FILE`. Unparsable timeouts are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup("LISTEN") {
            self.server.listen_addr = addr;
        }
        if let Some(root) = lookup("DOCUMENT_ROOT") {
            self.server.document_root = PathBuf::from(root);
        }
        if let Some(secs) = lookup("READ_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.server.read_timeout_secs = secs;
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(file) = lookup("LOG_FILE") {
            self.logging.file = Some(PathBuf::from(file));
        }
    }

    /// Checks the listen address and document root before anything is bound.
    pub fn validate(&self) -> Result<()> {
        let addr = self.listen_socket_addr()?;
        if addr.port() == 0 || addr.port() > MAX_PORT {
            anyhow::bail!(
                "invalid port {}, expected a port between 1 and {}",
                addr.port(),
                MAX_PORT
            );
        }

        let root = &self.server.document_root;
        if !root.is_dir() {
            anyhow::bail!("document root {} is not a directory", root.display());
        }

        if self.server.read_timeout_secs == 0 {
            anyhow::bail!("read_timeout_secs must be greater than zero");
        }

        self.log_level()?;
        Ok(())
    }

    pub fn listen_socket_addr(&self) -> Result<SocketAddr> {
        self.server
            .listen_addr
            .parse()
            .with_context(|| format!("invalid listen address {:?}", self.server.listen_addr))
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.server.read_timeout_secs)
    }

    pub fn log_level(&self) -> Result<tracing::Level> {
        self.logging
            .level
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid log level {:?}", self.logging.level))
    }
}
