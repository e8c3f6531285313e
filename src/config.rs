//! Service configuration parsed from environment variables.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATA_DIR: &str = "data";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// JSON files under `data_dir`.
    File,
    /// Process memory; nothing survives a restart.
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: IpAddr,
    pub port: u16,
    pub data_dir: PathBuf,
    pub storage: StorageBackend,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: '{value}' ({reason})")]
    Invalid { var: &'static str, value: String, reason: String },
}

impl AppConfig {
    /// Build config from the process environment.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `BIND_ADDR`: default `0.0.0.0`
    /// - `DATA_DIR`: default `data`
    /// - `STORAGE_BACKEND`: `file` (default) or `memory`
    ///
    /// # Errors
    ///
    /// Returns `Invalid` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `Invalid` if a variable is set but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::Invalid {
                var: "PORT",
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        let bind_addr = match lookup("BIND_ADDR") {
            Some(raw) => raw.trim().parse::<IpAddr>().map_err(|e| ConfigError::Invalid {
                var: "BIND_ADDR",
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        let data_dir = lookup("DATA_DIR")
            .filter(|v| !v.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);

        let storage = parse_backend(lookup("STORAGE_BACKEND").as_deref())?;

        Ok(Self { bind_addr, port, data_dir, storage })
    }

    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

fn parse_backend(raw: Option<&str>) -> Result<StorageBackend, ConfigError> {
    match raw.map(str::trim).unwrap_or("file") {
        "file" => Ok(StorageBackend::File),
        "memory" => Ok(StorageBackend::Memory),
        other => Err(ConfigError::Invalid {
            var: "STORAGE_BACKEND",
            value: other.to_owned(),
            reason: "expected 'file' or 'memory'".into(),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
