//! Application configuration.
//!
//! Settings come from an optional `config.toml` next to the binary, with
//! `ESTOQUE_HOST` / `ESTOQUE_PORT` environment variables taking precedence
//! and built-in defaults below both. The `.env` file is loaded by `main`
//! before this module runs.

use std::path::Path;

use serde::Deserialize;

use crate::errors::{Error, Result};

/// Default listen host.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default listen port, assumed by the test harness.
pub const DEFAULT_PORT: u16 = 9090;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    server: Option<ServerSection>,
}

/// The `[server]` section of config.toml
#[derive(Debug, Default, Deserialize)]
struct ServerSection {
    host: Option<String>,
    port: Option<u16>,
}

/// Resolved application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Listen host
    pub host: String,
    /// Listen port
    pub port: u16,
}

impl AppConfig {
    /// The address to bind the listener to, as `host:port`.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Loads the application configuration from `./config.toml` (if present)
/// and the environment.
///
/// # Errors
///
/// Returns `Error::Config` if config.toml exists but cannot be parsed, or
/// if `ESTOQUE_PORT` is set to something that is not a port number.
pub fn load_app_configuration() -> Result<AppConfig> {
    let file = load_config_file("config.toml")?;
    resolve(file, std::env::var("ESTOQUE_HOST").ok(), std::env::var("ESTOQUE_PORT").ok())
}

fn load_config_file<P: AsRef<Path>>(path: P) -> Result<ConfigFile> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(ConfigFile::default());
    }
    let contents = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;
    toml::from_str(&contents)
        .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))
}

fn resolve(
    file: ConfigFile,
    env_host: Option<String>,
    env_port: Option<String>,
) -> Result<AppConfig> {
    let server = file.server.unwrap_or_default();

    let host = env_host
        .or(server.host)
        .unwrap_or_else(|| DEFAULT_HOST.to_string());

    let port = match env_port {
        Some(raw) => raw
            .parse::<u16>()
            .map_err(|_| Error::Config(format!("ESTOQUE_PORT is not a valid port: {raw:?}")))?,
        None => server.port.unwrap_or(DEFAULT_PORT),
    };

    Ok(AppConfig { host, port })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn defaults_apply_without_file_or_environment() {
        let config = resolve(ConfigFile::default(), None, None).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.bind_addr(), "0.0.0.0:9090");
    }

    #[test]
    fn config_file_values_override_defaults() {
        let file: ConfigFile = toml::from_str(
            r#"
            [server]
            host = "127.0.0.1"
            port = 8080
        "#,
        )
        .unwrap();
        let config = resolve(file, None, None).unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn environment_overrides_the_config_file() {
        let file: ConfigFile = toml::from_str(
            r#"
            [server]
            port = 8080
        "#,
        )
        .unwrap();
        let config = resolve(
            file,
            Some("localhost".to_string()),
            Some("9191".to_string()),
        )
        .unwrap();
        assert_eq!(config.bind_addr(), "localhost:9191");
    }

    #[test]
    fn a_partial_server_section_keeps_the_other_default() {
        let file: ConfigFile = toml::from_str(
            r#"
            [server]
            port = 7000
        "#,
        )
        .unwrap();
        let config = resolve(file, None, None).unwrap();
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.port, 7000);
    }

    #[test]
    fn an_unparsable_port_is_a_configuration_error() {
        let result = resolve(ConfigFile::default(), None, Some("ninety".to_string()));
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
