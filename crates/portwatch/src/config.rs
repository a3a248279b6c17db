//! File + environment configuration for the CLI.
//!
//! TOML file (`~/.config/portwatch/config.toml` via `directories`) merged
//! with `PORTWATCH_`-prefixed environment variables through figment, then
//! overridden by CLI flags and translated into a `CoordinatorConfig`.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use portwatch_core::CoordinatorConfig;
use portwatch_core::config::{DEFAULT_POLL_INTERVAL, DEFAULT_PORT, DEFAULT_TIMEOUT};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Top-level TOML configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Portal hostname or IP.
    pub host: Option<String>,

    /// Portal port.
    pub port: Option<u16>,

    /// Polling period in seconds.
    pub poll_interval_secs: Option<u64>,

    /// Per-request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

/// Path of the user config file, when a home directory exists.
pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "portwatch").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Load config from file + environment. A missing file is fine; a
/// malformed one is an error the user should see.
pub fn load_config() -> Result<Config, CliError> {
    load_config_from(config_path())
}

fn load_config_from(path: Option<PathBuf>) -> Result<Config, CliError> {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));
    if let Some(path) = path {
        figment = figment.merge(Toml::file(path));
    }
    Ok(figment.merge(Env::prefixed("PORTWATCH_")).extract()?)
}

/// Resolve the effective coordinator config. CLI flags win over the
/// file/env layers; the host is the one thing that must come from
/// somewhere.
pub fn resolve(global: &GlobalOpts, config: &Config) -> Result<CoordinatorConfig, CliError> {
    let host = global
        .host
        .clone()
        .or_else(|| config.host.clone())
        .ok_or_else(|| CliError::Validation {
            field: "host".into(),
            reason: "no portal host configured (use --host or the config file)".into(),
        })?;

    if host.is_empty() {
        return Err(CliError::Validation {
            field: "host".into(),
            reason: "host must not be empty".into(),
        });
    }

    Ok(CoordinatorConfig {
        host,
        port: global.port.or(config.port).unwrap_or(DEFAULT_PORT),
        poll_interval: config
            .poll_interval_secs
            .map_or(DEFAULT_POLL_INTERVAL, Duration::from_secs),
        timeout: config.timeout_secs.map_or(DEFAULT_TIMEOUT, Duration::from_secs),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn global(host: Option<&str>, port: Option<u16>) -> GlobalOpts {
        GlobalOpts {
            host: host.map(String::from),
            port,
            output: crate::cli::OutputFormat::Table,
            verbose: 0,
        }
    }

    #[test]
    fn flag_overrides_file() {
        let config = Config {
            host: Some("portal.lan".into()),
            port: Some(8080),
            ..Config::default()
        };

        let resolved = resolve(&global(Some("10.0.0.2"), None), &config).unwrap();
        assert_eq!(resolved.host, "10.0.0.2");
        assert_eq!(resolved.port, 8080);
    }

    #[test]
    fn defaults_fill_gaps() {
        let resolved = resolve(&global(Some("portal.lan"), None), &Config::default()).unwrap();
        assert_eq!(resolved.port, 3000);
        assert_eq!(resolved.poll_interval, Duration::from_secs(10));
        assert_eq!(resolved.timeout, Duration::from_secs(10));
    }

    #[test]
    fn missing_host_is_an_error() {
        let result = resolve(&global(None, None), &Config::default());
        assert!(matches!(result, Err(CliError::Validation { .. })));
    }

    #[test]
    fn config_file_round_trips_through_figment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "host = \"portal.lan\"\nport = 8080\npoll_interval_secs = 30\n")
            .unwrap();

        let config = load_config_from(Some(path)).unwrap();
        assert_eq!(config.host.as_deref(), Some("portal.lan"));
        assert_eq!(config.port, Some(8080));
        assert_eq!(config.poll_interval_secs, Some(30));
        assert!(config.timeout_secs.is_none());
    }

    #[test]
    fn missing_config_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(Some(dir.path().join("absent.toml"))).unwrap();
        assert!(config.host.is_none());
        assert!(config.port.is_none());
    }
}
