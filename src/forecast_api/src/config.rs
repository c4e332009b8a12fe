//! Server configuration: the forecast settings plus a `[server]` section.
//!
//! Precedence, lowest to highest: built-in defaults, the TOML file,
//! environment overrides ([`BIND_ENV`], [`DATA_ENV`]), command-line flags.

use std::{
    net::{Ipv4Addr, SocketAddr},
    path::{Path, PathBuf},
};

use anyhow::Context;
use menu_forecast::config::{ForecastConfig, normalize_config};
use serde::{Deserialize, Serialize};
use shared_utils::{
    config::ConfigError,
    env::{get_env_override, parse_env_override},
};

/// Overrides `server.bind`.
pub const BIND_ENV: &str = "MENU_FORECAST_BIND";
/// Overrides `source.path`.
pub const DATA_ENV: &str = "MENU_FORECAST_DATA";

/// Listener settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ServerCfg {
    /// Address the HTTP listener binds to.
    pub bind: SocketAddr,
}

impl Default for ServerCfg {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from((Ipv4Addr::LOCALHOST, 5000)),
        }
    }
}

/// Everything the server binary needs at startup.
#[derive(Debug, Clone, Default)]
pub struct ApiConfig {
    /// `[server]` section.
    pub server: ServerCfg,
    /// `[source]`, `[cleaning]` and `[training]` sections, normalized.
    pub forecast: ForecastConfig,
}

impl ApiConfig {
    /// Parse and normalize a configuration document.
    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        let mut table: toml::Table = toml::from_str(text).context("failed to parse server TOML")?;

        let server = match table.remove("server") {
            Some(section) => section.try_into().context("invalid [server] section")?,
            None => ServerCfg::default(),
        };

        let mut forecast: ForecastConfig = toml::Value::Table(table)
            .try_into()
            .context("invalid forecast settings")?;
        normalize_config(&mut forecast).context("normalize_config failed")?;

        Ok(Self { server, forecast })
    }

    /// Read a configuration file from disk.
    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("read config file {}", path.as_ref().display()))?;
        Self::from_toml_str(&text)
    }

    /// Apply [`BIND_ENV`] and [`DATA_ENV`] when they are set.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(bind) = parse_env_override::<SocketAddr>(BIND_ENV)? {
            self.server.bind = bind;
        }
        if let Some(path) = get_env_override(DATA_ENV) {
            self.forecast.source.path = PathBuf::from(path);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_document() {
        let cfg = ApiConfig::from_toml_str("").unwrap();
        assert_eq!(cfg.server, ServerCfg::default());
        assert_eq!(cfg.server.bind.port(), 5000);
        assert_eq!(cfg.forecast.cleaning.excluded_items, vec!["Frank Roll"]);
    }

    #[test]
    fn reads_all_sections() {
        let cfg = ApiConfig::from_toml_str(
            r#"
            [server]
            bind = "0.0.0.0:8080"

            [source]
            path = "fixtures/sales.csv"

            [training]
            split_seed = 3
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.bind, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(cfg.forecast.source.path, PathBuf::from("fixtures/sales.csv"));
        assert_eq!(cfg.forecast.training.split_seed, 3);
    }

    #[test]
    fn rejects_unknown_sections_and_bad_values() {
        assert!(ApiConfig::from_toml_str("[metrics]\nenabled = true\n").is_err());
        assert!(ApiConfig::from_toml_str("[server]\nbind = \"nowhere\"\n").is_err());
        assert!(ApiConfig::from_toml_str("[training]\ntest_fraction = 2.0\n").is_err());
    }

    #[test]
    fn reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("forecast.toml");
        std::fs::write(&path, "[server]\nbind = \"127.0.0.1:9000\"\n").unwrap();

        let cfg = ApiConfig::from_path(&path).unwrap();
        assert_eq!(cfg.server.bind.port(), 9000);
        assert!(ApiConfig::from_path(dir.path().join("missing.toml")).is_err());
    }

    #[test]
    #[serial_test::serial]
    fn env_overrides_bind_and_data() {
        unsafe {
            std::env::set_var(BIND_ENV, "0.0.0.0:7000");
            std::env::set_var(DATA_ENV, " /srv/sales.csv ");
        }
        let mut cfg = ApiConfig::default();
        let result = cfg.apply_env_overrides();
        unsafe {
            std::env::remove_var(BIND_ENV);
            std::env::remove_var(DATA_ENV);
        }
        result.unwrap();
        assert_eq!(cfg.server.bind.port(), 7000);
        assert_eq!(cfg.forecast.source.path, PathBuf::from("/srv/sales.csv"));
    }

    #[test]
    #[serial_test::serial]
    fn bad_bind_override_is_reported() {
        unsafe { std::env::set_var(BIND_ENV, "not-an-addr") };
        let result = ApiConfig::default().apply_env_overrides();
        unsafe { std::env::remove_var(BIND_ENV) };
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar { .. })));
    }
}
