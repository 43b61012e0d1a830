// SPDX-License-Identifier: GPL-3.0-or-later
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    /// Sent verbatim as the `User-Agent` header of every request.
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://api.discogs.com/".to_string(),
            user_agent: concat!("discogs-ws/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TelemetryConfig {
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    pub client: ClientConfig,
    pub telemetry: TelemetryConfig,
}

/// Load configuration from defaults, optional TOML file, and environment overrides (prefix: DISCOGS_WS_).
pub fn load(config_path: Option<&Path>) -> Result<AppConfig> {
    let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

    if let Some(path) = config_path {
        figment = figment.merge(Toml::file(path));
    }

    figment = figment.merge(Env::prefixed("DISCOGS_WS_").split("__"));

    let config: AppConfig = figment.extract()?;
    info!(target: "config", "configuration loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults() {
        Jail::expect_with(|_jail| {
            let config = load(None).map_err(|e| e.to_string())?;
            assert_eq!(config, AppConfig::default());
            assert_eq!(config.client.base_url, "http://api.discogs.com/");
            assert!(config.client.user_agent.starts_with("discogs-ws/"));
            assert_eq!(config.client.timeout(), Duration::from_secs(30));
            Ok(())
        });
    }

    #[test]
    fn test_toml_file_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "discogs-ws.toml",
                r#"
                    [client]
                    user_agent = "MyCollection/2.1 +https://example.org"
                    timeout_secs = 5

                    [telemetry]
                    log_level = "debug"
                "#,
            )?;

            let config = load(Some(Path::new("discogs-ws.toml"))).map_err(|e| e.to_string())?;
            assert_eq!(config.client.user_agent, "MyCollection/2.1 +https://example.org");
            assert_eq!(config.client.timeout_secs, 5);
            assert_eq!(config.client.base_url, "http://api.discogs.com/");
            assert_eq!(config.telemetry.log_level, "debug");
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "discogs-ws.toml",
                r#"
                    [client]
                    user_agent = "FromFile/1.0"
                "#,
            )?;
            jail.set_env("DISCOGS_WS_CLIENT__USER_AGENT", "FromEnv/1.0");
            jail.set_env("DISCOGS_WS_CLIENT__BASE_URL", "http://localhost:8080/");

            let config = load(Some(Path::new("discogs-ws.toml"))).map_err(|e| e.to_string())?;
            assert_eq!(config.client.user_agent, "FromEnv/1.0");
            assert_eq!(config.client.base_url, "http://localhost:8080/");
            Ok(())
        });
    }

    #[test]
    fn test_invalid_value_is_an_error() {
        Jail::expect_with(|jail| {
            jail.set_env("DISCOGS_WS_CLIENT__TIMEOUT_SECS", "soon");
            assert!(load(None).is_err());
            Ok(())
        });
    }
}
