//! Configuration management for rehabtrack.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration directory name.
const CONFIG_DIR_NAME: &str = "rehabtrack";

/// Prefix for configuration environment variables.
const ENV_PREFIX: &str = "REHABTRACK_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `REHABTRACK_`, sections separated
///    by `__`, e.g. `REHABTRACK_SERVER__PORT`)
/// 2. TOML config file at `~/.config/rehabtrack/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server configuration.
    pub server: ServerConfig,
    /// Session configuration.
    pub session: SessionConfig,
    /// Page chrome configuration.
    pub ui: UiConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to.
    pub host: IpAddr,
    /// Port to listen on.
    pub port: u16,
}

/// Session-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Name of the cookie carrying the session identifier.
    pub cookie_name: String,
    /// Minutes of inactivity after which a session and its data are dropped.
    /// Set to 0 to keep sessions until the server stops.
    pub idle_timeout_minutes: u64,
    /// Seconds between sweeps for idle sessions.
    pub prune_interval_seconds: u64,
}

/// Page chrome configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Title shown in the browser tab.
    pub title: String,
    /// Text shown at the bottom of every page.
    pub footer: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 8501,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "rehabtrack_session".to_string(),
            idle_timeout_minutes: 120,
            prune_interval_seconds: 60,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            title: "Rehabilitation Tracker".to_string(),
            footer: "© 2025 Rehabilitation Management App. All rights reserved Ndagijimana Patrick."
                .to_string(),
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::ConfigValidation {
                message: "server.port must be greater than 0".to_string(),
            });
        }

        if !is_valid_cookie_name(&self.session.cookie_name) {
            return Err(Error::ConfigValidation {
                message: format!(
                    "session.cookie_name {:?} is not a valid cookie name",
                    self.session.cookie_name
                ),
            });
        }

        if self.session.prune_interval_seconds == 0 {
            return Err(Error::ConfigValidation {
                message: "session.prune_interval_seconds must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Get the socket address to bind.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.server.host, self.server.port)
    }

    /// Get the session idle timeout, or `None` if sessions never expire.
    #[must_use]
    pub fn idle_timeout(&self) -> Option<Duration> {
        if self.session.idle_timeout_minutes == 0 {
            None
        } else {
            Some(Duration::from_secs(
                self.session.idle_timeout_minutes.saturating_mul(60),
            ))
        }
    }

    /// Get the interval between idle-session sweeps.
    #[must_use]
    pub fn prune_interval(&self) -> Duration {
        Duration::from_secs(self.session.prune_interval_seconds)
    }
}

/// Cookie names are RFC 6265 tokens: visible ASCII minus separators.
fn is_valid_cookie_name(name: &str) -> bool {
    const SEPARATORS: &[u8] = b"()<>@,;:\\\"/[]?={} \t";
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_graphic() && !SEPARATORS.contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.port, 8501);
        assert!(config.server.host.is_loopback());
        assert_eq!(config.session.cookie_name, "rehabtrack_session");
        assert_eq!(config.ui.title, "Rehabilitation Tracker");
    }

    #[test]
    fn test_default_session_config() {
        let session = SessionConfig::default();

        assert_eq!(session.idle_timeout_minutes, 120);
        assert_eq!(session.prune_interval_seconds, 60);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("server.port"));
    }

    #[test]
    fn test_validate_bad_cookie_names() {
        for name in ["", "has space", "semi;colon", "eq=uals", "ünï"] {
            let mut config = Config::default();
            config.session.cookie_name = name.to_string();

            let err = config.validate().unwrap_err().to_string();
            assert!(err.contains("cookie_name"), "accepted {name:?}");
        }
    }

    #[test]
    fn test_validate_zero_prune_interval() {
        let mut config = Config::default();
        config.session.prune_interval_seconds = 0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("prune_interval_seconds"));
    }

    #[test]
    fn test_bind_addr() {
        let config = Config::default();
        assert_eq!(config.bind_addr(), "127.0.0.1:8501".parse().unwrap());
    }

    #[test]
    fn test_idle_timeout_none_when_zero() {
        let mut config = Config::default();
        config.session.idle_timeout_minutes = 0;

        assert!(config.idle_timeout().is_none());
    }

    #[test]
    fn test_idle_timeout_some_when_set() {
        let config = Config::default();
        assert_eq!(config.idle_timeout(), Some(Duration::from_secs(120 * 60)));
    }

    #[test]
    fn test_idle_timeout_saturates() {
        let mut config = Config::default();
        config.session.idle_timeout_minutes = u64::MAX / 10;

        assert!(config.validate().is_ok());
        assert_eq!(config.idle_timeout(), Some(Duration::from_secs(u64::MAX)));
    }

    #[test]
    fn test_default_footer() {
        let ui = UiConfig::default();
        assert!(ui.footer.ends_with("All rights reserved Ndagijimana Patrick."));
    }

    #[test]
    fn test_prune_interval() {
        let config = Config::default();
        assert_eq!(config.prune_interval(), Duration::from_secs(60));
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("rehabtrack"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        let config = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml"))).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_toml_and_env() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "rehab.toml",
                r#"
                [server]
                port = 9000

                [session]
                cookie_name = "rt"
                "#,
            )?;
            jail.set_env("REHABTRACK_SESSION__IDLE_TIMEOUT_MINUTES", "5");

            let config = Config::load_from(Some(PathBuf::from("rehab.toml")))
                .map_err(|e| e.to_string())?;
            assert_eq!(config.server.port, 9000);
            assert_eq!(config.session.cookie_name, "rt");
            assert_eq!(config.session.idle_timeout_minutes, 5);
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("rehab.toml", "[server]\nport = 0\n")?;

            let result = Config::load_from(Some(PathBuf::from("rehab.toml")));
            assert!(matches!(result, Err(Error::ConfigValidation { .. })));
            Ok(())
        });
    }

    #[test]
    fn test_session_config_deserialize() {
        let json = r#"{"cookie_name": "sid", "idle_timeout_minutes": 0}"#;
        let session: SessionConfig = serde_json::from_str(json).unwrap();
        assert_eq!(session.cookie_name, "sid");
        assert_eq!(session.idle_timeout_minutes, 0);
        assert_eq!(session.prune_interval_seconds, 60);
    }

    #[test]
    fn test_config_serialize() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("cookie_name"));
        assert!(json.contains("8501"));
    }
}
