//! calcsrv configuration
//!
//! Layers, lowest priority first:
//! 1. built-in defaults
//! 2. `config/calcsrv.yaml`, or the file passed with `--config`
//! 3. `CALCSRV_*` environment variables, nested with `__`
//!    (`CALCSRV_API__PORT=9000`, `CALCSRV_HISTORY__RECORD_FAILURES=true`)
//! 4. `DATABASE_URL`

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{CalcSrvError, Result};

pub const DEFAULT_CONFIG_PATH: &str = "config/calcsrv.yaml";
pub const ENV_PREFIX: &str = "CALCSRV_";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServiceConfig {
    pub name: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "calcsrv".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8001,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `sqlite://path/to/file.db` or `sqlite::memory:`
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://data/calcsrv.db".to_string(),
            max_connections: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HistoryConfig {
    /// Page size when `?limit` is omitted
    pub default_limit: usize,
    /// Upper bound applied to `?limit`
    pub max_limit: usize,
    /// Persist calculations that ended in an error response
    pub record_failures: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            default_limit: 50,
            max_limit: 1000,
            record_failures: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub dir: PathBuf,
    pub enable_file: bool,
    pub enable_json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: PathBuf::from("logs"),
            enable_file: false,
            enable_json: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub service: ServiceConfig,
    pub api: ApiConfig,
    pub database: DatabaseConfig,
    pub history: HistoryConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Layered figment; `path` replaces the default file location
    pub fn figment(path: Option<&Path>) -> Figment {
        let file = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Yaml::file(file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(
                Env::raw()
                    .only(&["DATABASE_URL"])
                    .map(|_| "database.url".into()),
            )
    }

    /// Load and validate
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(p) = path {
            if !p.exists() {
                return Err(CalcSrvError::config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
        }
        Self::from_figment(Self::figment(path))
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: Config = figment
            .extract()
            .map_err(|e| CalcSrvError::config(format!("Failed to load configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.service.name.trim().is_empty() {
            return Err(CalcSrvError::config("service.name cannot be empty"));
        }
        if self.api.port == 0 {
            return Err(CalcSrvError::config("api.port must be non-zero"));
        }
        if self.database.url.trim().is_empty() {
            return Err(CalcSrvError::config("database.url cannot be empty"));
        }
        if self.database.max_connections == 0 {
            return Err(CalcSrvError::config("database.max_connections must be at least 1"));
        }
        if self.history.default_limit == 0 || self.history.max_limit == 0 {
            return Err(CalcSrvError::config("history limits must be at least 1"));
        }
        if self.history.default_limit > self.history.max_limit {
            return Err(CalcSrvError::config(format!(
                "history.default_limit ({}) exceeds history.max_limit ({})",
                self.history.default_limit, self.history.max_limit
            )));
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.history.default_limit, 50);
        assert!(!config.history.record_failures);
        assert_eq!(config.bind_address(), "0.0.0.0:8001");
    }

    #[test]
    fn test_yaml_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "api:\n  port: 9100\nhistory:\n  record_failures: true\ndatabase:\n  url: \"sqlite::memory:\""
        )
        .unwrap();

        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Yaml::file(file.path()));
        let config = Config::from_figment(figment).unwrap();

        assert_eq!(config.api.port, 9100);
        assert_eq!(config.api.host, "0.0.0.0");
        assert!(config.history.record_failures);
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.history.max_limit, 1000);
    }

    #[test]
    fn test_env_layers_override_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "calcsrv.yaml",
                "api:\n  port: 9100\ndatabase:\n  url: \"sqlite://from-file.db\"\n",
            )?;
            jail.set_env("CALCSRV_API__PORT", "9200");
            jail.set_env("CALCSRV_HISTORY__MAX_LIMIT", "200");
            jail.set_env("CALCSRV_DATABASE__URL", "sqlite://from-prefixed-env.db");
            jail.set_env("DATABASE_URL", "sqlite::memory:");

            let config = Config::load(Some(Path::new("calcsrv.yaml"))).unwrap();
            assert_eq!(config.api.port, 9200);
            assert_eq!(config.history.max_limit, 200);
            assert_eq!(config.database.url, "sqlite::memory:");
            assert_eq!(config.service.name, "calcsrv");
            Ok(())
        });
    }

    #[test]
    fn test_database_url_without_file() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("DATABASE_URL", "sqlite://data/other.db");

            let config = Config::from_figment(Config::figment(None)).unwrap();
            assert_eq!(config.database.url, "sqlite://data/other.db");
            assert_eq!(config.api.port, 8001);
            Ok(())
        });
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = Config::load(Some(Path::new("/nonexistent/calcsrv.yaml"))).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_validation_errors() {
        let mut config = Config::default();
        config.api.port = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.history.default_limit = 2000;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.database.url = " ".to_string();
        assert!(config.validate().is_err());
    }
}
