use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, Result};
use crate::domain::review::AnalysisConfig;

pub const DEFAULT_CONFIG_FILE: &str = "review-insights.toml";
pub const ENV_PREFIX: &str = "REVIEW_INSIGHTS_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Largest accepted upload body in bytes
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.port == 0 {
            return Err("server.port must be > 0".to_string());
        }
        if self.max_upload_bytes == 0 {
            return Err("server.max_upload_bytes must be > 0".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_name: "product-features-analysis.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Fallback tracing filter when `RUST_LOG` is unset
    pub log_filter: String,
    pub analysis: AnalysisConfig,
    pub server: ServerConfig,
    pub export: ExportConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            analysis: AnalysisConfig::default(),
            server: ServerConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        self.analysis
            .validate()
            .and_then(|_| self.server.validate())
            .map_err(AppError::ConfigError)?;

        if self.export.file_name.trim().is_empty() {
            return Err(AppError::ConfigError(
                "export.file_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Layered config loading: defaults, then TOML file, then environment
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    pub fn new() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_CONFIG_FILE),
        }
    }

    pub fn with_path(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn figment(&self) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(&self.path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load and validate the config. A missing file is not an error.
    pub fn load(&self) -> Result<AppConfig> {
        let config: AppConfig = self
            .figment()
            .extract()
            .map_err(|e| AppError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults_without_file() {
        Jail::expect_with(|_jail| {
            let config = ConfigService::with_path("absent.toml").load().unwrap();
            assert_eq!(config, AppConfig::default());
            assert_eq!(config.server.port, 3001);
            assert_eq!(config.analysis.simulated_delay_ms, 2000);
            Ok(())
        });
    }

    #[test]
    fn test_file_then_env_layering() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "review-insights.toml",
                r#"
                    log_filter = "debug"

                    [analysis]
                    simulated_delay_ms = 10

                    [server]
                    port = 8080
                "#,
            )?;
            jail.set_env("REVIEW_INSIGHTS_SERVER__PORT", "9090");

            let config = ConfigService::new().load().unwrap();
            assert_eq!(config.log_filter, "debug");
            assert_eq!(config.analysis.simulated_delay_ms, 10);
            assert_eq!(config.analysis.accepted_extension, "csv");
            assert_eq!(config.server.port, 9090);
            assert_eq!(config.export.file_name, "product-features-analysis.json");
            Ok(())
        });
    }

    #[test]
    fn test_invalid_values_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("REVIEW_INSIGHTS_SERVER__PORT", "0");

            let err = ConfigService::new().load().unwrap_err();
            assert!(matches!(err, AppError::ConfigError(_)));
            Ok(())
        });
    }
}
