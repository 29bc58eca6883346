//! Configuration Loader
//!
//! Environment-aware loading built on the `config` crate. Handles
//! environment detection, optional file discovery and `STEPHUB__*`
//! environment overrides.

use super::error::{ConfigResult, ConfigurationError};
use super::ProviderConfig;
use config::{Config, Environment, File, FileFormat, Map};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

const ENV_PREFIX: &str = "STEPHUB";
const ENV_SEPARATOR: &str = "__";

/// Loaded configuration plus where it came from
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: ProviderConfig,
    environment: String,
    config_directory: PathBuf,
}

impl ConfigManager {
    /// Load configuration with environment auto-detection
    pub fn load() -> ConfigResult<Arc<ConfigManager>> {
        Self::load_from_directory(None)
    }

    /// Load configuration from a specific directory
    pub fn load_from_directory(config_dir: Option<PathBuf>) -> ConfigResult<Arc<ConfigManager>> {
        let environment = Self::detect_environment();
        Self::load_from_directory_with_env(config_dir, &environment)
    }

    /// Load configuration from a specific directory with explicit environment
    /// This is useful for testing without modifying global environment variables
    pub fn load_from_directory_with_env(
        config_dir: Option<PathBuf>,
        environment: &str,
    ) -> ConfigResult<Arc<ConfigManager>> {
        Self::load_with_env_source(config_dir, environment, None)
    }

    fn load_with_env_source(
        config_dir: Option<PathBuf>,
        environment: &str,
        env_source: Option<Map<String, String>>,
    ) -> ConfigResult<Arc<ConfigManager>> {
        let config_directory = config_dir.unwrap_or_else(Self::default_config_directory);

        debug!(
            "Loading configuration for environment '{}' from directory: {}",
            environment,
            config_directory.display()
        );

        let config = Self::build_config(&config_directory, environment, env_source)?;
        config.validate()?;

        info!(
            environment = %config.environment,
            log_level = %config.logging.level,
            json_logs = config.logging.json,
            slow_invocation_ms = config.dispatch.slow_invocation_ms,
            "Configuration loaded successfully"
        );

        Ok(Arc::new(ConfigManager {
            config,
            environment: environment.to_string(),
            config_directory,
        }))
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn config_directory(&self) -> &Path {
        &self.config_directory
    }

    /// Current environment: `STEPHUB_ENV`, then `APP_ENV`, else `development`
    pub fn detect_environment() -> String {
        env::var("STEPHUB_ENV")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string())
            .to_lowercase()
    }

    fn default_config_directory() -> PathBuf {
        env::var("STEPHUB_CONFIG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config"))
    }

    fn build_config(
        config_directory: &Path,
        environment: &str,
        env_source: Option<Map<String, String>>,
    ) -> ConfigResult<ProviderConfig> {
        let base_file = config_directory.join("provider.toml");
        let environment_file = config_directory.join(format!("provider.{environment}.toml"));

        debug!(
            base = %base_file.display(),
            base_exists = base_file.exists(),
            overrides = %environment_file.display(),
            overrides_exist = environment_file.exists(),
            "Resolving configuration sources"
        );

        let environment_overrides = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator(ENV_SEPARATOR)
            .separator(ENV_SEPARATOR)
            .try_parsing(true)
            .source(env_source);

        Config::builder()
            .set_default("environment", environment)
            .and_then(|builder| builder.set_default("logging.level", "info"))
            .and_then(|builder| builder.set_default("logging.json", false))
            .map(|builder| {
                builder
                    .add_source(File::from(base_file).format(FileFormat::Toml).required(false))
                    .add_source(
                        File::from(environment_file)
                            .format(FileFormat::Toml)
                            .required(false),
                    )
                    .add_source(environment_overrides)
            })
            .and_then(|builder| builder.build())
            .and_then(|config| config.try_deserialize::<ProviderConfig>())
            .map_err(|source| ConfigurationError::load_failed(environment, source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) {
        fs::write(dir.path().join(name), contents).unwrap();
    }

    #[test]
    fn test_missing_files_yield_defaults() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::load_with_env_source(
            Some(dir.path().to_path_buf()),
            "test",
            Some(Map::new()),
        )
        .unwrap();

        assert_eq!(manager.environment(), "test");
        assert_eq!(manager.config().environment, "test");
        assert_eq!(manager.config().logging.level, "info");
        assert!(!manager.config().logging.json);
        assert_eq!(manager.config().dispatch.slow_invocation_ms, None);
    }

    #[test]
    fn test_environment_variables_override_files() {
        let dir = TempDir::new().unwrap();
        write(&dir, "provider.toml", "[logging]\nlevel = \"debug\"\n");
        write(
            &dir,
            "provider.production.toml",
            "[logging]\nlevel = \"warn\"\n\n[dispatch]\nslow_invocation_ms = 500\n",
        );

        let mut overrides = Map::new();
        overrides.insert("STEPHUB__LOGGING__JSON".to_string(), "true".to_string());
        overrides.insert(
            "STEPHUB__DISPATCH__SLOW_INVOCATION_MS".to_string(),
            "750".to_string(),
        );

        let manager = ConfigManager::load_with_env_source(
            Some(dir.path().to_path_buf()),
            "production",
            Some(overrides),
        )
        .unwrap();

        assert_eq!(manager.config().logging.level, "warn");
        assert!(manager.config().logging.json);
        assert_eq!(manager.config().dispatch.slow_invocation_ms, Some(750));
    }
}
