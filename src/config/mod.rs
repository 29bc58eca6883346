//! # Provider Configuration
//!
//! Layered configuration for a step provider process.
//!
//! ## Sources (later wins)
//!
//! 1. Built-in defaults
//! 2. `config/provider.toml`
//! 3. `config/provider.<environment>.toml`
//! 4. `STEPHUB__*` environment variables (`STEPHUB__LOGGING__LEVEL=debug`)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use stephub_provider::config::ConfigManager;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = ConfigManager::load()?;
//! let threshold = manager.config().dispatch.slow_invocation_threshold();
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod loader;

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub use error::{ConfigResult, ConfigurationError};
pub use loader::ConfigManager;

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Root configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub environment: String,
    pub logging: LoggingConfig,
    pub dispatch: DispatchConfig,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            logging: LoggingConfig::default(),
            dispatch: DispatchConfig::default(),
        }
    }
}

impl ProviderConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.environment.trim().is_empty() {
            return Err(ConfigurationError::missing_required_field(
                "environment",
                "provider configuration",
            ));
        }

        let level = self.logging.level.trim().to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) && !level.contains('=') {
            return Err(ConfigurationError::invalid_value(
                "logging.level",
                &self.logging.level,
                "expected one of trace, debug, info, warn, error, off or a filter directive",
            ));
        }

        if self.dispatch.slow_invocation_ms == Some(0) {
            return Err(ConfigurationError::invalid_value(
                "dispatch.slow_invocation_ms",
                "0",
                "threshold must be greater than 0; omit it to disable slow-invocation warnings",
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level or `EnvFilter` directive; `RUST_LOG` overrides it
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Invocations slower than this are logged at warn level
    pub slow_invocation_ms: Option<u64>,
}

impl DispatchConfig {
    pub fn slow_invocation_threshold(&self) -> Option<Duration> {
        self.slow_invocation_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = ProviderConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.environment, "development");
        assert_eq!(config.logging.level, "info");
        assert!(config.dispatch.slow_invocation_threshold().is_none());
    }

    #[test]
    fn test_validation_failures() {
        let mut config = ProviderConfig::default();
        config.environment = " ".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::MissingRequiredField { .. })
        ));

        let mut config = ProviderConfig::default();
        config.logging.level = "loud".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::InvalidValue { .. })
        ));

        let mut config = ProviderConfig::default();
        config.dispatch.slow_invocation_ms = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_filter_directive_accepted() {
        let mut config = ProviderConfig::default();
        config.logging.level = "stephub_provider=debug".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_slow_threshold() {
        let dispatch = DispatchConfig {
            slow_invocation_ms: Some(250),
        };
        assert_eq!(
            dispatch.slow_invocation_threshold(),
            Some(Duration::from_millis(250))
        );
    }
}
