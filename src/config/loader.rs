//! Configuration Loader
//!
//! Environment-aware configuration loading. Handles file discovery,
//! environment detection and layering of overrides.

use super::ActivatorConfig;
use crate::constants::{
    components, CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR, CONFIG_FILE_STEM,
    DEFAULT_CONFIG_DIRECTORY, DEFAULT_ENVIRONMENT, ENVIRONMENT_VARIABLES,
};
use crate::error::Result;
use config::{Config, Environment, File, FileFormat};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Loaded configuration together with where it came from
#[derive(Debug)]
pub struct ConfigManager {
    config: ActivatorConfig,
    environment: String,
    config_directory: PathBuf,
}

impl ConfigManager {
    /// Load configuration with environment auto-detection
    pub fn load() -> Result<Arc<ConfigManager>> {
        Self::load_from_directory(None)
    }

    /// Load configuration from a specific directory
    pub fn load_from_directory(config_dir: Option<PathBuf>) -> Result<Arc<ConfigManager>> {
        let environment = Self::detect_environment();
        Self::load_from_directory_with_env(config_dir, &environment)
    }

    /// Load configuration from a specific directory with explicit environment
    ///
    /// Useful in tests, where changing process-wide variables is unsafe.
    pub fn load_from_directory_with_env(
        config_dir: Option<PathBuf>,
        environment: &str,
    ) -> Result<Arc<ConfigManager>> {
        let config_directory =
            config_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIRECTORY));

        debug!(
            "Loading configuration for environment '{}' from directory: {}",
            environment,
            config_directory.display()
        );

        let config = Self::build_config(&config_directory, environment)?;
        config.validate()?;

        info!(
            component = components::CONFIG,
            environment = environment,
            input_queue = config.endpoint.input_queue.as_deref(),
            failure_policy = ?config.disposal.failure_policy,
            "Configuration loaded successfully"
        );

        Ok(Arc::new(ConfigManager {
            config,
            environment: environment.to_string(),
            config_directory,
        }))
    }

    /// Get the loaded configuration
    pub fn config(&self) -> &ActivatorConfig {
        &self.config
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn config_directory(&self) -> &Path {
        &self.config_directory
    }

    /// Detect the environment name from the process environment
    pub fn detect_environment() -> String {
        Self::environment_from(|name| env::var(name).ok())
    }

    /// First non-blank value among the environment variables, in precedence order
    fn environment_from(lookup: impl Fn(&str) -> Option<String>) -> String {
        ENVIRONMENT_VARIABLES
            .iter()
            .find_map(|name| lookup(name).filter(|value| !value.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string())
    }

    fn build_config(config_directory: &Path, environment: &str) -> Result<ActivatorConfig> {
        let base_file = config_directory.join(format!("{CONFIG_FILE_STEM}.yaml"));
        let environment_file =
            config_directory.join(format!("{CONFIG_FILE_STEM}.{environment}.yaml"));

        let config = Config::builder()
            .add_source(File::from(base_file).format(FileFormat::Yaml).required(false))
            .add_source(
                File::from(environment_file)
                    .format(FileFormat::Yaml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix(CONFIG_ENV_PREFIX)
                    .prefix_separator(CONFIG_ENV_SEPARATOR)
                    .separator(CONFIG_ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize::<ActivatorConfig>()?)
    }
}
