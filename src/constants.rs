//! # Constants
//!
//! Names shared by the configuration and logging layers.

/// Environment variables consulted, in order, for the environment name
pub const ENVIRONMENT_VARIABLES: [&str; 2] = ["BUS_ACTIVATOR_ENV", "APP_ENV"];

/// Environment used when none of [`ENVIRONMENT_VARIABLES`] is set
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Prefix of environment variables that override file settings
///
/// `BUS_ACTIVATOR__DISPOSAL__FAILURE_POLICY=log_and_continue`
pub const CONFIG_ENV_PREFIX: &str = "BUS_ACTIVATOR";

/// Separator between nested keys in override variables
pub const CONFIG_ENV_SEPARATOR: &str = "__";

/// Directory searched when no configuration directory is given
pub const DEFAULT_CONFIG_DIRECTORY: &str = "config";

/// Stem of the configuration files (`activator.yaml`, `activator.test.yaml`)
pub const CONFIG_FILE_STEM: &str = "activator";

/// Component names used in structured log events
pub mod components {
    pub const REGISTRY: &str = "handler_registry";
    pub const BUS_BINDING: &str = "bus_binding";
    pub const ACTIVATOR: &str = "handler_activator";
    pub const CONFIG: &str = "config";
}
