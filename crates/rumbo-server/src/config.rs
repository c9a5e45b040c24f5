//! Server configuration.
//!
//! Settings come from built-in defaults, an optional `rumbo.yaml` (or
//! `.toml`) file in the working directory, and `RUMBO_*` environment
//! variables, in increasing order of precedence. The core subsystems need
//! no configuration of their own; everything here concerns the process
//! edges (listen address, task periods).

use serde::Deserialize;

/// Runtime configuration for the server process.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Host address to bind, e.g. `0.0.0.0`.
    #[serde(default = "default_host")]
    pub host: String,
    /// TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Seconds between traffic simulator ticks.
    #[serde(default = "default_simulator_period")]
    pub simulator_period_secs: u64,
    /// Seconds between sweep passes.
    #[serde(default = "default_sweep_period")]
    pub sweep_period_secs: u64,
}

fn default_host() -> String {
    String::from("0.0.0.0")
}

const fn default_port() -> u16 {
    8080
}

const fn default_simulator_period() -> u64 {
    30
}

const fn default_sweep_period() -> u64 {
    3600
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            simulator_period_secs: default_simulator_period(),
            sweep_period_secs: default_sweep_period(),
        }
    }
}

/// Errors raised while assembling the configuration.
#[derive(Debug, thiserror::Error)]
#[error("configuration error: {0}")]
pub struct ConfigError(#[from] config::ConfigError);

impl AppConfig {
    /// Load configuration from an optional `rumbo` file and the
    /// environment, falling back to defaults for anything unset.
    pub fn load() -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("rumbo").required(false))
            .add_source(config::Environment::with_prefix("RUMBO"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
