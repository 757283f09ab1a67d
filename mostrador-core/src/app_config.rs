use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::path::Path;
use tracing::debug;

use crate::UserRole;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub pricing: PricingSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

/// Discount governance as read from configuration. Ceilings are keyed by
/// role name; roles missing from `ceilings` fall back to `default_ceiling`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PricingSettings {
    #[serde(default = "default_ceiling")]
    pub default_ceiling: f64,
    #[serde(default = "default_reason_threshold")]
    pub reason_threshold_percent: f64,
    #[serde(default = "default_ceilings")]
    pub ceilings: HashMap<String, f64>,
}

fn default_ceiling() -> f64 { 10.0 }

fn default_reason_threshold() -> f64 { 10.0 }

fn default_ceilings() -> HashMap<String, f64> {
    let mut m = HashMap::new();
    m.insert(UserRole::Vendedor.to_string(), 10.0);
    m.insert(UserRole::Supervisor.to_string(), 20.0);
    m.insert(UserRole::Admin.to_string(), 30.0);
    m.insert(UserRole::Gerente.to_string(), 100.0);
    m
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self {
            default_ceiling: default_ceiling(),
            reason_threshold_percent: default_reason_threshold(),
            ceilings: default_ceilings(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Layered load from `dir`: `default`, `{RUN_MODE}`, `local`, then environment.
    pub fn load_from(dir: impl AsRef<Path>) -> Result<Self, config::ConfigError> {
        let dir = dir.as_ref();
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        let file = |name: &str| dir.join(name).to_string_lossy().into_owned();

        debug!(dir = %dir.display(), %run_mode, "Loading configuration");

        let s = config::Config::builder()
            .add_source(config::File::with_name(&file("default")))
            // Per-environment overrides, optional
            .add_source(config::File::with_name(&file(run_mode.as_str())).required(false))
            // Not checked in
            .add_source(config::File::with_name(&file("local")).required(false))
            // Eg. `MOSTRADOR__PRICING__REASON_THRESHOLD_PERCENT=15`
            .add_source(config::Environment::with_prefix("MOSTRADOR").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    /// Parse a TOML document on its own, without files or environment.
    pub fn from_toml(toml: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}
