mod basic;
mod web;

pub use basic::BasicConfig;
pub use web::WebConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, sync::LazyLock};

/// Application configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Core server configuration (see `basic` table in config.toml).
    #[serde(default)]
    pub basic: BasicConfig,

    /// HTTP surface settings (see `web` table in config.toml).
    #[serde(default)]
    pub web: WebConfig,
}

const DEFAULT_CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "FLEET_";

impl Config {
    /// Builds a Figment that merges defaults, an optional config TOML file and
    /// `FLEET_`-prefixed environment variables (`FLEET_BASIC__LISTEN_PORT=9000`).
    pub fn figment() -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        if PathBuf::from(DEFAULT_CONFIG_FILE).is_file() {
            figment = figment.merge(Toml::file(DEFAULT_CONFIG_FILE));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }
}

/// Global, lazily-initialized configuration instance for the binary.
///
/// Library components never read this; they take explicit values.
pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Config::load().unwrap_or_else(|err| {
        panic!("failed to extract configuration (defaults + optional config.toml + env): {err}")
    })
});
