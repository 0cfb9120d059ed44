use std::{env, path::PathBuf};

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use url::Url;

pub fn load() -> Result<Config, ConfigError> {
    let path = env::var("CONFIG_PATH").unwrap_or("config.toml".to_owned());
    config::Config::builder()
        .add_source(File::with_name(&path))
        .add_source(Environment::default().separator("__"))
        .build()?
        .try_deserialize()
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Path of the local response store. Only written to when no redis
    /// backend is available.
    pub data_file: PathBuf,
    /// Omitting this section routes all responses to the local store.
    #[serde(default)]
    pub redis: Option<RedisConfig>,
}

#[derive(Debug, Deserialize)]
pub struct RedisConfig {
    pub responses: Url,
}
