use std::time::Duration;

use ::config::{
    builder::DefaultState, ConfigBuilder, ConfigError, Environment, File, FileFormat, Source,
};

use crate::http::{
    framer::{DEFAULT_CHUNK_SIZE, DEFAULT_MAX_HEADER_SIZE},
    Limits,
};

pub const CONFIG_FILE: &str = "jserver.toml";
pub const ENV_PREFIX: &str = "JSERVER";

const DEFAULT_ADDRESS: &str = "localhost:9090";

#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
pub struct Config {
    pub address: String,
    pub max_header_size: usize,
    pub read_timeout_ms: u64,
    pub chunk_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_owned(),
            max_header_size: DEFAULT_MAX_HEADER_SIZE,
            read_timeout_ms: crate::TIMEOUT_DURATION.as_millis() as u64,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl Config {
    /// Defaults, overridden by `jserver.toml` when present, overridden by
    /// `JSERVER_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(File::new(CONFIG_FILE, FileFormat::Toml).required(false))
    }

    fn load_from<F>(file: F) -> Result<Self, ConfigError>
    where
        F: Source + Send + Sync + 'static,
    {
        defaults()?
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.max_header_size > 0, "max_header_size must be at least 1");
        anyhow::ensure!(self.chunk_size > 0, "chunk_size must be at least 1");
        anyhow::ensure!(self.read_timeout_ms > 0, "read_timeout_ms must be at least 1");

        Ok(())
    }

    pub fn limits(&self) -> Limits {
        Limits {
            max_header_size: self.max_header_size,
            chunk_size: self.chunk_size,
        }
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let config = Config::default();

    ::config::Config::builder()
        .set_default("address", config.address)?
        .set_default("max_header_size", config.max_header_size as i64)?
        .set_default("read_timeout_ms", config.read_timeout_ms as i64)?
        .set_default("chunk_size", config.chunk_size as i64)
}
