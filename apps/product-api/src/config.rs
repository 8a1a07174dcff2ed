//! Configuration for the Product API

use core_config::{server::ServerConfig, FromEnv};
use database::mongodb::MongoConfig;
use domain_product::{CircuitSettings, Messages};

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    pub messages: Messages,
    pub circuits: CircuitSettings,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env()?;
        let server = ServerConfig::from_env()?;

        Ok(Self {
            mongodb,
            server,
            environment,
            messages: Messages::from_env(),
            circuits: CircuitSettings::from_env(),
        })
    }
}
