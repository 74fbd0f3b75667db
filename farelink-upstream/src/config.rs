use serde::Deserialize;
use std::env;

use farelink_core::offer::ResponseShape;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    /// Base URL of the travel-data API, e.g. https://test.api.amadeus.com
    pub host: String,
    // Credentials are optional at load time so the health endpoint can
    // report them missing instead of the process failing to start.
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_max_results")]
    pub max_results: u32,
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_max_results() -> u32 {
    20
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct HttpConfig {
    /// Allowed CORS origins. Empty means wildcard.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
    #[serde(default)]
    pub response_shape: ResponseShape,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Add in the current environment file
            // Default to 'development' env
            // Note that this file is _optional_
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add in a local configuration file
            // This file shouldn't be checked in to git
            .add_source(config::File::with_name("config/local").required(false))
            // Add in settings from the environment (with a prefix of FARELINK)
            // Eg.. `FARELINK_SERVER__PORT=8080` would set `server.port`
            .add_source(config::Environment::with_prefix("FARELINK").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
