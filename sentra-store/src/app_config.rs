use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub risk_server: ServerConfig,
    pub order_server: ServerConfig,
    pub scorer: ScorerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// Port for the standalone metrics listener.
    pub metrics_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScorerConfig {
    /// Address of the risk scoring service, normally supplied by the
    /// environment (`SENTRA__SCORER__URL`).
    #[serde(default = "default_scorer_url")]
    pub url: String,
}

fn default_scorer_url() -> String {
    "http://risk-scorer:5000".to_string()
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Add in the current environment file (optional)
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add in a local configuration file (not checked in)
            .add_source(config::File::with_name("config/local").required(false))
            // Add in settings from the environment (with a prefix of SENTRA)
            // Eg. `SENTRA__SCORER__URL=http://localhost:5000`
            .add_source(config::Environment::with_prefix("SENTRA").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
