//! Runtime settings from environment variables (`.env` is honored by the
//! composition root before this runs).

use std::env;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid value for environment variable: {0}")]
    Invalid(&'static str),
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: String,
    pub max_connections: u32,
}

impl Settings {
    pub fn from_env() -> Result<Self, SettingsError> {
        let database_url =
            env::var("DATABASE_URL").map_err(|_| SettingsError::Missing("DATABASE_URL"))?;
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into());
        let max_connections = match env::var("MAX_DB_CONNECTIONS") {
            Ok(v) => v
                .parse()
                .map_err(|_| SettingsError::Invalid("MAX_DB_CONNECTIONS"))?,
            Err(_) => 5,
        };
        Ok(Self {
            database_url,
            bind_addr,
            max_connections,
        })
    }
}
