//! Application configuration loaded from environment variables.

use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Seed the store with demo data on startup
    pub demo: bool,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 5000,
            demo: false,
            frontend_url: "http://localhost:5173".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables (`.env` is honored).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port = match env::var("GYMLOG_PORT") {
            Ok(port) => port
                .parse()
                .map_err(|_| ConfigError::Invalid("GYMLOG_PORT"))?,
            Err(_) => 5000,
        };
        let demo =
            env::var("GYMLOG_DEMO").is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"));
        let frontend_url = env::var("GYMLOG_FRONTEND_URL")
            .unwrap_or_else(|_| "http://localhost:5173".to_string());

        Ok(Self {
            port,
            demo,
            frontend_url,
        })
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {0}")]
    Invalid(&'static str),
}
