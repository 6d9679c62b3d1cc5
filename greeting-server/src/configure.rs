use eyre::{Result, WrapErr};
use std::env;

pub struct Config {
    pub host: String,
    pub port: u16,
}

impl Config {
    /// Resolved once at startup; the rest of the server only sees this struct.
    pub fn from_env() -> Result<Self> {
        Self::resolve(env::var("HOST").ok(), env::var("PORT").ok())
    }

    fn resolve(host: Option<String>, port: Option<String>) -> Result<Self> {
        let host = host.unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match port {
            Some(raw) => raw
                .parse::<u16>()
                .wrap_err_with(|| format!("Invalid PORT value {raw:?}"))?,
            None => 8080,
        };

        Ok(Self { host, port })
    }
}
