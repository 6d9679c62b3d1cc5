use eyre::{Result, WrapErr};
use std::{env, time::Duration};

pub struct Config {
    pub api_base_url: String,
    pub request_interval: Duration,
}

impl Config {
    /// Resolved once at startup; the loop only sees this struct.
    pub fn from_env() -> Result<Self> {
        Self::resolve(
            env::var("API_BASE_URL").ok(),
            env::var("REQUEST_INTERVAL").ok(),
        )
    }

    fn resolve(base_url: Option<String>, interval: Option<String>) -> Result<Self> {
        let api_base_url = base_url.unwrap_or_else(|| "http://localhost:8080".to_string());
        let millis = match interval {
            Some(raw) => raw
                .parse::<u64>()
                .wrap_err_with(|| format!("Invalid REQUEST_INTERVAL value {raw:?}"))?,
            None => 5000,
        };

        Ok(Self {
            api_base_url,
            request_interval: Duration::from_millis(millis),
        })
    }
}
