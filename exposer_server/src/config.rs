use anyhow::{Context, Result};

use std::net::SocketAddr;
use std::time::Duration;

use danbooru_client::Credential;
use exposer_danbooru::DanbooruSettings;

pub const DEFAULT_DNS_SERVER: &str = "1.1.1.1:53";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_HOST: &str = "0.0.0.0";

#[derive(Debug, Clone)]
pub struct Config {
    pub danbooru: DanbooruSettings,
    pub address: SocketAddr,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| lookup(key).with_context(|| format!("{} must be set", key));

        let timeout = match lookup("EXPOSING_TIMEOUT_SECS") {
            Some(secs) => secs
                .parse::<u64>()
                .with_context(|| format!("EXPOSING_TIMEOUT_SECS must be a number of seconds, got {}", secs))?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        let dns_server = lookup("EXPOSING_DNS_SERVER").unwrap_or_else(|| DEFAULT_DNS_SERVER.to_string());
        let dns_server = dns_server
            .parse::<SocketAddr>()
            .with_context(|| format!("EXPOSING_DNS_SERVER must be ip:port, got {}", dns_server))?;

        let danbooru = DanbooruSettings {
            base_url: required("EXPOSING_URL")?,
            credential: Credential {
                login: required("EXPOSING_USERNAME")?,
                api_key: required("EXPOSING_API_KEY")?,
            },
            timeout: Duration::from_secs(timeout),
            dns_server,
        };

        let host = lookup("APP_URL").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = required("APP_PORT")?;
        let address = format!("{}:{}", host, port);
        let address = address
            .parse::<SocketAddr>()
            .with_context(|| format!("APP_URL and APP_PORT must form a socket address, got {}", address))?;

        Ok(Config { danbooru, address })
    }
}
