use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;
use crate::error::{AppError, Result};
use crate::profile::{self, SummaryProfile};

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub openrouter_api_key: String,
    pub openrouter_base_url: String,
    pub site_url: Option<String>,
    pub site_name: Option<String>,
    pub profiles: Vec<SummaryProfile>,
    pub default_profile: String,
    /// Extracted text with fewer characters than this never reaches the model.
    pub min_article_chars: usize,
    /// Page bodies are read up to this many bytes.
    pub max_page_bytes: usize,
    pub fetch_timeout: Duration,
    pub request_timeout: Duration,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let openrouter_api_key = lookup("OPENROUTER_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| AppError::ConfigError("OPENROUTER_API_KEY must be set".to_string()))?;

        let openrouter_base_url = lookup("OPENROUTER_BASE_URL")
            .unwrap_or_else(|| "https://openrouter.ai/api/v1".to_string())
            .trim_end_matches('/')
            .to_string();

        // Load server configuration with defaults
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = lookup("PORT").unwrap_or_else(|| "3000".to_string());
        let port = port.parse::<u16>().map_err(|e| AppError::ConfigError(format!("Invalid port: {}", e)))?;
        let ip = IpAddr::from_str(&host).map_err(|e| AppError::ConfigError(format!("Invalid host address: {}", e)))?;

        let mut profiles = profile::builtin_profiles();
        for p in profiles.iter_mut() {
            let key = format!("PROFILE_{}_MODEL", p.name.to_ascii_uppercase());
            if let Some(model) = lookup(&key).filter(|m| !m.trim().is_empty()) {
                p.model = model.trim().to_string();
            }
        }

        let default_profile = lookup("DEFAULT_PROFILE").unwrap_or_else(|| profile::DEFAULT_PROFILE.to_string());
        let default_profile = profile::find(&profiles, &default_profile)
            .map_err(|e| AppError::ConfigError(e.to_string()))?
            .name
            .clone();

        Ok(Config {
            server_addr: SocketAddr::new(ip, port),
            openrouter_api_key,
            openrouter_base_url,
            site_url: lookup("SITE_URL"),
            site_name: lookup("SITE_NAME"),
            profiles,
            default_profile,
            min_article_chars: parse_number(&lookup, "MIN_ARTICLE_CHARS", 1)?,
            max_page_bytes: parse_number(&lookup, "MAX_PAGE_BYTES", 5 * 1024 * 1024)?,
            fetch_timeout: Duration::from_secs(parse_number(&lookup, "FETCH_TIMEOUT_SECS", 10)?),
            request_timeout: Duration::from_secs(parse_number(&lookup, "REQUEST_TIMEOUT_SECS", 90)?),
        })
    }

    /// Profile named in a request, or the configured default.
    pub fn profile(&self, name: Option<&str>) -> Result<&SummaryProfile> {
        match name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) => profile::find(&self.profiles, name),
            None => profile::find(&self.profiles, &self.default_profile),
        }
    }
}

fn parse_number<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| AppError::ConfigError(format!("Invalid {}: {}", key, e))),
        None => Ok(default),
    }
}
