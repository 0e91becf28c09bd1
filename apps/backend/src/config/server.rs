//! Server configuration loaded from environment variables.

use std::env;

use crate::error::AppError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_MAX_JSON_PAYLOAD_SIZE: usize = 64 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Fixed shuffle seed for reproducible deals. Random when unset.
    pub deal_seed: Option<u64>,
    pub max_json_payload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            deal_seed: None,
            max_json_payload_size: DEFAULT_MAX_JSON_PAYLOAD_SIZE,
        }
    }
}

impl ServerConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load from any key lookup; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = get("BACKEND_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_or("BACKEND_PORT", get("BACKEND_PORT"), DEFAULT_PORT)?;
        let deal_seed = get("BACKEND_DEAL_SEED")
            .map(|raw| parse_value::<u64>("BACKEND_DEAL_SEED", &raw))
            .transpose()?;
        let max_json_payload_size = parse_or(
            "MAX_JSON_PAYLOAD_SIZE",
            get("MAX_JSON_PAYLOAD_SIZE"),
            DEFAULT_MAX_JSON_PAYLOAD_SIZE,
        )?;

        Ok(Self {
            host,
            port,
            deal_seed,
            max_json_payload_size,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    key: &str,
    raw: Option<String>,
    default: T,
) -> Result<T, AppError> {
    match raw {
        Some(raw) => parse_value(key, &raw),
        None => Ok(default),
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, AppError> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| AppError::config(format!("{key} has an invalid value: '{raw}'")))
}
