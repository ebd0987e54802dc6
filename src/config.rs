use std::str::FromStr;
use std::time::Duration;

use crate::error::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub api_root: String,
    pub max_latency: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_url: None,
            db_max_connections: 5,
            host: "0.0.0.0".into(),
            port: 3000,
            api_root: "/api".into(),
            max_latency: Duration::from_millis(500),
        }
    }
}

fn var(key: &str) -> Option<String> {
    dotenv::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse<T>(key: &str, default: T) -> Result<T, Error>
where
    T: FromStr<Err = std::num::ParseIntError>,
{
    match var(key) {
        Some(v) => Ok(v.trim().parse()?),
        None => Ok(default),
    }
}

impl Config {
    /// Reads the process environment, `.env` included when `dotenv::dotenv()` ran first.
    pub fn from_env() -> Result<Self, Error> {
        let default = Config::default();
        Ok(Config {
            database_url: var("DATABASE_URL"),
            db_max_connections: parse("DB_MAX_CONNECTIONS", default.db_max_connections)?,
            host: var("HOST").unwrap_or(default.host),
            port: parse("PORT", default.port)?,
            api_root: var("API_ROOT").map(|r| normalize_root(&r)).unwrap_or(default.api_root),
            max_latency: Duration::from_millis(parse("MAX_LATENCY_MS", default.max_latency.as_millis() as u64)?),
        })
    }
}

/// `"api/"` and `"/api"` both become `"/api"`; `"/"` becomes `""`.
pub fn normalize_root(root: &str) -> String {
    let trimmed = root.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}
