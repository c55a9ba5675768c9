use derive_more::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Display, PartialEq, Eq)]
pub enum ConfigError {
    #[display(fmt = "missing {} environment variable", _0)]
    Missing(&'static str),
    #[display(fmt = "{} cannot be parsed from '{}'", key, value)]
    Invalid { key: &'static str, value: String },
}

impl std::error::Error for ConfigError {}

/// Connection pool settings handed to sea-orm's `ConnectOptions`.
#[derive(Clone, Debug)]
pub struct PoolConfig {
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    /// How long a request waits on an exhausted pool before failing.
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    pub sql_logging: bool,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub bind_address: String,
    pub pool: PoolConfig,
    pub ensure_schema: bool,
    pub image_dir: PathBuf,
    pub image_url_prefix: String,
}

impl Config {
    /// Reads the process environment. Call `dotenv::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        Ok(Self {
            database_url,
            bind_address: lookup("BIND_ADDRESS").unwrap_or_else(|| "127.0.0.1:3000".to_owned()),
            pool: PoolConfig {
                max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 100)?,
                min_connections: parse_or(&lookup, "DB_MIN_CONNECTIONS", 5)?,
                connect_timeout: seconds_or(&lookup, "DB_CONNECT_TIMEOUT", 8)?,
                acquire_timeout: seconds_or(&lookup, "DB_ACQUIRE_TIMEOUT", 8)?,
                idle_timeout: seconds_or(&lookup, "DB_IDLE_TIMEOUT", 8)?,
                sql_logging: parse_or(&lookup, "DB_SQL_LOGGING", true)?,
            },
            ensure_schema: parse_or(&lookup, "DB_ENSURE_SCHEMA", false)?,
            image_dir: lookup("DIR_IMAGES")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("images")),
            image_url_prefix: lookup("IMAGES_URL_PREFIX").unwrap_or_else(|| "/images".to_owned()),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => {
            let parsed = value.trim().parse::<T>();
            parsed.map_err(|_| ConfigError::Invalid { key, value })
        }
        None => Ok(default),
    }
}

fn seconds_or<F>(lookup: &F, key: &'static str, default: u64) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    parse_or(lookup, key, default).map(Duration::from_secs)
}
