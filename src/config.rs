//! Service configuration from environment variables.

use crate::error::ConfigError;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3001;
/// Matches the usual JSON body parser default of 100kb.
pub const DEFAULT_BODY_LIMIT: usize = 100 * 1024;

#[derive(Clone, Debug)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub body_limit: usize,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    /// When `None`, connection parameters come from `PGHOST`, `PGUSER`, `PGDATABASE` and friends.
    pub url: Option<String>,
    /// `search_path` for every pooled connection; the server default when unset.
    pub schema: Option<String>,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    /// Create the tables at startup if they are missing.
    pub init_schema: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            url: None,
            schema: None,
            max_connections: 5,
            acquire_timeout: Duration::from_secs(5),
            init_schema: true,
        }
    }
}

impl Config {
    /// Read config from the process environment. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read config through `lookup`; unset and empty variables fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let server_defaults = ServerConfig::default();
        let db_defaults = DatabaseConfig::default();

        let server = ServerConfig {
            host: parse_var(&get, "HOST")?.unwrap_or(server_defaults.host),
            port: parse_var(&get, "PORT")?.unwrap_or(server_defaults.port),
            body_limit: parse_var(&get, "BODY_LIMIT_BYTES")?.unwrap_or(server_defaults.body_limit),
        };

        let max_connections = parse_var(&get, "DB_MAX_CONNECTIONS")?.unwrap_or(db_defaults.max_connections);
        if max_connections == 0 {
            return Err(ConfigError::Invalid {
                name: "DB_MAX_CONNECTIONS",
                value: "0".into(),
                reason: "must be at least 1".into(),
            });
        }
        let database = DatabaseConfig {
            url: get("DATABASE_URL"),
            schema: get("DB_SCHEMA"),
            max_connections,
            acquire_timeout: parse_var::<u64, _>(&get, "DB_ACQUIRE_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(db_defaults.acquire_timeout),
            init_schema: match get("DB_INIT_SCHEMA") {
                Some(v) => parse_bool("DB_INIT_SCHEMA", &v)?,
                None => db_defaults.init_schema,
            },
        };

        Ok(Config { server, database })
    }
}

fn parse_var<T, G>(get: &G, name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(name) {
        None => Ok(None),
        Some(value) => value.parse::<T>().map(Some).map_err(|e| ConfigError::Invalid {
            name,
            reason: e.to_string(),
            value,
        }),
    }
}

fn parse_bool(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            name,
            value: value.to_string(),
            reason: "expected true or false".into(),
        }),
    }
}
