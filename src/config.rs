use std::env;
use std::net::{AddrParseError, IpAddr, Ipv4Addr, SocketAddr};
use std::num::ParseIntError;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=info,hyper=warn";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid PORT {value:?}: {source}")]
    InvalidPort {
        value: String,
        source: ParseIntError,
    },

    #[error("Invalid HOST {value:?}: {source}")]
    InvalidHost {
        value: String,
        source: AddrParseError,
    },

    #[error("Invalid LOG_FORMAT {0:?}, expected \"json\" or \"pretty\"")]
    InvalidLogFormat(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            _ => Err(ConfigError::InvalidLogFormat(s.to_string())),
        }
    }
}

/// Server settings read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub log_format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            log_format: LogFormat::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from `HOST`, `PORT` and `LOG_FORMAT`
    ///
    /// Unset variables fall back to the defaults; set but malformed values are errors.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = match lookup("HOST") {
            Some(value) => value
                .parse::<IpAddr>()
                .map_err(|source| ConfigError::InvalidHost { value, source })?,
            None => defaults.host,
        };

        let port = match lookup("PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|source| ConfigError::InvalidPort { value, source })?,
            None => defaults.port,
        };

        let log_format = match lookup("LOG_FORMAT") {
            Some(value) => value.parse()?,
            None => defaults.log_format,
        };

        Ok(Self {
            host,
            port,
            log_format,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
