// Environment-driven server configuration

use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

use crate::auth::password::PasswordService;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set in environment")]
    Missing(&'static str),

    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    /// `None` issues tokens without an `exp` claim
    pub jwt_expiry_seconds: Option<i64>,
    pub bcrypt_cost: u32,
    /// 0 disables the signup password length rule
    pub min_password_length: usize,
    /// Built single-page client to serve for non-API paths
    pub client_dir: Option<PathBuf>,
}

impl Config {
    pub const DEFAULT_DATABASE_URL: &'static str = "postgresql://localhost:5432/member_area";
    pub const DEFAULT_PORT: u16 = 5000;

    /// Read configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let jwt_secret = get("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let bcrypt_cost = parse_or(&get, "BCRYPT_COST", PasswordService::DEFAULT_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                key: "BCRYPT_COST",
                value: bcrypt_cost.to_string(),
            });
        }

        let jwt_expiry_seconds = parse_optional::<i64, _>(&get, "JWT_EXPIRY_SECONDS")?;
        if let Some(seconds) = jwt_expiry_seconds {
            if seconds <= 0 {
                return Err(ConfigError::Invalid {
                    key: "JWT_EXPIRY_SECONDS",
                    value: seconds.to_string(),
                });
            }
        }

        Ok(Self {
            database_url: get("DATABASE_URL")
                .unwrap_or_else(|| Self::DEFAULT_DATABASE_URL.to_string()),
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&get, "PORT", Self::DEFAULT_PORT)?,
            jwt_secret,
            jwt_expiry_seconds,
            bcrypt_cost,
            min_password_length: parse_or(&get, "SIGNUP_MIN_PASSWORD_LENGTH", 0)?,
            client_dir: get("CLIENT_DIR").map(PathBuf::from),
        })
    }

    /// `host:port` to bind the listener to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_optional<T, G>(get: &G, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
        None => Ok(None),
    }
}

fn parse_or<T, G>(get: &G, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    Ok(parse_optional(get, key)?.unwrap_or(default))
}
