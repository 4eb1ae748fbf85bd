use std::env;
use std::str::FromStr;
use std::time::Duration;

use lettre::Address;
use thiserror::Error;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_SMTP_PORT: u16 = 465;
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";
const DEFAULT_FROM_NAME: &str = "Aangan Site";
const DEFAULT_RETRY_BACKOFF_MS: u64 = 250;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[derive(Clone, Debug)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
    pub to_email: String,
    pub from_name: String,
}

#[derive(Clone, Debug)]
pub struct RetryPolicy {
    pub retries: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 0,
            backoff: Duration::from_millis(DEFAULT_RETRY_BACKOFF_MS),
        }
    }
}

/// Everything the relay needs at process start. Built once in `main` and handed
/// to the router; nothing reads the environment after that.
#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub smtp: SmtpConfig,
    pub retry: RetryPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`] but reading from an arbitrary source, so tests
    /// don't have to touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &'static str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let port = parse_or(get("PORT"), "PORT", DEFAULT_PORT)?;
        let cors_origins = parse_origins(
            get("CORS_ORIGINS")
                .as_deref()
                .unwrap_or(DEFAULT_CORS_ORIGINS),
        );

        let smtp = SmtpConfig {
            host: require("SMTP_HOST")?,
            port: parse_or(get("SMTP_PORT"), "SMTP_PORT", DEFAULT_SMTP_PORT)?,
            user: require_address(require("SMTP_USER")?, "SMTP_USER")?,
            pass: require("SMTP_PASS")?,
            to_email: require_address(require("TO_EMAIL")?, "TO_EMAIL")?,
            from_name: get("MAIL_FROM_NAME").unwrap_or_else(|| DEFAULT_FROM_NAME.to_string()),
        };

        let retry = RetryPolicy {
            retries: parse_or(get("MAIL_RETRIES"), "MAIL_RETRIES", 0)?,
            backoff: Duration::from_millis(parse_or(
                get("MAIL_RETRY_BACKOFF_MS"),
                "MAIL_RETRY_BACKOFF_MS",
                DEFAULT_RETRY_BACKOFF_MS,
            )?),
        };

        Ok(Self {
            port,
            cors_origins,
            smtp,
            retry,
        })
    }
}

pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Keeps the raw value but refuses anything lettre can't use as a mailbox.
fn require_address(value: String, var: &'static str) -> Result<String, ConfigError> {
    let value = value.trim().to_string();
    value
        .parse::<Address>()
        .map_err(|e| ConfigError::Invalid {
            var,
            reason: e.to_string(),
        })?;
    Ok(value)
}

fn parse_or<T>(value: Option<String>, var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(default),
        Some(v) => v.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
        }),
    }
}
