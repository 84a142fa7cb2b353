use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub server_addr: String,
    pub db_max_connections: u32,

    // Rate limiting
    pub rate_login_per_min: u32,
    pub rate_register_per_min: u32,

    // Logging
    pub log_dir: String,
    pub log_level: tracing::Level,
}

impl Config {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            server_addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            db_max_connections: parse_or("DB_MAX_CONNECTIONS", 10)?,

            rate_login_per_min: parse_or("RATE_LOGIN_PER_MIN", 60)?,
            rate_register_per_min: parse_or("RATE_REGISTER_PER_MIN", 30)?,

            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string()),
            log_level: parse_or("LOG_LEVEL", tracing::Level::DEBUG)?,
        })
    }
}

fn parse_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{key} has an invalid value {raw:?}: {e}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_defaults() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("mysql://root@localhost/attendance")),
                ("SERVER_ADDR", None),
                ("DB_MAX_CONNECTIONS", None),
                ("RATE_LOGIN_PER_MIN", None),
                ("RATE_REGISTER_PER_MIN", None),
                ("LOG_DIR", None),
                ("LOG_LEVEL", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.database_url, "mysql://root@localhost/attendance");
                assert_eq!(config.server_addr, "0.0.0.0:8080");
                assert_eq!(config.db_max_connections, 10);
                assert_eq!(config.rate_login_per_min, 60);
                assert_eq!(config.rate_register_per_min, 30);
                assert_eq!(config.log_dir, "logs");
                assert_eq!(config.log_level, tracing::Level::DEBUG);
            },
        );
    }

    #[test]
    fn reads_overrides() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("mysql://app@db/attendance")),
                ("SERVER_ADDR", Some("127.0.0.1:9000")),
                ("RATE_LOGIN_PER_MIN", Some("5")),
                ("LOG_LEVEL", Some("info")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.server_addr, "127.0.0.1:9000");
                assert_eq!(config.rate_login_per_min, 5);
                assert_eq!(config.log_level, tracing::Level::INFO);
            },
        );
    }

    #[test]
    fn requires_database_url() {
        temp_env::with_var_unset("DATABASE_URL", || {
            let err = Config::from_env().unwrap_err();
            assert!(err.to_string().contains("DATABASE_URL"));
        });
    }

    #[test]
    fn rejects_bad_numbers() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("mysql://root@localhost/attendance")),
                ("DB_MAX_CONNECTIONS", Some("lots")),
            ],
            || {
                let err = Config::from_env().unwrap_err();
                assert!(err.to_string().contains("DB_MAX_CONNECTIONS"));
            },
        );
    }
}
