//! Process settings read from the environment (and `.env`, loaded by the binary).

use crate::error::ConfigError;
use std::net::SocketAddr;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/biztime";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 64 * 1024;

/// Deployment mode. Production hides server-side error details from clients.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl std::str::FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" | "test" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(ConfigError::Invalid {
                name: "APP_ENV",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    pub environment: Environment,
    pub body_limit_bytes: usize,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build settings from any variable source. Unset or empty variables take their default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let database_url = var("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into());
        let bind_addr: SocketAddr = parse_or(var("BIND_ADDR"), "BIND_ADDR", DEFAULT_BIND_ADDR.parse().ok())?;
        let max_connections = parse_or(var("DB_MAX_CONNECTIONS"), "DB_MAX_CONNECTIONS", Some(DEFAULT_MAX_CONNECTIONS))?;
        let environment = parse_or(var("APP_ENV"), "APP_ENV", Some(Environment::Development))?;
        let body_limit_bytes = parse_or(var("BODY_LIMIT_BYTES"), "BODY_LIMIT_BYTES", Some(DEFAULT_BODY_LIMIT_BYTES))?;

        if max_connections == 0 {
            return Err(ConfigError::Invalid {
                name: "DB_MAX_CONNECTIONS",
                value: "0".into(),
            });
        }

        Ok(Settings {
            database_url,
            bind_addr,
            max_connections,
            environment,
            body_limit_bytes,
        })
    }

    pub fn expose_error_details(&self) -> bool {
        self.environment != Environment::Production
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            database_url: DEFAULT_DATABASE_URL.into(),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            environment: Environment::Development,
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
        }
    }
}

fn parse_or<T: std::str::FromStr>(
    raw: Option<String>,
    name: &'static str,
    default: Option<T>,
) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid { name, value }),
        None => default.ok_or(ConfigError::Invalid {
            name,
            value: String::new(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings_from(vars: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Settings::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let s = settings_from(&[]).unwrap();
        assert_eq!(s.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(s.bind_addr.port(), 3000);
        assert_eq!(s.max_connections, 5);
        assert_eq!(s.environment, Environment::Development);
        assert_eq!(s.body_limit_bytes, 64 * 1024);
        assert!(s.expose_error_details());
    }

    #[test]
    fn reads_overrides() {
        let s = settings_from(&[
            ("DATABASE_URL", "postgres://db:5432/biztime_test"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("DB_MAX_CONNECTIONS", "12"),
            ("APP_ENV", "Production"),
            ("BODY_LIMIT_BYTES", "1024"),
        ])
        .unwrap();
        assert_eq!(s.database_url, "postgres://db:5432/biztime_test");
        assert_eq!(s.bind_addr, "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(s.max_connections, 12);
        assert_eq!(s.environment, Environment::Production);
        assert_eq!(s.body_limit_bytes, 1024);
        assert!(!s.expose_error_details());
    }

    #[test]
    fn empty_values_fall_back_to_defaults() {
        let s = settings_from(&[("BIND_ADDR", "  "), ("APP_ENV", "")]).unwrap();
        assert_eq!(s.bind_addr.port(), 3000);
        assert_eq!(s.environment, Environment::Development);
    }

    #[test]
    fn rejects_invalid_values() {
        let err = settings_from(&[("DB_MAX_CONNECTIONS", "many")]).unwrap_err();
        assert_eq!(err.to_string(), "invalid value for DB_MAX_CONNECTIONS: 'many'");
        assert!(settings_from(&[("DB_MAX_CONNECTIONS", "0")]).is_err());
        assert!(settings_from(&[("APP_ENV", "staging")]).is_err());
        assert!(settings_from(&[("BIND_ADDR", "localhost")]).is_err());
    }
}
