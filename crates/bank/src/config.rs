//! Connection settings for the bank's MySQL server.

use std::env;

use serde::{Deserialize, Serialize};
use sqlx::mysql::MySqlConnectOptions;

use crate::errors::AppError;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 3306;
pub const DEFAULT_USER: &str = "root";
pub const DEFAULT_DATABASE: &str = "testudo_bank";

/// Where to connect and as whom.
#[derive(Clone, Serialize, Deserialize)]
pub struct ConnectionSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            user: DEFAULT_USER.to_string(),
            password: String::new(),
            database: DEFAULT_DATABASE.to_string(),
        }
    }
}

impl std::fmt::Debug for ConnectionSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("database", &self.database)
            .finish_non_exhaustive()
    }
}

impl ConnectionSettings {
    /// Reads `MYSQL_ENDPOINT`, `MYSQL_PORT`, `MYSQL_USER`, `MYSQL_PASSWORD` and
    /// `MYSQL_DATABASE` from the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Self::from_env`] but with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let defaults = Self::default();

        let port = match lookup("MYSQL_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| AppError::Config(format!("MYSQL_PORT={raw:?}: {e}")))?,
            None => defaults.port,
        };

        Ok(Self {
            host: lookup("MYSQL_ENDPOINT").unwrap_or(defaults.host),
            port,
            user: lookup("MYSQL_USER").unwrap_or(defaults.user),
            password: lookup("MYSQL_PASSWORD").unwrap_or(defaults.password),
            database: lookup("MYSQL_DATABASE").unwrap_or(defaults.database),
        })
    }

    /// Options for a server-level connection with no default database,
    /// used to create or drop the database itself.
    pub fn server_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
    }

    /// Options for a connection with the bank database selected.
    pub fn database_options(&self) -> MySqlConnectOptions {
        self.server_options().database(&self.database)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let settings = ConnectionSettings::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(settings.host, "localhost");
        assert_eq!(settings.port, 3306);
        assert_eq!(settings.user, "root");
        assert_eq!(settings.password, "");
        assert_eq!(settings.database, "testudo_bank");
    }

    #[test]
    fn test_overrides_from_environment() {
        let settings = ConnectionSettings::from_lookup(lookup_from(&[
            ("MYSQL_ENDPOINT", "db.internal"),
            ("MYSQL_PORT", "3307"),
            ("MYSQL_USER", "teller"),
            ("MYSQL_PASSWORD", "hunter2"),
            ("MYSQL_DATABASE", "bank_staging"),
        ]))
        .unwrap();

        assert_eq!(settings.host, "db.internal");
        assert_eq!(settings.port, 3307);
        assert_eq!(settings.user, "teller");
        assert_eq!(settings.password, "hunter2");
        assert_eq!(settings.database, "bank_staging");
    }

    #[test]
    fn test_bad_port_is_config_error() {
        let err = ConnectionSettings::from_lookup(lookup_from(&[("MYSQL_PORT", "not-a-port")]))
            .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_debug_omits_password() {
        let settings = ConnectionSettings {
            password: "hunter2".to_string(),
            ..Default::default()
        };
        assert!(!format!("{settings:?}").contains("hunter2"));
    }
}
