//! Service settings loaded via OrthoConfig.
//!
//! Values layer from defaults, a config file, `TICKER_WATCH_*` environment
//! variables and CLI flags.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Settings controlling the HTTP listener and subscription storage.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TICKER_WATCH")]
pub struct AppSettings {
    /// Listen address; defaults to `0.0.0.0:8080`.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. In-memory storage is used when absent.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
}

/// A setting held a value that cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address {value:?}: {reason}")]
    BindAddr { value: String, reason: String },
    #[error("db_max_connections must be at least 1")]
    ZeroConnections,
}

impl AppSettings {
    /// Parsed listen address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|err: std::net::AddrParseError| SettingsError::BindAddr {
            value: value.to_owned(),
            reason: err.to_string(),
        })
    }

    /// Database URL, treating a blank value as unset.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn db_max_connections(&self) -> Result<u32, SettingsError> {
        match self.db_max_connections.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS) {
            0 => Err(SettingsError::ZeroConnections),
            n => Ok(n),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 3] = [
        "TICKER_WATCH_BIND_ADDR",
        "TICKER_WATCH_DATABASE_URL",
        "TICKER_WATCH_DB_MAX_CONNECTIONS",
    ];

    fn load() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("ticker-watch")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load();

        assert_eq!(
            settings.bind_addr(),
            Ok(SocketAddr::from(([0, 0, 0, 0], 8080)))
        );
        assert_eq!(settings.database_url(), None);
        assert_eq!(settings.db_max_connections(), Ok(10));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("TICKER_WATCH_BIND_ADDR", Some("127.0.0.1:9090".to_owned())),
            (
                "TICKER_WATCH_DATABASE_URL",
                Some("postgres://localhost/tickers".to_owned()),
            ),
            ("TICKER_WATCH_DB_MAX_CONNECTIONS", Some("3".to_owned())),
        ]);

        let settings = load();

        assert_eq!(
            settings.bind_addr(),
            Ok(SocketAddr::from(([127, 0, 0, 1], 9090)))
        );
        assert_eq!(settings.database_url(), Some("postgres://localhost/tickers"));
        assert_eq!(settings.db_max_connections(), Ok(3));
    }

    #[rstest]
    #[case("not-an-address")]
    #[case("localhost")]
    fn invalid_bind_addr_is_reported(#[case] value: &str) {
        let settings = AppSettings {
            bind_addr: Some(value.to_owned()),
            database_url: None,
            db_max_connections: None,
        };

        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::BindAddr { .. })
        ));
    }

    #[rstest]
    fn blank_database_url_means_memory_storage() {
        let settings = AppSettings {
            bind_addr: None,
            database_url: Some("   ".to_owned()),
            db_max_connections: Some(0),
        };

        assert_eq!(settings.database_url(), None);
        assert_eq!(
            settings.db_max_connections(),
            Err(SettingsError::ZeroConnections)
        );
    }
}
