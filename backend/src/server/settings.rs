//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `DASHBOARD_*` environment variables, and
//! configuration files, in OrthoConfig's usual precedence order.

use std::net::SocketAddr;

use mockable::Env;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use dashboard::outbound::auth::DEFAULT_BCRYPT_COST;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const POSTGRES_URL_ENV: &str = "POSTGRES_URL";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// Neither `DASHBOARD_DATABASE_URL` nor `POSTGRES_URL` is set.
    #[error("database url missing: set DASHBOARD_DATABASE_URL or POSTGRES_URL")]
    MissingDatabaseUrl,
    /// The bind address does not parse.
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    /// The base URL does not parse.
    #[error("invalid base url '{value}': {source}")]
    BaseUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
}

/// Server settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DASHBOARD")]
pub struct AppSettings {
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// Public origin used to resolve sign-in callbacks.
    pub base_url: Option<String>,
    /// bcrypt work factor for new password digests.
    pub bcrypt_cost: Option<u32>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
}

impl AppSettings {
    /// Configured database URL, falling back to `POSTGRES_URL`.
    pub fn database_url(&self, env: &impl Env) -> Result<String, SettingsError> {
        self.database_url
            .clone()
            .or_else(|| env.string(POSTGRES_URL_ENV))
            .filter(|url| !url.trim().is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    /// Listening address, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Public base URL, defaulting to `http://localhost:3000`.
    pub fn base_url(&self) -> Result<Url, SettingsError> {
        let value = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        Url::parse(value).map_err(|source| SettingsError::BaseUrl {
            value: value.to_owned(),
            source,
        })
    }

    /// bcrypt cost, defaulting to 10.
    pub fn bcrypt_cost(&self) -> u32 {
        self.bcrypt_cost.unwrap_or(DEFAULT_BCRYPT_COST)
    }

    /// Pool size, defaulting to 10.
    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use mockable::MockEnv;
    use rstest::rstest;

    const SETTINGS_ENV: [&str; 5] = [
        "DASHBOARD_DATABASE_URL",
        "DASHBOARD_BIND_ADDR",
        "DASHBOARD_BASE_URL",
        "DASHBOARD_BCRYPT_COST",
        "DASHBOARD_POOL_MAX_SIZE",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("dashboard")]).expect("config should load")
    }

    fn env_with(postgres_url: Option<&'static str>) -> MockEnv {
        let mut env = MockEnv::new();
        env.expect_string()
            .times(0..)
            .returning(move |name| (name == POSTGRES_URL_ENV).then_some(postgres_url).flatten().map(str::to_owned));
        env
    }

    #[rstest]
    fn defaults_apply_when_nothing_is_set() {
        let _guard = lock_env(SETTINGS_ENV.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();

        assert_eq!(settings.bind_addr().expect("bind addr").to_string(), "0.0.0.0:8080");
        assert_eq!(settings.base_url().expect("base url").as_str(), "http://localhost:3000/");
        assert_eq!(settings.bcrypt_cost(), 10);
        assert_eq!(settings.pool_max_size(), 10);
        assert!(matches!(
            settings.database_url(&env_with(None)),
            Err(SettingsError::MissingDatabaseUrl)
        ));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("DASHBOARD_DATABASE_URL", Some("postgres://db/dashboard".to_owned())),
            ("DASHBOARD_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            ("DASHBOARD_BASE_URL", Some("https://dash.example".to_owned())),
            ("DASHBOARD_BCRYPT_COST", Some("12".to_owned())),
            ("DASHBOARD_POOL_MAX_SIZE", Some("4".to_owned())),
        ]);

        let settings = load_from_empty_args();

        assert_eq!(
            settings.database_url(&env_with(Some("postgres://fallback/db"))).expect("url"),
            "postgres://db/dashboard"
        );
        assert_eq!(settings.bind_addr().expect("bind addr").port(), 9000);
        assert_eq!(settings.base_url().expect("base url").host_str(), Some("dash.example"));
        assert_eq!(settings.bcrypt_cost(), 12);
        assert_eq!(settings.pool_max_size(), 4);
    }

    #[rstest]
    fn postgres_url_is_the_fallback() {
        let _guard = lock_env(SETTINGS_ENV.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();

        assert_eq!(
            settings.database_url(&env_with(Some("postgres://fallback/db"))).expect("url"),
            "postgres://fallback/db"
        );
    }

    #[rstest]
    #[case("not an address")]
    #[case("localhost")]
    fn malformed_bind_addresses_are_reported(#[case] value: &str) {
        let settings = AppSettings {
            database_url: None,
            bind_addr: Some(value.to_owned()),
            base_url: None,
            bcrypt_cost: None,
            pool_max_size: None,
        };
        assert!(matches!(settings.bind_addr(), Err(SettingsError::BindAddr { .. })));
    }
}
