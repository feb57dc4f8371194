//! Process settings read from the environment (after `.env` is loaded by the binary).

use crate::error::ConfigError;
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use std::str::FromStr;

const DEFAULT_PORT: u16 = 4000;
const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Clone, Debug)]
pub struct DatabaseSettings {
    /// Full `DATABASE_URL`; takes precedence over the individual parts below.
    pub url: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub host: String,
    pub port: u16,
    pub name: Option<String>,
    pub ssl: bool,
    pub max_connections: u32,
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub database: DatabaseSettings,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let production = ["NODE_ENV", "APP_ENV"]
            .iter()
            .any(|k| get(k).is_some_and(|v| v.eq_ignore_ascii_case("production")));
        let ssl = match get("DB_SSL") {
            Some(v) => parse_bool("DB_SSL", &v)?,
            None => production,
        };

        let database = DatabaseSettings {
            url: get("DATABASE_URL"),
            user: get("DB_USER"),
            password: get("DB_PASSWORD"),
            host: get("DB_HOST").unwrap_or_else(|| "localhost".into()),
            port: parse_or("DB_PORT", get("DB_PORT"), DEFAULT_DB_PORT)?,
            name: get("DB_NAME"),
            ssl,
            max_connections: parse_or("DB_MAX_CONNECTIONS", get("DB_MAX_CONNECTIONS"), DEFAULT_MAX_CONNECTIONS)?,
        };

        Ok(Settings {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_or("PORT", get("PORT"), DEFAULT_PORT)?,
            database,
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseSettings {
    /// Connection options for the application database.
    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        let mut opts = match &self.url {
            Some(url) => PgConnectOptions::from_str(url).map_err(|_| ConfigError::Invalid {
                key: "DATABASE_URL",
                value: redact_url(url),
            })?,
            None => {
                let name = self.name.as_deref().ok_or(ConfigError::Missing("DATABASE_URL or DB_NAME"))?;
                let mut o = PgConnectOptions::new()
                    .host(&self.host)
                    .port(self.port)
                    .database(name);
                if let Some(user) = &self.user {
                    o = o.username(user);
                }
                if let Some(password) = &self.password {
                    o = o.password(password);
                }
                o
            }
        };
        // An explicit sslmode in the URL wins over DB_SSL.
        let url_sets_ssl = self.url.as_deref().is_some_and(|u| u.contains("sslmode="));
        if self.ssl && !url_sets_ssl {
            opts = opts.ssl_mode(PgSslMode::Require);
        }
        Ok(opts)
    }
}

fn parse_or<T: FromStr>(key: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError> {
    match value {
        Some(v) => v.parse().map_err(|_| ConfigError::Invalid { key, value: v }),
        None => Ok(default),
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
        }),
    }
}

/// Drop the password from a URL before it is echoed in an error.
fn redact_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            let creds = &url[scheme_end + 3..at];
            let user = creds.split(':').next().unwrap_or("");
            format!("{}{}:***{}", &url[..scheme_end + 3], user, &url[at..])
        }
        _ => url.to_string(),
    }
}
