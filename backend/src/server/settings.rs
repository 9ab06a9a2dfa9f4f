//! Environment-driven server settings.
//!
//! Every value has a default, so an empty environment yields a working
//! production configuration. Values that are present but unparseable are
//! rejected rather than silently replaced.

use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use mockable::Env;

pub(crate) const PORT_ENV: &str = "PORT";
pub(crate) const HOST_ENV: &str = "HOST";
pub(crate) const APP_ENV_ENV: &str = "APP_ENV";
pub(crate) const STATIC_DIR_ENV: &str = "STATIC_DIR";

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_STATIC_DIR: &str = "dist/public";
const PORT_EXPECTED: &str = "an integer between 0 and 65535";
const HOST_EXPECTED: &str = "an IPv4 or IPv6 address";
const APP_ENV_EXPECTED: &str = "development|production";

/// Whether the server runs for local development or in production.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum RuntimeMode {
    /// Internal error causes are disclosed in 500 responses.
    Development,
    /// Internal error causes stay in the logs.
    #[default]
    Production,
}

impl RuntimeMode {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Some(Self::Development),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }

    /// `true` when internal error detail may be disclosed.
    pub fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }
}

impl fmt::Display for RuntimeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Development => "development",
            Self::Production => "production",
        })
    }
}

/// Errors raised while reading server settings.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Resolved server settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerSettings {
    /// Interface to bind.
    pub host: IpAddr,
    /// TCP port; `0` picks a free one.
    pub port: u16,
    /// Development or production behaviour.
    pub runtime_mode: RuntimeMode,
    /// Directory holding the built frontend.
    pub static_dir: PathBuf,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: DEFAULT_PORT,
            runtime_mode: RuntimeMode::Production,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }
}

impl ServerSettings {
    /// Read settings from `PORT`, `HOST`, `APP_ENV` and `STATIC_DIR`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use goloyal::server::{RuntimeMode, ServerSettings};
    /// use mockable::MockEnv;
    ///
    /// let mut env = MockEnv::new();
    /// env.expect_string().returning(|name| match name {
    ///     "PORT" => Some("8080".to_owned()),
    ///     "APP_ENV" => Some("development".to_owned()),
    ///     _ => None,
    /// });
    ///
    /// let settings = ServerSettings::from_env(&env).expect("valid settings");
    /// assert_eq!(settings.port, 8080);
    /// assert_eq!(settings.runtime_mode, RuntimeMode::Development);
    /// ```
    pub fn from_env<E: Env>(env: &E) -> Result<Self, SettingsError> {
        let port = match non_blank(env, PORT_ENV) {
            Some(raw) => raw.trim().parse().map_err(|_| invalid(PORT_ENV, raw, PORT_EXPECTED))?,
            None => DEFAULT_PORT,
        };
        let host = non_blank(env, HOST_ENV)
            .unwrap_or_else(|| DEFAULT_HOST.to_owned());
        let host = host
            .trim()
            .parse()
            .map_err(|_| invalid(HOST_ENV, host.clone(), HOST_EXPECTED))?;
        let runtime_mode = match non_blank(env, APP_ENV_ENV) {
            Some(raw) => {
                RuntimeMode::parse(&raw).ok_or_else(|| invalid(APP_ENV_ENV, raw, APP_ENV_EXPECTED))?
            }
            None => RuntimeMode::default(),
        };
        let static_dir = non_blank(env, STATIC_DIR_ENV)
            .map_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR), PathBuf::from);

        Ok(Self {
            host,
            port,
            runtime_mode,
            static_dir,
        })
    }

    /// Socket address the listener binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn non_blank<E: Env>(env: &E, name: &str) -> Option<String> {
    env.string(name).filter(|value| !value.trim().is_empty())
}

fn invalid(name: &'static str, value: String, expected: &'static str) -> SettingsError {
    SettingsError::InvalidEnv {
        name,
        value,
        expected,
    }
}
