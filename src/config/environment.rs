// ABOUTME: Environment-based client configuration: base URL, credentials and HTTP timeouts
// ABOUTME: Reads KECHAIN_* variables, optionally seeded from a .env file via dotenvy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 KE-chain Client Contributors

//! Environment-only configuration
//!
//! There is no configuration file format. Settings come from explicit
//! arguments or from `KECHAIN_*` environment variables, which a `.env` file
//! may seed. Variables already present in the process environment always win
//! over the file.

use kechain_core::constants::env_config;
use kechain_core::{KechainError, KechainResult};
use std::env;
use std::fmt;
use std::path::Path;
use tracing::{debug, info, warn};

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Default connect timeout in seconds
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// How requests authenticate
#[derive(Clone, PartialEq, Eq, Default)]
pub enum Credentials {
    /// No authentication header
    #[default]
    Anonymous,
    /// `Authorization: Token <token>`
    Token(String),
    /// HTTP basic authentication
    Basic {
        /// Login name
        username: String,
        /// Password
        password: String,
    },
}

impl Credentials {
    /// Pick credentials from optional parts; a token wins over username/password
    ///
    /// Empty strings count as missing. Returns `None` when neither a token nor
    /// a complete username/password pair is available.
    #[must_use]
    pub fn from_parts(
        token: Option<&str>,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Option<Self> {
        fn present(value: Option<&str>) -> Option<&str> {
            value.filter(|v| !v.is_empty())
        }

        if let Some(token) = present(token) {
            return Some(Self::Token(token.to_owned()));
        }
        match (present(username), present(password)) {
            (Some(username), Some(password)) => Some(Self::Basic {
                username: username.to_owned(),
                password: password.to_owned(),
            }),
            _ => None,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Anonymous => f.write_str("Anonymous"),
            Self::Token(_) => f.write_str("Token(<redacted>)"),
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
        }
    }
}

/// HTTP client tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpClientConfig {
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
    /// Connection establishment timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

/// Everything needed to build a [`Client`](crate::client::Client)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the KE-chain instance, e.g. `https://acme.ke-chain.com`
    pub url: String,
    /// Authentication
    pub credentials: Credentials,
    /// HTTP tuning
    pub http: HttpClientConfig,
}

impl ClientConfig {
    /// Anonymous configuration with default timeouts
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            credentials: Credentials::Anonymous,
            http: HttpClientConfig::default(),
        }
    }

    /// Set credentials
    #[must_use]
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Set HTTP tuning
    #[must_use]
    pub const fn with_http(mut self, http: HttpClientConfig) -> Self {
        self.http = http;
        self
    }
}

/// Snapshot of the `KECHAIN_*` environment variables
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSettings {
    /// `KECHAIN_URL`
    pub url: Option<String>,
    /// `KECHAIN_TOKEN`
    pub token: Option<String>,
    /// `KECHAIN_USERNAME`
    pub username: Option<String>,
    /// `KECHAIN_PASSWORD`
    pub password: Option<String>,
    /// `KECHAIN_SCOPE`
    pub scope: Option<String>,
    /// `KECHAIN_SCOPE_ID`
    pub scope_id: Option<String>,
    /// `KECHAIN_FORCE_ENV_USE`
    pub force_env_use: bool,
    /// `KECHAIN_TIMEOUT_SECS` and `KECHAIN_CONNECT_TIMEOUT_SECS`
    pub http: HttpClientConfig,
}

impl EnvSettings {
    /// Seed the environment from a `.env` file, then read the settings
    ///
    /// With `env_file` set, that file must exist and parse. Without it, a
    /// `.env` in the working directory is used when present.
    /// Variables already set in the process are never overridden. Values
    /// containing spaces must be quoted in the file, e.g.
    /// `KECHAIN_SCOPE="Bike Project"`.
    ///
    /// # Errors
    ///
    /// Returns [`KechainError::Config`] if an explicit `env_file` cannot be loaded
    pub fn load(env_file: Option<&Path>) -> KechainResult<Self> {
        match env_file {
            Some(path) => {
                dotenvy::from_path(path).map_err(|e| {
                    KechainError::config(format!(
                        "cannot load environment file {}: {e}",
                        path.display()
                    ))
                })?;
                info!(path = %path.display(), "Loaded KE-chain settings from environment file");
            }
            None => {
                if let Err(e) = dotenvy::dotenv() {
                    debug!("No .env file loaded: {e}");
                }
            }
        }
        Ok(Self::from_env())
    }

    /// Read the settings from the process environment only
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            url: env_var(env_config::KECHAIN_URL),
            token: env_var(env_config::KECHAIN_TOKEN),
            username: env_var(env_config::KECHAIN_USERNAME),
            password: env_var(env_config::KECHAIN_PASSWORD),
            scope: env_var(env_config::KECHAIN_SCOPE),
            scope_id: env_var(env_config::KECHAIN_SCOPE_ID),
            force_env_use: env_var(env_config::KECHAIN_FORCE_ENV_USE)
                .is_some_and(|value| parse_bool(&value)),
            http: HttpClientConfig {
                timeout_secs: env_secs(env_config::KECHAIN_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS),
                connect_timeout_secs: env_secs(
                    env_config::KECHAIN_CONNECT_TIMEOUT_SECS,
                    DEFAULT_CONNECT_TIMEOUT_SECS,
                ),
            },
        }
    }

    /// Credentials from the token or username/password variables
    #[must_use]
    pub fn credentials(&self) -> Option<Credentials> {
        Credentials::from_parts(
            self.token.as_deref(),
            self.username.as_deref(),
            self.password.as_deref(),
        )
    }

    /// Check that the variables needed when environment use is forced are set
    ///
    /// # Errors
    ///
    /// Returns [`KechainError::Config`] naming the first missing variable
    pub fn require_complete(&self) -> KechainResult<()> {
        if self.url.is_none() {
            return Err(KechainError::config(format!(
                "{} should be provided as environment variable (use of env vars is enforced)",
                env_config::KECHAIN_URL
            )));
        }
        if self.credentials().is_none() {
            return Err(KechainError::config(format!(
                "{} or {} and {} should be provided as environment variable(s) (use of env vars is enforced)",
                env_config::KECHAIN_TOKEN,
                env_config::KECHAIN_USERNAME,
                env_config::KECHAIN_PASSWORD
            )));
        }
        if self.scope.is_none() && self.scope_id.is_none() {
            return Err(KechainError::config(format!(
                "{} or {} should be provided as environment variable (use of env vars is enforced)",
                env_config::KECHAIN_SCOPE,
                env_config::KECHAIN_SCOPE_ID
            )));
        }
        Ok(())
    }

    /// Client configuration from these settings
    ///
    /// Missing credentials yield an anonymous configuration.
    ///
    /// # Errors
    ///
    /// Returns [`KechainError::Config`] when `KECHAIN_URL` is not set
    pub fn client_config(&self) -> KechainResult<ClientConfig> {
        let url = self.url.clone().ok_or_else(|| {
            KechainError::config(format!("{} is not set", env_config::KECHAIN_URL))
        })?;
        Ok(ClientConfig {
            url,
            credentials: self.credentials().unwrap_or_default(),
            http: self.http,
        })
    }
}

/// Interpret an environment flag; `true`, `1`, `ok`, `on` and `yes` are true
#[must_use]
pub fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "ok" | "on" | "yes"
    )
}

fn env_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}

fn env_secs(key: &str, default: u64) -> u64 {
    match env::var(key) {
        Ok(value) => value.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %value, default, "Invalid timeout, using default");
            default
        }),
        Err(_) => default,
    }
}
