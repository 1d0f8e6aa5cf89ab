use std::fmt;
use std::time::Duration;

use log::{debug, warn};
use thiserror::Error;
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "https://api.bugcrowd.com/vulnerabilities";
pub const USERNAME_VAR: &str = "BUGCROWD_USERNAME";
pub const API_KEY_VAR: &str = "BUGCROWD_API_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variables: set BUGCROWD_USERNAME and BUGCROWD_API_KEY")]
    MissingCredentials,

    #[error("Invalid endpoint URL '{url}': {source}")]
    InvalidEndpoint {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Account identifier and API key used to authenticate a submission.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    username: String,
    api_key: String,
}

impl Credential {
    pub fn new(username: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            api_key: api_key.into(),
        }
    }

    /// Reads the credential pair from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves both variables through `lookup`; empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let username = lookup(USERNAME_VAR).filter(|v| !v.is_empty());
        let api_key = lookup(API_KEY_VAR).filter(|v| !v.is_empty());

        match (username, api_key) {
            (Some(username), Some(api_key)) => Ok(Self { username, api_key }),
            _ => Err(ConfigError::MissingCredentials),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Only for building the Authorization header.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// Loads a `.env` file from the working directory or its ancestors.
/// Variables already present in the environment win.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => debug!("Loaded .env from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => warn!("Failed to parse .env: {}", e),
    }
}

/// Where and how the submitter talks to the platform.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitConfig {
    pub endpoint: Url,
    /// `None` leaves the HTTP client's own default in place.
    pub timeout: Option<Duration>,
    pub proxy: Option<String>,
}

impl SubmitConfig {
    pub fn new(endpoint: &str) -> Result<Self, ConfigError> {
        let endpoint = Url::parse(endpoint).map_err(|source| ConfigError::InvalidEndpoint {
            url: endpoint.to_string(),
            source,
        })?;
        Ok(Self {
            endpoint,
            timeout: None,
            proxy: None,
        })
    }

    pub fn with_timeout(mut self, timeout_seconds: Option<u64>) -> Self {
        self.timeout = timeout_seconds.map(Duration::from_secs);
        self
    }

    pub fn with_proxy(mut self, proxy: Option<String>) -> Self {
        self.proxy = proxy.filter(|p| !p.is_empty());
        self
    }
}
