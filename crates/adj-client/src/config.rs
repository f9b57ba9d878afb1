//! Adjudicator client configuration.
//!
//! Configures the backend base URL, identity injection, and the quorum the
//! session store derives phases with. Defaults target a local backend.
//! Override via environment variables or explicit construction.

use adj_core::Quorum;
use url::Url;

/// Default backend base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Whether requests carry the local participant identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentityMode {
    /// Attach `userId` (and `username` on argument submission) to requests.
    #[default]
    Attach,
    /// Send requests without identity fields.
    Omit,
}

impl std::str::FromStr for IdentityMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "attach" => Ok(IdentityMode::Attach),
            "omit" => Ok(IdentityMode::Omit),
            other => Err(ConfigError::InvalidIdentityMode(other.to_string())),
        }
    }
}

/// Configuration for connecting to the adjudication service.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend.
    pub base_url: Url,
    /// Optional per-request timeout in seconds. `None` waits indefinitely.
    pub timeout_secs: Option<u64>,
    /// Argument count at which a session awaits judgement.
    pub quorum: Quorum,
    /// Identity injection policy.
    pub identity: IdentityMode,
}

impl ClientConfig {
    /// Create a configuration for `base_url` with default settings.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout_secs: None,
            quorum: Quorum::default(),
            identity: IdentityMode::default(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `ADJUDICATOR_API_URL` (default: `http://localhost:8000`)
    /// - `ADJUDICATOR_TIMEOUT_SECS` (default: no timeout)
    /// - `ADJUDICATOR_QUORUM` (default: 2)
    /// - `ADJUDICATOR_IDENTITY`: `attach` or `omit` (default: `attach`)
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_url =
            std::env::var("ADJUDICATOR_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let base_url = Url::parse(&raw_url)
            .map_err(|e| ConfigError::InvalidUrl("ADJUDICATOR_API_URL".to_string(), e.to_string()))?;

        let timeout_secs = match std::env::var("ADJUDICATOR_TIMEOUT_SECS") {
            Ok(raw) => Some(raw.trim().parse().map_err(|_| {
                ConfigError::InvalidNumber("ADJUDICATOR_TIMEOUT_SECS".to_string(), raw)
            })?),
            Err(_) => None,
        };

        let quorum = match std::env::var("ADJUDICATOR_QUORUM") {
            Ok(raw) => {
                let count: usize = raw.trim().parse().map_err(|_| {
                    ConfigError::InvalidNumber("ADJUDICATOR_QUORUM".to_string(), raw.clone())
                })?;
                Quorum::new(count).map_err(|e| ConfigError::InvalidQuorum(e.to_string()))?
            }
            Err(_) => Quorum::default(),
        };

        let identity = match std::env::var("ADJUDICATOR_IDENTITY") {
            Ok(raw) => raw.parse()?,
            Err(_) => IdentityMode::default(),
        };

        Ok(Self {
            base_url,
            timeout_secs,
            quorum,
            identity,
        })
    }

    /// Create a configuration pointing to a local mock server (for testing).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if `uri` cannot be parsed.
    pub fn local_mock(uri: &str) -> Result<Self, ConfigError> {
        let base_url = Url::parse(uri)
            .map_err(|e| ConfigError::InvalidUrl(uri.to_string(), e.to_string()))?;
        Ok(Self {
            timeout_secs: Some(5),
            ..Self::new(base_url)
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("invalid number for {0}: {1:?}")]
    InvalidNumber(String, String),
    #[error("invalid quorum: {0}")]
    InvalidQuorum(String),
    #[error("invalid identity mode {0:?}; expected \"attach\" or \"omit\"")]
    InvalidIdentityMode(String),
}
