//! # Bridge Configuration
//!
//! Where the HTTP backend lives and how long to wait for it.
//!
//! Sources, lowest to highest precedence:
//! 1. Built-in defaults (`http://localhost:8000`, 10 seconds)
//! 2. Optional TOML file with a `[backend]` table (`url`, `timeout_secs`)
//! 3. Environment: `MCP_SERVER_URL`, `MCP_TIMEOUT_SECS`
//! 4. Explicit overrides (CLI flags)

use crate::error::BridgeError;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const URL_ENV: &str = "MCP_SERVER_URL";
pub const TIMEOUT_ENV: &str = "MCP_TIMEOUT_SECS";

// =============================================================================
// RESOLVED CONFIGURATION
// =============================================================================

/// Validated bridge configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Backend base address, without trailing slash.
    pub base_url: String,
    /// Upper bound on a single remote call.
    pub timeout: Duration,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl BridgeConfig {
    /// Build a configuration, rejecting an empty URL or a zero timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, BridgeError> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(BridgeError::Config("backend URL must not be empty".into()));
        }
        if timeout.is_zero() {
            return Err(BridgeError::Config("timeout must be greater than zero".into()));
        }
        Ok(Self { base_url, timeout })
    }

    /// Resolve from an optional file, the process environment and overrides.
    pub fn load(file: Option<&Path>, overrides: ConfigOverrides) -> Result<Self, BridgeError> {
        let file = match file {
            Some(path) => Some(FileConfig::read(path)?),
            None => None,
        };
        Self::resolve(file, |key| std::env::var(key).ok(), overrides)
    }

    /// Layer the sources on top of the defaults.
    ///
    /// `env` is a lookup function so callers can substitute the process
    /// environment.
    pub fn resolve<F>(
        file: Option<FileConfig>,
        env: F,
        overrides: ConfigOverrides,
    ) -> Result<Self, BridgeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut url = DEFAULT_BASE_URL.to_string();
        let mut timeout_secs = DEFAULT_TIMEOUT_SECS;

        if let Some(file) = file {
            if let Some(file_url) = file.backend.url {
                url = file_url;
            }
            if let Some(secs) = file.backend.timeout_secs {
                timeout_secs = secs;
            }
        }

        if let Some(env_url) = env(URL_ENV) {
            url = env_url;
        }
        if let Some(raw) = env(TIMEOUT_ENV) {
            timeout_secs = raw.trim().parse().map_err(|e| {
                BridgeError::Config(format!(
                    "{TIMEOUT_ENV} must be a whole number of seconds, got '{raw}': {e}"
                ))
            })?;
        }

        if let Some(cli_url) = overrides.url {
            url = cli_url;
        }
        if let Some(secs) = overrides.timeout_secs {
            timeout_secs = secs;
        }

        Self::new(url, Duration::from_secs(timeout_secs))
    }
}

/// Values given explicitly by the host, e.g. from command-line flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub url: Option<String>,
    pub timeout_secs: Option<u64>,
}

// =============================================================================
// FILE FORMAT
// =============================================================================

/// On-disk configuration.
///
/// ```toml
/// [backend]
/// url = "http://graphiti-mcp:8000"
/// timeout_secs = 10
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub backend: BackendSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BackendSection {
    pub url: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl FileConfig {
    pub fn parse(text: &str) -> Result<Self, BridgeError> {
        toml::from_str(text).map_err(|e| BridgeError::Config(format!("invalid config file: {e}")))
    }

    pub fn read(path: &Path) -> Result<Self, BridgeError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            BridgeError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::parse(&text)
    }
}

// =============================================================================
// TESTS
// =============================================================================
