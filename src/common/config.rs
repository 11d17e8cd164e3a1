use std::env;
use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;

/// Development-only fallback secret. Only used when explicitly allowed.
pub const DEV_SECRET_KEY: &str = "VIGILCAP_SECURE_HASH_KEY_2025";

pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";

/// Request body cap for the HTTP server, in line with common serverless hosts.
pub const DEFAULT_MAX_BODY_BYTES: usize = 100 * 1024 * 1024;

pub const SECRET_KEY_VAR: &str = "SECRET_KEY";
pub const ALLOW_DEV_SECRET_VAR: &str = "VERIFIER_ALLOW_DEV_SECRET";
pub const ADDR_VAR: &str = "VERIFIER_ADDR";
pub const MAX_BODY_BYTES_VAR: &str = "VERIFIER_MAX_BODY_BYTES";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("SECRET_KEY is not set; set it or enable VERIFIER_ALLOW_DEV_SECRET for local development")]
    MissingSecret,
    #[error("SECRET_KEY is the development key but VERIFIER_ALLOW_DEV_SECRET is not enabled")]
    DevSecretNotAllowed,
    #[error("invalid VERIFIER_ADDR '{0}'")]
    InvalidAddr(String),
    #[error("invalid VERIFIER_MAX_BODY_BYTES '{0}'")]
    InvalidBodyLimit(String),
}

/// HMAC key bytes. Immutable once loaded, cheap to clone, never printed.
#[derive(Clone)]
pub struct SecretKey(Arc<[u8]>);

impl SecretKey {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        SecretKey(Arc::from(bytes.into()))
    }

    pub fn expose(&self) -> &[u8] {
        &self.0
    }

    pub fn is_dev_default(&self) -> bool {
        &*self.0 == DEV_SECRET_KEY.as_bytes()
    }
}

impl From<&str> for SecretKey {
    fn from(value: &str) -> Self {
        SecretKey::new(value.as_bytes())
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

/// Everything the verifier needs, resolved once at startup.
#[derive(Clone, Debug)]
pub struct VerifierConfig {
    pub secret_key: SecretKey,
    pub addr: SocketAddr,
    pub max_body_bytes: usize,
}

impl VerifierConfig {
    pub fn new(secret_key: SecretKey) -> Self {
        VerifierConfig {
            secret_key,
            addr: default_addr(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    /// Config using [`DEV_SECRET_KEY`]. Never use outside local development.
    pub fn development() -> Self {
        Self::new(SecretKey::from(DEV_SECRET_KEY))
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Resolves config through `lookup` instead of the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let allow_dev = lookup(ALLOW_DEV_SECRET_VAR)
            .map(|v| is_truthy(&v))
            .unwrap_or(false);

        let secret_key = match lookup(SECRET_KEY_VAR).filter(|v| !v.is_empty()) {
            Some(value) => SecretKey::new(value.into_bytes()),
            None if allow_dev => SecretKey::from(DEV_SECRET_KEY),
            None => return Err(ConfigError::MissingSecret),
        };
        if secret_key.is_dev_default() && !allow_dev {
            return Err(ConfigError::DevSecretNotAllowed);
        }

        let addr = match lookup(ADDR_VAR) {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidAddr(raw))?,
            None => default_addr(),
        };

        let max_body_bytes = match lookup(MAX_BODY_BYTES_VAR) {
            Some(raw) => raw
                .trim()
                .parse()
                .ok()
                .filter(|limit| *limit > 0)
                .ok_or(ConfigError::InvalidBodyLimit(raw))?,
            None => DEFAULT_MAX_BODY_BYTES,
        };

        Ok(VerifierConfig {
            secret_key,
            addr,
            max_body_bytes,
        })
    }

    pub fn uses_dev_secret(&self) -> bool {
        self.secret_key.is_dev_default()
    }
}

fn default_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 3000))
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
