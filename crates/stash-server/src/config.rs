use std::fmt;

use stash_core::AppError;
use stash_core::password::{DEFAULT_ITERATIONS, MAX_ITERATIONS, MIN_ITERATIONS};
use stash_core::token::{DEFAULT_TOKEN_TTL_SECS, MAX_TOKEN_TTL_SECS};

const DEFAULT_PORT: u16 = 8080;
const RECOMMENDED_SECRET_LEN: usize = 32;

/// Server settings read from the environment.
#[derive(Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub jwt_secret: String,
    pub token_ttl_secs: i64,
    pub pbkdf2_iterations: u32,
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("port", &self.port)
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field("pbkdf2_iterations", &self.pbkdf2_iterations)
            .finish()
    }
}

impl ServerConfig {
    /// Read configuration from environment variables.
    ///
    /// - `STASH_JWT_SECRET` (required)
    /// - `STASH_PORT` (optional, defaults to 8080)
    /// - `STASH_TOKEN_TTL_SECS` (optional, defaults to 3600, at most one year)
    /// - `STASH_PBKDF2_ITERATIONS` (optional, defaults to 600000, 1000 to 10000000)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let jwt_secret = lookup("STASH_JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                AppError::ConfigError("STASH_JWT_SECRET not set. Required to sign tokens.".into())
            })?;
        if jwt_secret.len() < RECOMMENDED_SECRET_LEN {
            tracing::warn!(
                "STASH_JWT_SECRET is shorter than {RECOMMENDED_SECRET_LEN} bytes; use a longer random secret"
            );
        }

        let port = parse_or(&lookup, "STASH_PORT", DEFAULT_PORT)?;

        let token_ttl_secs = parse_or(&lookup, "STASH_TOKEN_TTL_SECS", DEFAULT_TOKEN_TTL_SECS)?;
        if !(1..=MAX_TOKEN_TTL_SECS).contains(&token_ttl_secs) {
            return Err(AppError::ConfigError(format!(
                "STASH_TOKEN_TTL_SECS must be between 1 and {MAX_TOKEN_TTL_SECS}"
            )));
        }

        let pbkdf2_iterations = parse_or(&lookup, "STASH_PBKDF2_ITERATIONS", DEFAULT_ITERATIONS)?;
        if !(MIN_ITERATIONS..=MAX_ITERATIONS).contains(&pbkdf2_iterations) {
            return Err(AppError::ConfigError(format!(
                "STASH_PBKDF2_ITERATIONS must be between {MIN_ITERATIONS} and {MAX_ITERATIONS}"
            )));
        }

        Ok(Self {
            port,
            jwt_secret,
            token_ttl_secs,
            pbkdf2_iterations,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, AppError> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| AppError::ConfigError(format!("Invalid {key} '{raw}'"))),
    }
}
