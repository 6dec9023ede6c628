//! Token signing configuration.
//!
//! The signing secret is mandatory and has no built-in fallback: the process
//! refuses to start without `JWT_SECRET`. The secret is never printed, not
//! even through `Debug`.
//!
//! # Environment Variables
//!
//! - `JWT_SECRET`: HMAC signing secret (required, non-empty)
//! - `JWT_EXPIRY_SECONDS`: credential lifetime in seconds (default: 7200)

use std::env;
use std::fmt;

use anyhow::{Context, bail};

/// Credentials expire two hours after issuance unless configured otherwise.
pub const DEFAULT_TOKEN_EXPIRY_SECS: i64 = 2 * 60 * 60;

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiry_seconds: i64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, expiry_seconds: i64) -> Self {
        Self {
            secret: secret.into(),
            expiry_seconds,
        }
    }

    /// Loads the signing configuration from the environment.
    ///
    /// # Errors
    ///
    /// Fails when `JWT_SECRET` is unset or blank, or when
    /// `JWT_EXPIRY_SECONDS` is set but is not a positive integer.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_values(
            env::var("JWT_SECRET").ok(),
            env::var("JWT_EXPIRY_SECONDS").ok(),
        )
    }

    fn from_values(secret: Option<String>, expiry: Option<String>) -> anyhow::Result<Self> {
        let secret = match secret {
            Some(secret) if !secret.trim().is_empty() => secret,
            _ => bail!("JWT_SECRET must be set to a non-empty value"),
        };

        let expiry_seconds = match expiry {
            Some(raw) => {
                let seconds: i64 = raw
                    .trim()
                    .parse()
                    .context("JWT_EXPIRY_SECONDS must be an integer number of seconds")?;
                if seconds <= 0 {
                    bail!("JWT_EXPIRY_SECONDS must be positive");
                }
                seconds
            }
            None => DEFAULT_TOKEN_EXPIRY_SECS,
        };

        Ok(Self::new(secret, expiry_seconds))
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[redacted]")
            .field("expiry_seconds", &self.expiry_seconds)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_secret_is_rejected() {
        assert!(JwtConfig::from_values(None, None).is_err());
        assert!(JwtConfig::from_values(Some("   ".to_string()), None).is_err());
    }

    #[test]
    fn test_default_expiry_is_two_hours() {
        let config = JwtConfig::from_values(Some("s3cret".to_string()), None).unwrap();
        assert_eq!(config.expiry_seconds, 7200);
        assert_eq!(config.secret, "s3cret");
    }

    #[test]
    fn test_custom_expiry() {
        let config =
            JwtConfig::from_values(Some("s3cret".to_string()), Some("900".to_string())).unwrap();
        assert_eq!(config.expiry_seconds, 900);
    }

    #[test]
    fn test_invalid_expiry_is_rejected() {
        assert!(
            JwtConfig::from_values(Some("s3cret".to_string()), Some("2h".to_string())).is_err()
        );
        assert!(
            JwtConfig::from_values(Some("s3cret".to_string()), Some("0".to_string())).is_err()
        );
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = JwtConfig::new("super-sensitive-value", 60);
        let debug_str = format!("{:?}", config);
        assert!(!debug_str.contains("super-sensitive-value"));
        assert!(debug_str.contains("[redacted]"));
    }
}
