//! Rate limiting configuration for the account endpoints.
//!
//! Login and account creation are throttled per peer IP so that the
//! password check cannot be brute-forced. The key is the socket peer
//! address; forwarding headers are client-controlled and never consulted. Limits use a token bucket: one
//! token is replenished every `auth_per_second` seconds and at most
//! `auth_burst_size` accumulate.
//!
//! # Environment Variables
//!
//! - `RATE_LIMIT_ENABLED`: set to `false` or `0` to disable (default: enabled)
//! - `RATE_LIMIT_AUTH_PER_SECOND`: refill interval in seconds (default: 10)
//! - `RATE_LIMIT_AUTH_BURST_SIZE`: bucket size (default: 5)

use tower_governor::governor::{GovernorConfig, GovernorConfigBuilder};
use tower_governor::key_extractor::PeerIpKeyExtractor;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub enabled: bool,
    pub auth_per_second: u64,
    pub auth_burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            auth_per_second: 10,
            auth_burst_size: 5,
        }
    }
}

impl RateLimitConfig {
    /// A configuration with throttling switched off.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            enabled: std::env::var("RATE_LIMIT_ENABLED")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(defaults.enabled),
            auth_per_second: std::env::var("RATE_LIMIT_AUTH_PER_SECOND")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v| *v > 0)
                .unwrap_or(defaults.auth_per_second),
            auth_burst_size: std::env::var("RATE_LIMIT_AUTH_BURST_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v| *v > 0)
                .unwrap_or(defaults.auth_burst_size),
        }
    }

    /// Builds the governor configuration for the account endpoints.
    ///
    /// Clients are keyed by peer address, so the server must be served with
    /// `ConnectInfo<SocketAddr>`.
    ///
    /// # Panics
    ///
    /// Panics if `auth_per_second` or `auth_burst_size` is zero.
    #[must_use]
    pub fn auth_governor_config(
        &self,
    ) -> GovernorConfig<PeerIpKeyExtractor, ::governor::middleware::NoOpMiddleware> {
        GovernorConfigBuilder::default()
            .per_second(self.auth_per_second)
            .burst_size(self.auth_burst_size)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .expect("Failed to build auth rate limiter config")
    }
}
