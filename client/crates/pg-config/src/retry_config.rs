use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

// A profile row normally appears within a second of sign-up; more than a
// few extra reads only delays the dashboard.
pub const MAX_RETRIES: u32 = 3;
pub const DEFAULT_RETRIES: u32 = 1;

pub const MIN_DELAY_MS: u64 = 100;
pub const MAX_DELAY_MS: u64 = 5000;
pub const DEFAULT_DELAY_MS: u64 = 1000;

/// Extra profile reads after a "row not found" answer, which races the
/// backend's profile-creation trigger right after sign-up.
///
/// Retries are spaced by a fixed delay.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Reads after the first one (0 disables retrying)
    pub retries: u32,
    /// Fixed delay before each retry in milliseconds
    pub delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            retries: DEFAULT_RETRIES,
            delay_ms: DEFAULT_DELAY_MS,
        }
    }
}

impl RetryConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.retries > MAX_RETRIES {
            return Err(ConfigError::config(format!(
                "profile_fetch.retries must be 0-{}, got {}",
                MAX_RETRIES, self.retries
            )));
        }

        if !(MIN_DELAY_MS..=MAX_DELAY_MS).contains(&self.delay_ms) {
            return Err(ConfigError::config(format!(
                "profile_fetch.delay_ms must be {}-{}, got {}",
                MIN_DELAY_MS, MAX_DELAY_MS, self.delay_ms
            )));
        }

        Ok(())
    }
}
