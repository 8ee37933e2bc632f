use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_AUTO_REFRESH, DEFAULT_REFRESH_INTERVAL_SECS,
    DEFAULT_REFRESH_MARGIN_SECS, DEFAULT_SESSION_FILE, DEFAULT_SESSION_PERSIST,
};

use serde::Deserialize;

pub const MAX_REFRESH_MARGIN_SECS: u64 = 3600;
pub const MIN_REFRESH_INTERVAL_SECS: u64 = 1;
pub const MAX_REFRESH_INTERVAL_SECS: u64 = 3600;

/// Session persistence and token refresh behavior.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Keep the session across process restarts
    pub persist: bool,
    /// Session file, relative to the config directory
    pub storage_file: String,
    /// Refresh the access token before it expires
    pub auto_refresh: bool,
    /// Refresh when the token expires within this many seconds
    pub refresh_margin_secs: u64,
    /// How often the background refresher checks the token
    pub refresh_interval_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            persist: DEFAULT_SESSION_PERSIST,
            storage_file: String::from(DEFAULT_SESSION_FILE),
            auto_refresh: DEFAULT_AUTO_REFRESH,
            refresh_margin_secs: DEFAULT_REFRESH_MARGIN_SECS,
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let path = std::path::Path::new(&self.storage_file);
        if self.storage_file.is_empty() || path.is_absolute() || self.storage_file.contains("..")
        {
            return Err(ConfigError::session(
                "session.storage_file must be a relative path and cannot contain '..'",
            ));
        }

        if self.refresh_margin_secs > MAX_REFRESH_MARGIN_SECS {
            return Err(ConfigError::session(format!(
                "session.refresh_margin_secs must be at most {}, got {}",
                MAX_REFRESH_MARGIN_SECS, self.refresh_margin_secs
            )));
        }

        if self.refresh_interval_secs < MIN_REFRESH_INTERVAL_SECS
            || self.refresh_interval_secs > MAX_REFRESH_INTERVAL_SECS
        {
            return Err(ConfigError::session(format!(
                "session.refresh_interval_secs must be {}-{}, got {}",
                MIN_REFRESH_INTERVAL_SECS, MAX_REFRESH_INTERVAL_SECS, self.refresh_interval_secs
            )));
        }

        Ok(())
    }
}
