use crate::{
    BackendConfig, CONFIG_DIR_ENV, CONFIG_FILE_NAME, ConfigError, ConfigErrorResult,
    DEFAULT_CONFIG_DIR, LoggingConfig, RetryConfig, SessionConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub backend: BackendConfig,
    pub session: SessionConfig,
    pub profile_fetch: RetryConfig,
    pub logging: LoggingConfig,
    /// Directory the config was loaded from; relative paths resolve here
    #[serde(skip)]
    pub config_dir: PathBuf,
}

impl Config {
    /// Load config from the default config directory.
    ///
    /// Loading order:
    /// 1. Check for PG_CONFIG_DIR env var, else use ./.pg/
    /// 2. Load config.toml if it exists, else use defaults
    /// 3. Apply PG_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;
        Self::load_from(&config_dir)
    }

    /// Load config from an explicit directory, creating it if missing.
    pub fn load_from(config_dir: &Path) -> ConfigErrorResult<Self> {
        if !config_dir.exists() {
            std::fs::create_dir_all(config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.to_path_buf(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILE_NAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.config_dir = config_dir.to_path_buf();
        config.apply_env_overrides();

        Ok(config)
    }

    /// Load and parse TOML file with detailed error context.
    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: PG_CONFIG_DIR env var > ./.pg/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.backend.validate()?;
        self.session.validate()?;
        self.profile_fetch.validate()?;

        if let Some(file) = &self.logging.file
            && (Path::new(file).is_absolute() || file.contains(".."))
        {
            return Err(ConfigError::config(
                "logging.file must be relative and cannot contain '..'",
            ));
        }

        Ok(())
    }

    /// Absolute path of the persisted session file.
    pub fn session_path(&self) -> PathBuf {
        self.config_dir.join(&self.session.storage_file)
    }

    /// Absolute path of the log file, if file logging is configured.
    pub fn log_path(&self) -> Option<PathBuf> {
        self.logging
            .file
            .as_ref()
            .map(|file| self.config_dir.join(file))
    }

    /// Log configuration summary (NEVER logs the anon key or tokens).
    pub fn log_summary(&self) {
        info!("Configuration loaded from {}:", self.config_dir.display());
        info!(
            "  backend: {} (timeout {}s)",
            self.backend.base_url(),
            self.backend.request_timeout_secs
        );
        info!(
            "  session: persist={}, file={}, auto_refresh={} (margin {}s, every {}s)",
            self.session.persist,
            self.session.storage_file,
            self.session.auto_refresh,
            self.session.refresh_margin_secs,
            self.session.refresh_interval_secs
        );
        info!(
            "  profile_fetch: retries={}, delay={}ms",
            self.profile_fetch.retries, self.profile_fetch.delay_ms
        );
        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        // Backend
        Self::apply_env_string("PG_BACKEND_URL", &mut self.backend.url);
        Self::apply_env_string("PG_BACKEND_ANON_KEY", &mut self.backend.anon_key);
        Self::apply_env_parse(
            "PG_BACKEND_TIMEOUT_SECS",
            &mut self.backend.request_timeout_secs,
        );

        // Session
        Self::apply_env_bool("PG_SESSION_PERSIST", &mut self.session.persist);
        Self::apply_env_string("PG_SESSION_FILE", &mut self.session.storage_file);
        Self::apply_env_bool("PG_SESSION_AUTO_REFRESH", &mut self.session.auto_refresh);
        Self::apply_env_parse(
            "PG_SESSION_REFRESH_MARGIN_SECS",
            &mut self.session.refresh_margin_secs,
        );
        Self::apply_env_parse(
            "PG_SESSION_REFRESH_INTERVAL_SECS",
            &mut self.session.refresh_interval_secs,
        );

        // Profile fetch retry
        Self::apply_env_parse("PG_PROFILE_FETCH_RETRIES", &mut self.profile_fetch.retries);
        Self::apply_env_parse("PG_PROFILE_FETCH_DELAY_MS", &mut self.profile_fetch.delay_ms);

        // Logging
        Self::apply_env_parse("PG_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("PG_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("PG_LOG_FILE", &mut self.logging.file);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
