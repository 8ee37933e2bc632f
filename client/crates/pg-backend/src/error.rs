use std::panic::Location;
use std::path::PathBuf;

use error_location::ErrorLocation;
use thiserror::Error;

/// Errors returned by backend calls and session persistence.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("HTTP request error: {message} {location}")]
    Http {
        message: String,
        location: ErrorLocation,
        #[source]
        source: reqwest::Error,
    },

    #[error("API error: {message} (status: {status}, code: {code}) {location}")]
    Api {
        status: u16,
        code: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("JSON parse error: {message} {location}")]
    Json {
        message: String,
        location: ErrorLocation,
        #[source]
        source: serde_json::Error,
    },

    #[error("Session storage error at {path}: {source} {location}")]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("No active session {location}")]
    NoSession { location: ErrorLocation },
}

impl BackendError {
    /// REST code for "single row requested, none returned".
    pub const NOT_FOUND_CODE: &'static str = "PGRST116";
    /// Postgres unique_violation.
    pub const UNIQUE_VIOLATION_CODE: &'static str = "23505";

    /// Convert reqwest error with context
    #[track_caller]
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        BackendError::Http {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }

    /// Convert JSON error with context
    #[track_caller]
    pub fn from_json(err: serde_json::Error) -> Self {
        BackendError::Json {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }

    /// Create an API error with location
    #[track_caller]
    pub fn api(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        BackendError::Api {
            status,
            code: code.into(),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn storage(path: PathBuf, source: std::io::Error) -> Self {
        BackendError::Storage {
            path,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn no_session() -> Self {
        BackendError::NoSession {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// The profile row does not exist (yet).
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { code, .. } if code == Self::NOT_FOUND_CODE)
    }

    /// Insert conflicted with an existing row.
    pub fn is_duplicate(&self) -> bool {
        match self {
            Self::Api { code, message, .. } => {
                code == Self::UNIQUE_VIOLATION_CODE || message.contains("duplicate")
            }
            _ => false,
        }
    }

    /// The auth server refused the credentials or token outright.
    pub fn is_auth_rejection(&self) -> bool {
        matches!(self, Self::Api { status, .. } if matches!(status, 400 | 401 | 403))
    }

    /// Text suitable for an alert shown to the end user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            Self::Http { message, .. } => format!("Network request failed: {message}"),
            Self::Json { .. } => String::from("Unexpected response from server"),
            Self::Storage { .. } => String::from("Unable to save your session on this device"),
            Self::NoSession { .. } => String::from("You are not signed in"),
        }
    }
}

impl From<reqwest::Error> for BackendError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        BackendError::from_reqwest(err)
    }
}

impl From<serde_json::Error> for BackendError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        BackendError::from_json(err)
    }
}

pub type Result<T> = std::result::Result<T, BackendError>;
