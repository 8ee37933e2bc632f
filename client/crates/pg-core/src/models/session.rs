use crate::User;

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

const DEFAULT_TOKEN_TYPE: &str = "bearer";

/// Token bundle issued by the hosted auth service.
///
/// Sessions are replaced wholesale on every auth-state change and never
/// mutated in place once adopted.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Lifetime of the access token in seconds, as reported at issue time
    pub expires_in: i64,
    /// Absolute expiry (Unix seconds). Older auth servers omit it.
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: User,
}

fn default_token_type() -> String {
    String::from(DEFAULT_TOKEN_TYPE)
}

impl Session {
    /// Fill in `expires_at` from `expires_in` when the server left it out.
    pub fn with_issue_time(mut self, issued_at: DateTime<Utc>) -> Self {
        if self.expires_at.is_none() {
            self.expires_at = Some(issued_at.timestamp() + self.expires_in);
        }
        self
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
    }

    /// True when the access token is expired or will be within `margin`.
    ///
    /// A session without a known expiry is treated as still valid.
    pub fn is_expired(&self, now: DateTime<Utc>, margin: TimeDelta) -> bool {
        match self.expires_at() {
            Some(expires_at) => now + margin >= expires_at,
            None => false,
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("expires_at", &self.expires_at)
            .field("user", &self.user)
            .finish()
    }
}
