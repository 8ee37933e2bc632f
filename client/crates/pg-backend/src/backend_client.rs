use crate::{AuthSubscription, BackendResult};

use pg_core::{NewUserProfile, Session, User, UserMetadata, UserProfile};

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

/// Credentials plus auxiliary metadata for account creation.
#[derive(Clone, Serialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    #[serde(rename = "data")]
    pub metadata: UserMetadata,
}

impl SignUpRequest {
    pub fn new(email: &str, password: &str, name: &str, phone_number: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
            metadata: UserMetadata::new(name, phone_number),
        }
    }
}

impl fmt::Debug for SignUpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUpRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("metadata", &self.metadata)
            .finish()
    }
}

/// Outcome of a successful sign-up. `session` is `None` when the backend
/// requires email confirmation before issuing tokens.
#[derive(Debug, Clone)]
pub struct SignUpResponse {
    pub user: User,
    pub session: Option<Session>,
}

/// Capabilities the session store needs from the hosted backend.
#[async_trait]
pub trait BackendClient: Send + Sync {
    /// Current (possibly restored from storage) session, if any.
    async fn get_session(&self) -> BackendResult<Option<Session>>;

    /// Subscribe to auth-state changes.
    fn on_auth_state_change(&self) -> AuthSubscription;

    async fn sign_up(&self, request: &SignUpRequest) -> BackendResult<SignUpResponse>;

    async fn sign_in_with_password(&self, email: &str, password: &str) -> BackendResult<Session>;

    async fn sign_out(&self) -> BackendResult<()>;

    /// `select * from user_profiles where id = :user_id`, exactly one row.
    async fn fetch_profile(&self, user_id: Uuid) -> BackendResult<UserProfile>;

    async fn insert_profile(&self, profile: &NewUserProfile) -> BackendResult<()>;
}
