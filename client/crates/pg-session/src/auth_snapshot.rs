use crate::AuthState;

use pg_core::{Session, User, UserProfile};

use uuid::Uuid;

/// Everything the screens may read about the current auth state.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSnapshot {
    pub session: Option<Session>,
    pub user: Option<User>,
    pub profile: Option<UserProfile>,
    pub loading: bool,
    pub initialized: bool,
}

impl Default for AuthSnapshot {
    fn default() -> Self {
        Self {
            session: None,
            user: None,
            profile: None,
            loading: true,
            initialized: false,
        }
    }
}

impl AuthSnapshot {
    pub fn state(&self) -> AuthState {
        AuthState::from(self)
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_current_user(&self, user_id: Uuid) -> bool {
        self.user.as_ref().is_some_and(|user| user.id == user_id)
    }

    /// `user_id` is signed in and its profile fetch has resolved.
    pub fn is_settled_for(&self, user_id: Uuid) -> bool {
        self.is_current_user(user_id) && !self.loading
    }
}
