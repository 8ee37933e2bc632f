mod navigator;

use pg_backend::{
    AuthChangeEvent, AuthEvent, AuthEventBus, AuthSubscription, BackendClient, BackendError,
    BackendResult, SignUpRequest, SignUpResponse,
};
use pg_core::{NewUserProfile, Session, User, UserMetadata, UserProfile};
use pg_session::{RetryPolicy, SessionStore};

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

pub(crate) fn user(id: Uuid) -> User {
    User {
        id,
        email: Some(String::from("a@b.com")),
        user_metadata: UserMetadata::new("Jane Doe", ""),
    }
}

pub(crate) fn session_for(id: Uuid) -> Session {
    Session {
        access_token: String::from("access"),
        refresh_token: String::from("refresh"),
        token_type: String::from("bearer"),
        expires_in: 3600,
        expires_at: None,
        user: user(id),
    }
}

pub(crate) fn profile_for(id: Uuid) -> UserProfile {
    UserProfile {
        id,
        name: String::from("Jane Doe"),
        email: String::from("a@b.com"),
        phone_number: Some(String::from("+1 555 0100")),
    }
}

/// Backend answering from fixed responses; counts the calls screens make.
#[derive(Default)]
pub(crate) struct StubBackend {
    pub(crate) events: AuthEventBus,
    pub(crate) persisted: Option<Session>,
    pub(crate) profile: Option<UserProfile>,
    /// Profiles of users other than the one signing in.
    pub(crate) other_profiles: Vec<UserProfile>,
    pub(crate) sign_in_error: Option<(u16, &'static str, &'static str)>,
    pub(crate) sign_up_error: Option<(u16, &'static str, &'static str)>,
    pub(crate) sign_up_issues_session: bool,
    pub(crate) inserted: Mutex<Vec<NewUserProfile>>,
    pub(crate) sign_in_calls: AtomicUsize,
    pub(crate) sign_up_calls: AtomicUsize,
}

impl StubBackend {
    pub(crate) fn calls(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BackendClient for StubBackend {
    async fn get_session(&self) -> BackendResult<Option<Session>> {
        Ok(self.persisted.clone())
    }

    fn on_auth_state_change(&self) -> AuthSubscription {
        self.events.subscribe()
    }

    async fn sign_up(&self, request: &SignUpRequest) -> BackendResult<SignUpResponse> {
        self.sign_up_calls.fetch_add(1, Ordering::SeqCst);
        if let Some((status, code, message)) = self.sign_up_error {
            return Err(BackendError::api(status, code, message));
        }

        let id = Uuid::new_v4();
        let mut new_user = user(id);
        new_user.email = Some(request.email.clone());
        let session = self.sign_up_issues_session.then(|| session_for(id));
        Ok(SignUpResponse {
            user: new_user,
            session,
        })
    }

    async fn sign_in_with_password(&self, _email: &str, _password: &str) -> BackendResult<Session> {
        self.sign_in_calls.fetch_add(1, Ordering::SeqCst);
        if let Some((status, code, message)) = self.sign_in_error {
            return Err(BackendError::api(status, code, message));
        }

        let session = session_for(self.profile.as_ref().map_or_else(Uuid::new_v4, |p| p.id));
        self.events
            .emit(AuthEvent::new(AuthChangeEvent::SignedIn, Some(session.clone())));
        Ok(session)
    }

    async fn sign_out(&self) -> BackendResult<()> {
        self.events.emit(AuthEvent::signed_out());
        Ok(())
    }

    async fn fetch_profile(&self, user_id: Uuid) -> BackendResult<UserProfile> {
        self.other_profiles
            .iter()
            .find(|profile| profile.id == user_id)
            .or(self.profile.as_ref())
            .cloned()
            .ok_or_else(|| BackendError::api(406, BackendError::NOT_FOUND_CODE, "no rows returned"))
    }

    async fn insert_profile(&self, profile: &NewUserProfile) -> BackendResult<()> {
        self.inserted.lock().unwrap().push(profile.clone());
        Ok(())
    }
}

pub(crate) fn store_for(backend: &Arc<StubBackend>) -> SessionStore {
    let retry = RetryPolicy {
        initial_delay: std::time::Duration::from_millis(1),
        ..RetryPolicy::default()
    };
    SessionStore::new(backend.clone(), retry)
}

pub(crate) fn output(buffer: Vec<u8>) -> String {
    String::from_utf8(buffer).unwrap()
}
