
use crate::Sleeper;

use pg_backend::{
    AuthChangeEvent, AuthEvent, AuthEventBus, AuthSubscription, BackendClient, BackendError,
    BackendResult, SignUpRequest, SignUpResponse,
};
use pg_core::{NewUserProfile, Session, User, UserMetadata, UserProfile};

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;
use uuid::Uuid;

/// Sleeper that records requested delays and returns immediately.
#[derive(Default)]
pub(crate) struct RecordingSleeper {
    pub(crate) delays: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub(crate) fn delays(&self) -> Vec<Duration> {
        self.delays.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.delays.lock().unwrap().push(duration);
    }
}

pub(crate) fn not_found() -> BackendError {
    BackendError::api(
        406,
        BackendError::NOT_FOUND_CODE,
        "JSON object requested, multiple (or no) rows returned",
    )
}

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
        phone_number: None,
    }
}

/// Scripted in-process backend. Unscripted profile reads answer "not found".
#[derive(Default)]
pub(crate) struct FakeBackend {
    pub(crate) events: AuthEventBus,
    pub(crate) persisted: Mutex<Option<Session>>,
    pub(crate) fail_get_session: Mutex<bool>,
    pub(crate) profiles: Mutex<VecDeque<BackendResult<UserProfile>>>,
    pub(crate) sign_up_results: Mutex<VecDeque<BackendResult<SignUpResponse>>>,
    pub(crate) sign_in_results: Mutex<VecDeque<BackendResult<Session>>>,
    pub(crate) sign_out_results: Mutex<VecDeque<BackendResult<()>>>,
    pub(crate) insert_results: Mutex<VecDeque<BackendResult<()>>>,
    pub(crate) inserted: Mutex<Vec<NewUserProfile>>,
    pub(crate) fetch_calls: AtomicUsize,
    /// When set, profile reads block until the gate is notified.
    pub(crate) fetch_gate: Mutex<Option<Arc<Notify>>>,
}

impl FakeBackend {
    pub(crate) fn push_profile(&self, result: BackendResult<UserProfile>) {
        self.profiles.lock().unwrap().push_back(result);
    }

    pub(crate) fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn hold_fetches(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.fetch_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub(crate) fn inserted(&self) -> Vec<NewUserProfile> {
        self.inserted.lock().unwrap().clone()
    }
}

#[async_trait]
impl BackendClient for FakeBackend {
    async fn get_session(&self) -> BackendResult<Option<Session>> {
        if *self.fail_get_session.lock().unwrap() {
            return Err(BackendError::api(500, "HTTP_500", "storage unavailable"));
        }
        Ok(self.persisted.lock().unwrap().clone())
    }

    fn on_auth_state_change(&self) -> AuthSubscription {
        self.events.subscribe()
    }

    async fn sign_up(&self, _request: &SignUpRequest) -> BackendResult<SignUpResponse> {
        let response = self
            .sign_up_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(BackendError::api(500, "HTTP_500", "unscripted sign-up")))?;

        if let Some(session) = &response.session {
            self.events
                .emit(AuthEvent::new(AuthChangeEvent::SignedIn, Some(session.clone())));
        }
        Ok(response)
    }

    async fn sign_in_with_password(&self, _email: &str, _password: &str) -> BackendResult<Session> {
        let session = self
            .sign_in_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(BackendError::api(500, "HTTP_500", "unscripted sign-in")))?;

        self.events
            .emit(AuthEvent::new(AuthChangeEvent::SignedIn, Some(session.clone())));
        Ok(session)
    }

    async fn sign_out(&self) -> BackendResult<()> {
        self.events.emit(AuthEvent::signed_out());
        self.sign_out_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(()))
    }

    async fn fetch_profile(&self, _user_id: Uuid) -> BackendResult<UserProfile> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.fetch_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.profiles
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(not_found()))
    }

    async fn insert_profile(&self, profile: &NewUserProfile) -> BackendResult<()> {
        self.inserted.lock().unwrap().push(profile.clone());
        self.insert_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(()))
    }
}
