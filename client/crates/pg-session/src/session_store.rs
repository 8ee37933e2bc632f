use crate::{AuthSnapshot, AuthState, RetryPolicy, SignUpOutcome, Sleeper, TokioSleeper, with_retry};

use pg_backend::{AuthEvent, AuthSubscription, BackendClient, BackendResult, SignUpRequest};
use pg_core::{NewUserProfile, Session};

use std::sync::{Arc, Mutex, Weak};

use log::{debug, error, info, warn};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Single source of truth for session, user and profile.
///
/// Screens read [`AuthSnapshot`]s and call the operations below; nothing
/// else writes the state. Dropping the store (or calling
/// [`SessionStore::teardown`]) stops the auth-change listener.
pub struct SessionStore {
    inner: Arc<StoreInner>,
    listener: Mutex<Option<JoinHandle<()>>>,
}

struct StoreInner {
    backend: Arc<dyn BackendClient>,
    retry: RetryPolicy,
    sleeper: Arc<dyn Sleeper>,
    state: watch::Sender<AuthSnapshot>,
    /// Profile fetches spawned for auth events, aborted on teardown.
    fetches: Mutex<Vec<JoinHandle<()>>>,
}

/// A fetch result belongs to the snapshot unless another user is signed in.
fn fetch_applies(snapshot: &AuthSnapshot, user_id: Uuid) -> bool {
    snapshot.user.as_ref().is_none_or(|user| user.id == user_id)
}

/// Clears the loading flag when a profile fetch ends, however it ends,
/// unless another user has signed in meanwhile.
struct LoadingGuard<'a> {
    state: &'a watch::Sender<AuthSnapshot>,
    user_id: Uuid,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state.send_if_modified(|snapshot| {
            if !fetch_applies(snapshot, self.user_id) || !snapshot.loading {
                return false;
            }
            snapshot.loading = false;
            true
        });
    }
}

impl SessionStore {
    pub fn new(backend: Arc<dyn BackendClient>, retry: RetryPolicy) -> Self {
        Self::with_sleeper(backend, retry, Arc::new(TokioSleeper))
    }

    pub fn with_sleeper(
        backend: Arc<dyn BackendClient>,
        retry: RetryPolicy,
        sleeper: Arc<dyn Sleeper>,
    ) -> Self {
        let (state, _) = watch::channel(AuthSnapshot::default());

        Self {
            inner: Arc::new(StoreInner {
                backend,
                retry,
                sleeper,
                state,
                fetches: Mutex::new(Vec::new()),
            }),
            listener: Mutex::new(None),
        }
    }

    pub fn snapshot(&self) -> AuthSnapshot {
        self.inner.state.borrow().clone()
    }

    pub fn watch(&self) -> watch::Receiver<AuthSnapshot> {
        self.inner.state.subscribe()
    }

    pub fn state(&self) -> AuthState {
        self.inner.state.borrow().state()
    }

    /// Wait until the snapshot satisfies `predicate` and return it.
    pub async fn wait_for(&self, predicate: impl FnMut(&AuthSnapshot) -> bool) -> AuthSnapshot {
        let mut rx = self.watch();
        match rx.wait_for(predicate).await {
            Ok(snapshot) => snapshot.clone(),
            Err(_) => self.snapshot(),
        }
    }

    /// Subscribe to auth changes, then restore the persisted session.
    ///
    /// Returns once the restored user's profile fetch has resolved, or
    /// immediately when there is nothing to restore.
    pub async fn initialize(&self) {
        let subscription = self.inner.backend.on_auth_state_change();
        self.spawn_listener(subscription);

        self.inner.state.send_modify(|snapshot| {
            snapshot.initialized = true;
            snapshot.loading = true;
        });

        match self.inner.backend.get_session().await {
            Ok(Some(session)) => {
                let user_id = session.user.id;
                info!("Restored session for user {user_id}");
                self.inner.state.send_modify(|snapshot| {
                    snapshot.user = Some(session.user.clone());
                    snapshot.session = Some(session);
                });
                self.inner.fetch_profile(user_id).await;
            }
            Ok(None) => {
                debug!("No persisted session");
                self.inner.state.send_modify(|snapshot| snapshot.loading = false);
            }
            Err(e) => {
                warn!("Failed to restore session: {e}");
                self.inner.state.send_modify(|snapshot| snapshot.loading = false);
            }
        }
    }

    /// Stop reacting to auth changes and cancel profile fetches they
    /// started. Safe to call more than once.
    pub fn teardown(&self) {
        let handle = self
            .listener
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();

        if let Some(handle) = handle {
            handle.abort();
            debug!("Auth listener aborted");
        }

        self.inner.abort_fetches();
    }

    /// Re-read the profile of the current user, if any.
    pub async fn refresh_profile(&self) {
        let user_id = self
            .inner
            .state
            .borrow()
            .user
            .as_ref()
            .map(|user| user.id);

        match user_id {
            Some(user_id) => self.inner.fetch_profile(user_id).await,
            None => debug!("Profile refresh skipped, no user signed in"),
        }
    }

    pub async fn fetch_profile(&self, user_id: Uuid) {
        self.inner.fetch_profile(user_id).await;
    }

    /// Create an account. When the backend issues a session right away the
    /// profile row is inserted as well; insert failures are logged only,
    /// since the backend trigger may still create the row.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        name: &str,
        phone_number: &str,
    ) -> BackendResult<SignUpOutcome> {
        let request = SignUpRequest::new(email, password, name, phone_number);
        let response = self.inner.backend.sign_up(&request).await?;

        if response.session.is_none() {
            info!("Sign-up for {} awaits email confirmation", response.user.id);
            return Ok(SignUpOutcome::ConfirmationRequired);
        }

        let profile = NewUserProfile::new(response.user.id, email, name, phone_number);
        match self.inner.backend.insert_profile(&profile).await {
            Ok(()) => debug!("Created profile for user {}", profile.id),
            Err(e) if e.is_duplicate() => {
                debug!("Profile for user {} already exists", profile.id);
            }
            Err(e) => error!("Failed to create profile for user {}: {e}", profile.id),
        }

        Ok(SignUpOutcome::SessionIssued)
    }

    /// Password sign-in. The profile is loaded by the auth-change listener;
    /// wait for [`AuthSnapshot::is_settled_for`] with the returned user id.
    pub async fn sign_in(&self, email: &str, password: &str) -> BackendResult<Session> {
        let session = self
            .inner
            .backend
            .sign_in_with_password(email, password)
            .await?;
        info!("Signed in user {}", session.user.id);
        Ok(session)
    }

    /// Sign out. The local profile is cleared whatever the backend answers.
    pub async fn sign_out(&self) -> BackendResult<()> {
        let result = self.inner.backend.sign_out().await;
        if let Err(e) = &result {
            warn!("Sign-out request failed: {e}");
        }

        self.inner.state.send_modify(|snapshot| snapshot.profile = None);
        result
    }

    fn spawn_listener(&self, subscription: AuthSubscription) {
        let handle = tokio::spawn(listen(Arc::downgrade(&self.inner), subscription));

        let previous = self
            .listener
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .replace(handle);

        if let Some(previous) = previous {
            previous.abort();
        }
    }
}

impl Drop for SessionStore {
    fn drop(&mut self) {
        self.teardown();
    }
}

async fn listen(inner: Weak<StoreInner>, mut subscription: AuthSubscription) {
    while let Some(event) = subscription.recv().await {
        let Some(inner) = inner.upgrade() else {
            break;
        };
        inner.apply_event(event);
    }

    subscription.unsubscribe();
    debug!("Auth listener stopped");
}

impl StoreInner {
    /// Replace session and user. Loading is raised only when a different
    /// user arrives, so token refreshes never send screens back to loading.
    fn apply_event(self: Arc<Self>, event: AuthEvent) {
        debug!("Applying auth event {}", event.kind);
        let user = event.user().cloned();
        let user_id = user.as_ref().map(|user| user.id);
        let session = event.session;

        let mut user_changed = false;
        self.state.send_modify(|snapshot| {
            user_changed = snapshot.user.as_ref().map(|user| user.id) != user_id;
            snapshot.user = user;
            snapshot.session = session;
            match user_id {
                Some(_) if user_changed => {
                    snapshot.profile = None;
                    snapshot.loading = true;
                }
                Some(_) => {}
                None => {
                    snapshot.profile = None;
                    snapshot.loading = false;
                }
            }
        });

        let mut fetches = self.fetches.lock().unwrap_or_else(|e| e.into_inner());
        fetches.retain(|handle| !handle.is_finished());
        if user_changed {
            for stale in fetches.drain(..) {
                stale.abort();
            }
        }

        if let Some(user_id) = user_id {
            let inner = Arc::clone(&self);
            fetches.push(tokio::spawn(async move {
                inner.fetch_profile(user_id).await;
            }));
        }
    }

    fn abort_fetches(&self) {
        let mut fetches = self.fetches.lock().unwrap_or_else(|e| e.into_inner());
        let fetches = std::mem::take(&mut *fetches);
        if !fetches.is_empty() {
            debug!("Aborting {} profile fetch(es)", fetches.len());
        }
        for handle in fetches {
            handle.abort();
        }
    }

    async fn fetch_profile(&self, user_id: Uuid) {
        let _loading = LoadingGuard {
            state: &self.state,
            user_id,
        };

        let result = with_retry(&self.retry, self.sleeper.as_ref(), "Profile fetch", || {
            self.backend.fetch_profile(user_id)
        })
        .await;

        match result {
            Ok(profile) => {
                debug!("Loaded profile for user {user_id}");
                self.state.send_if_modified(|snapshot| {
                    if !fetch_applies(snapshot, user_id) {
                        return false;
                    }
                    snapshot.profile = Some(profile);
                    true
                });
            }
            Err(e) if e.is_not_found() => {
                warn!("Profile for user {user_id} still missing after retry");
            }
            Err(e) => error!("Failed to fetch profile for user {user_id}: {e}"),
        }
    }
}
